//! Arithmetic and the optimal pairing for the Brezing-Weng curve BW13-P310.
//!
//! The field, group and pairing types are generic over a [`BWParam`](bwparam::BWParam)
//! parameter table and a limb count; the `BW13P310*` type aliases fix both.
//! [`BW13Context`](context::BW13Context) wraps the concrete instance behind a validated,
//! immutable configuration.
//!
//! ```rust
//! use bw13_curves::bwpairing::BW13P310Pairing;
//! use bw13_curves::bwpoint::BW13P310Point;
//! use bw13_curves::bwpoint13::BW13P310Point13;
//! use bw13_curves::bwzn::BW13P310Zn;
//! use crypto_bigint::Random;
//!
//! let mut rng = rand::rng();
//! let k = BW13P310Zn::random(&mut rng);
//! let P = BW13P310Point::default_generator();
//! let Q = BW13P310Point13::hash_to_g2(b"message");
//! let a = BW13P310Pairing::pair(&(k*P), &Q).unwrap();
//! let b = BW13P310Pairing::pair(&P, &Q.mul_glv(&k)).unwrap();
//! assert_eq!(a, b);
//! ```

pub mod bwfp;
pub mod bwfp13;
pub mod bwpairing;
pub mod bwparam;
pub mod bwpoint;
pub mod bwpoint13;
pub mod bwzn;
pub mod config;
pub mod context;
pub mod errors;
pub mod traits;

pub use config::{BW13Config, CurveId, HashId};
pub use context::BW13Context;
pub use errors::BWError;
