//! An immutable pairing context: a validated [`BW13Config`] together with the
//! default generators of the selected curve.
//!
//! ```rust
//! use bw13_curves::config::BW13Config;
//! use bw13_curves::context::BW13Context;
//!
//! let ctx = BW13Context::new(BW13Config::default()).expect("valid configuration");
//! let Q = ctx.hash_to_g2(b"message");
//! let g = ctx.pair(&ctx.g1(), &Q).expect("pairing");
//! assert!(ctx.is_valid_gt(&g));
//! ```

use crate::bwfp13::BW13P310Fp13;
use crate::bwpairing::BW13P310Pairing;
use crate::bwparam::{validate, BW13P310Param, BWParam};
use crate::bwpoint::BW13P310Point;
use crate::bwpoint13::BW13P310Point13;
use crate::config::{BW13Config, HashId};
use crate::errors::BWError;
use tracing::{debug, instrument};

#[derive(Clone, Debug)]
pub struct BW13Context {
    config: BW13Config,
    g1: BW13P310Point,
    g2: BW13P310Point13,
}

impl BW13Context {
    /// Build a context from a configuration, checking once that the curve is supported,
    /// that its parameter table is consistent, and that its generators lie in
    /// <i><b>G</b>&#x2081;</i> and <i><b>G</b>&#x2082;</i>.
    #[instrument(level = "trace", skip_all, fields(curve = ?config.curve, hash = ?config.hash))]
    pub fn new(config: BW13Config) -> Result<Self, BWError> {
        config.ensure_supported()?;
        validate::<BW13P310Param, { BW13P310Param::LIMBS }>()?;
        let g1 = BW13P310Point::default_generator();
        if !g1.is_valid_g1() {
            return Err(BWError::InvalidCurveParameters("G1 generator outside G1".to_string()));
        }
        let g2 = BW13P310Point13::default_generator();
        if !g2.is_valid_g2() {
            return Err(BWError::InvalidCurveParameters("G2 generator outside G2".to_string()));
        }
        debug!("pairing context ready");
        Ok(Self { config, g1, g2 })
    }

    pub fn config(&self) -> &BW13Config {
        &self.config
    }

    /// The default generator of <i><b>G</b>&#x2081;</i>.
    pub fn g1(&self) -> BW13P310Point {
        self.g1
    }

    /// The default generator of <i><b>G</b>&#x2082;</i>.
    pub fn g2(&self) -> BW13P310Point13 {
        self.g2
    }

    /// Hash a message to <i><b>G</b>&#x2082;</i> with the configured XOF.
    pub fn hash_to_g2(&self, data: &[u8]) -> BW13P310Point13 {
        match self.config.hash {
            HashId::Shake128 => BW13P310Point13::shake128(data),
            HashId::Shake256 => BW13P310Point13::shake256(data),
        }
    }

    #[allow(non_snake_case)]
    pub fn pair(&self, P: &BW13P310Point, Q: &BW13P310Point13) -> Result<BW13P310Fp13, BWError> {
        BW13P310Pairing::pair(P, Q)
    }

    #[allow(non_snake_case)]
    pub fn is_valid_g1(&self, P: &BW13P310Point) -> bool {
        P.is_valid_g1()
    }

    #[allow(non_snake_case)]
    pub fn is_valid_g2(&self, Q: &BW13P310Point13) -> bool {
        Q.is_valid_g2()
    }

    pub fn is_valid_gt(&self, g: &BW13P310Fp13) -> bool {
        g.is_valid_gt()
    }
}


#[cfg(test)]
mod tests {
    use crate::config::CurveId;
    use crate::traits::{BWField, One};
    use super::*;

    #[test]
    #[allow(non_snake_case)]
    fn BW13Context_test() {
        assert!(matches!(
            BW13Context::new(BW13Config::new(CurveId::Bn254, HashId::Shake256)),
            Err(BWError::InvalidCurveParameters(_))));

        let ctx = BW13Context::new(BW13Config::default()).unwrap();
        assert_eq!(ctx.config(), &BW13Config::default());
        assert!(ctx.is_valid_g1(&ctx.g1()));
        assert!(ctx.is_valid_g2(&ctx.g2()));

        // the configured XOF is the one used:
        let Q = ctx.hash_to_g2(b"abc");
        assert_eq!(Q, BW13P310Point13::shake256(b"abc"));
        assert!(ctx.is_valid_g2(&Q));
        let ctx128 = BW13Context::new(BW13Config::new(CurveId::Bw13P310, HashId::Shake128)).unwrap();
        let Q128 = ctx128.hash_to_g2(b"abc");
        assert_eq!(Q128, BW13P310Point13::shake128(b"abc"));
        assert_ne!(Q, Q128);

        let g = ctx.pair(&ctx.g1(), &Q).unwrap();
        assert!(ctx.is_valid_gt(&g));
        assert!(!bool::from(g.is_one()));
        assert_eq!(ctx.pair(&ctx.g1().double(1), &Q).unwrap(), g.sq());
    }
}
