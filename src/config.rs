//! Configuration of the curve and hash function behind a [`BW13Context`](crate::context::BW13Context).
//!
//! ```rust
//! use bw13_curves::config::{BW13Config, CurveId, HashId};
//!
//! let config = BW13Config::new(CurveId::Bw13P310, HashId::Shake128);
//! config.ensure_supported().expect("supported curve");
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::BWError;

/// Pairing-friendly curves known to the configuration layer.
///
/// Only `Bw13P310` has a parameter table in this crate; the others are recognized so that a
/// serialized configuration naming them fails with a descriptive error instead of a parse error.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum CurveId {
    /// Brezing-Weng curve with embedding degree 13 and a 310-bit base field
    Bw13P310,
    /// Barreto-Naehrig curve over a 254-bit field
    Bn254,
    /// Barreto-Lynn-Scott curve with embedding degree 12 over a 381-bit field
    Bls12_381,
}

/// Extendable-output function used to hash byte strings to field elements.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum HashId {
    Shake128,
    Shake256,
}

/// Curve and hash selection.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BW13Config {
    /// The pairing-friendly curve to use
    pub curve: CurveId,
    /// The XOF used by hash-to-curve
    pub hash: HashId,
}

impl BW13Config {
    pub fn new(curve: CurveId, hash: HashId) -> Self {
        Self { curve, hash }
    }

    /// Check that the selected curve has a parameter table.
    ///
    /// # Returns
    ///
    /// - `Ok(())` for BW13-P310
    /// - `Err(BWError::InvalidCurveParameters)` naming the curve otherwise
    pub fn ensure_supported(&self) -> Result<(), BWError> {
        match self.curve {
            CurveId::Bw13P310 => Ok(()),
            other => Err(BWError::InvalidCurveParameters(
                format!("{:?} is not a BW13 curve", other))),
        }
    }
}

impl Default for BW13Config {
    fn default() -> Self {
        Self::new(CurveId::Bw13P310, HashId::Shake256)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(non_snake_case)]
    fn BW13Config_test() {
        let config = BW13Config::default();
        assert_eq!(config.curve, CurveId::Bw13P310);
        assert_eq!(config.hash, HashId::Shake256);
        assert!(config.ensure_supported().is_ok());

        for curve in [CurveId::Bn254, CurveId::Bls12_381] {
            let config = BW13Config::new(curve, HashId::Shake128);
            assert!(matches!(config.ensure_supported(), Err(BWError::InvalidCurveParameters(_))));
        }

        // serialized form:
        let config = BW13Config::new(CurveId::Bw13P310, HashId::Shake128);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"curve":"Bw13P310","hash":"Shake128"}"#);
        let back: BW13Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
        assert!(serde_json::from_str::<BW13Config>(r#"{"curve":"Bw12","hash":"Shake128"}"#).is_err());
    }
}
