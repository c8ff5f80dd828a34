//! Content fingerprints for change detection.

use exam_model::Test;
use sha2::{Digest, Sha256};

use crate::error::{PersistenceError, Result};

/// SHA-256 of the test's canonical JSON, hex encoded.
///
/// The JSON form has a fixed field order and no maps, so equal tests always
/// produce equal fingerprints.
pub fn fingerprint(test: &Test) -> Result<String> {
    let bytes = serde_json::to_vec(test).map_err(|e| PersistenceError::Serialization {
        source: Box::new(e),
    })?;
    let hash = Sha256::digest(&bytes);
    Ok(hex::encode(hash))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_tests_share_a_fingerprint() {
        let a = Test::new("Sample", 120).unwrap();
        let b = Test::new("Sample", 120).unwrap();
        let hash = fingerprint(&a).unwrap();
        assert_eq!(hash.len(), 64);
        assert_eq!(fingerprint(&b).unwrap(), hash);

        let c = Test::new("Other", 120).unwrap();
        assert_ne!(fingerprint(&c).unwrap(), hash);
    }
}
