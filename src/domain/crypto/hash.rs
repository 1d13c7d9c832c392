//! Hash algorithm domain type.
//!
//! SHA-2 family digests used for the certificate reference inside
//! signing-certificate-v2 and for digest length checks.

use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256, Sha384, Sha512};

use crate::domain::constants;
use crate::infra::error::SigningError;

/// Supported hash algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
        }
    }

    pub fn digest_size(&self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }

    /// Dotted OID string of the digest algorithm.
    pub fn oid(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => constants::SHA256_OID,
            HashAlgorithm::Sha384 => constants::SHA384_OID,
            HashAlgorithm::Sha512 => constants::SHA512_OID,
        }
    }

    /// Look up the algorithm named by a dotted OID string.
    pub fn from_oid(oid: &str) -> Option<Self> {
        match oid {
            constants::SHA256_OID => Some(HashAlgorithm::Sha256),
            constants::SHA384_OID => Some(HashAlgorithm::Sha384),
            constants::SHA512_OID => Some(HashAlgorithm::Sha512),
            _ => None,
        }
    }

    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self {
            HashAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
            HashAlgorithm::Sha384 => Sha384::digest(data).to_vec(),
            HashAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = SigningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "").as_str() {
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha384" => Ok(HashAlgorithm::Sha384),
            "sha512" => Ok(HashAlgorithm::Sha512),
            other => HashAlgorithm::from_oid(other).ok_or_else(|| {
                SigningError::UnsupportedAlgorithm(format!("unknown hash algorithm: {s}"))
            }),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_algorithm_properties() {
        assert_eq!(HashAlgorithm::Sha256.as_str(), "sha256");
        assert_eq!(HashAlgorithm::Sha256.digest_size(), 32);

        assert_eq!(HashAlgorithm::Sha384.as_str(), "sha384");
        assert_eq!(HashAlgorithm::Sha384.digest_size(), 48);

        assert_eq!(HashAlgorithm::Sha512.as_str(), "sha512");
        assert_eq!(HashAlgorithm::Sha512.digest_size(), 64);
    }

    #[test]
    fn oid_lookup_round_trips() {
        for algo in [
            HashAlgorithm::Sha256,
            HashAlgorithm::Sha384,
            HashAlgorithm::Sha512,
        ] {
            assert_eq!(HashAlgorithm::from_oid(algo.oid()), Some(algo));
            assert_eq!(algo.digest(b"abc").len(), algo.digest_size());
        }
        assert_eq!(HashAlgorithm::from_oid("1.3.14.3.2.26"), None);
    }

    #[test]
    fn parses_names_and_oids() {
        assert_eq!("SHA-256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha256);
        assert_eq!(
            "2.16.840.1.101.3.4.2.3".parse::<HashAlgorithm>().unwrap(),
            HashAlgorithm::Sha512
        );
        assert!("md5".parse::<HashAlgorithm>().is_err());
    }
}
