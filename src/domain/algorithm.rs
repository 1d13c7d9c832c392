//! Algorithm suites: the closed set of supported digest + cipher pairs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::constants;
use crate::infra::error::SigningError;

/// Supported signer algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignerAlgorithm {
    #[serde(rename = "SHA256withRSA")]
    Sha256WithRsa,
    #[serde(rename = "SHA384withRSA")]
    Sha384WithRsa,
    #[serde(rename = "SHA512withRSA")]
    Sha512WithRsa,
    #[serde(rename = "SHA256withECDSA")]
    Sha256WithEcdsa,
    #[serde(rename = "SHA384withECDSA")]
    Sha384WithEcdsa,
    #[serde(rename = "SHA512withECDSA")]
    Sha512WithEcdsa,
}

impl SignerAlgorithm {
    pub const ALL: [SignerAlgorithm; 6] = [
        SignerAlgorithm::Sha256WithRsa,
        SignerAlgorithm::Sha384WithRsa,
        SignerAlgorithm::Sha512WithRsa,
        SignerAlgorithm::Sha256WithEcdsa,
        SignerAlgorithm::Sha384WithEcdsa,
        SignerAlgorithm::Sha512WithEcdsa,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SignerAlgorithm::Sha256WithRsa => "SHA256withRSA",
            SignerAlgorithm::Sha384WithRsa => "SHA384withRSA",
            SignerAlgorithm::Sha512WithRsa => "SHA512withRSA",
            SignerAlgorithm::Sha256WithEcdsa => "SHA256withECDSA",
            SignerAlgorithm::Sha384WithEcdsa => "SHA384withECDSA",
            SignerAlgorithm::Sha512WithEcdsa => "SHA512withECDSA",
        }
    }

    pub fn digest_oid(&self) -> &'static str {
        match self {
            SignerAlgorithm::Sha256WithRsa | SignerAlgorithm::Sha256WithEcdsa => {
                constants::SHA256_OID
            }
            SignerAlgorithm::Sha384WithRsa | SignerAlgorithm::Sha384WithEcdsa => {
                constants::SHA384_OID
            }
            SignerAlgorithm::Sha512WithRsa | SignerAlgorithm::Sha512WithEcdsa => {
                constants::SHA512_OID
            }
        }
    }

    pub fn cipher_oid(&self) -> &'static str {
        match self {
            SignerAlgorithm::Sha256WithRsa => constants::SHA256_WITH_RSA_OID,
            SignerAlgorithm::Sha384WithRsa => constants::SHA384_WITH_RSA_OID,
            SignerAlgorithm::Sha512WithRsa => constants::SHA512_WITH_RSA_OID,
            SignerAlgorithm::Sha256WithEcdsa => constants::ECDSA_WITH_SHA256_OID,
            SignerAlgorithm::Sha384WithEcdsa => constants::ECDSA_WITH_SHA384_OID,
            SignerAlgorithm::Sha512WithEcdsa => constants::ECDSA_WITH_SHA512_OID,
        }
    }

    pub fn suite(&self) -> AlgorithmSuite {
        AlgorithmSuite::from(*self)
    }
}

impl FromStr for SignerAlgorithm {
    type Err = SigningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SignerAlgorithm::ALL
            .into_iter()
            .find(|algo| algo.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| SigningError::UnsupportedAlgorithm(format!("unknown suite: {s}")))
    }
}

impl fmt::Display for SignerAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Digest OID + cipher OID pair, as dotted strings.
///
/// Usually produced from a [`SignerAlgorithm`]; a raw pair is validated only
/// when resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlgorithmSuite {
    digest_oid: String,
    cipher_oid: String,
}

impl AlgorithmSuite {
    #[must_use]
    pub fn new(digest_oid: impl Into<String>, cipher_oid: impl Into<String>) -> Self {
        Self {
            digest_oid: digest_oid.into(),
            cipher_oid: cipher_oid.into(),
        }
    }
    #[must_use]
    pub fn digest_oid(&self) -> &str {
        &self.digest_oid
    }
    #[must_use]
    pub fn cipher_oid(&self) -> &str {
        &self.cipher_oid
    }
}

impl From<SignerAlgorithm> for AlgorithmSuite {
    fn from(algo: SignerAlgorithm) -> Self {
        Self::new(algo.digest_oid(), algo.cipher_oid())
    }
}

impl fmt::Display for AlgorithmSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.digest_oid, self.cipher_oid)
    }
}

/// How the outer SignerInfo signatureAlgorithm is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignatureAlgorithmMode {
    /// Use the suite's cipher OID.
    #[default]
    FromSuite,
    /// Always emit sha256WithRSAEncryption, whatever the suite says.
    FixedRsaSha256,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suite_oids_are_paired() {
        let suite = SignerAlgorithm::Sha256WithRsa.suite();
        assert_eq!(suite.digest_oid(), "2.16.840.1.101.3.4.2.1");
        assert_eq!(suite.cipher_oid(), "1.2.840.113549.1.1.11");

        let suite = SignerAlgorithm::Sha512WithEcdsa.suite();
        assert_eq!(suite.digest_oid(), "2.16.840.1.101.3.4.2.3");
        assert_eq!(suite.cipher_oid(), "1.2.840.10045.4.3.4");
    }

    #[test]
    fn parses_suite_names_case_insensitively() {
        assert_eq!(
            "sha384withrsa".parse::<SignerAlgorithm>().unwrap(),
            SignerAlgorithm::Sha384WithRsa
        );
        assert!("SHA1withRSA".parse::<SignerAlgorithm>().is_err());
    }
}
