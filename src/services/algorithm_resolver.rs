//! Algorithm identifier resolution.
//!
//! Maps dotted OID strings and algorithm suites onto `AlgorithmIdentifier`
//! values with absent parameters.

use der::asn1::ObjectIdentifier;
use spki::AlgorithmIdentifierOwned;

use crate::domain::algorithm::{AlgorithmSuite, SignatureAlgorithmMode};
use crate::domain::constants;
use crate::domain::crypto::HashAlgorithm;
use crate::infra::error::{SigningError, SigningResult};

/// Resolve a dotted OID into an `AlgorithmIdentifier` without parameters.
pub fn resolve(oid: &str) -> SigningResult<AlgorithmIdentifierOwned> {
    let trimmed = oid.trim();
    if trimmed.is_empty() {
        return Err(SigningError::InvalidAlgorithmIdentifier(
            "algorithm OID is empty".into(),
        ));
    }
    let oid = ObjectIdentifier::new(trimmed).map_err(|e| {
        SigningError::InvalidAlgorithmIdentifier(format!("'{trimmed}' is not an OID: {e}"))
    })?;
    Ok(AlgorithmIdentifierOwned {
        oid,
        parameters: None,
    })
}

/// Identifiers derived from one algorithm suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSuite {
    /// digestAlgorithm of the SignerInfo and of `SignedData.digestAlgorithms`.
    pub digest_algorithm: AlgorithmIdentifierOwned,
    /// Outer SignerInfo signatureAlgorithm.
    pub signature_algorithm: AlgorithmIdentifierOwned,
    /// Hash function named by the digest OID.
    pub hash: HashAlgorithm,
}

/// Stateless resolver parameterized by the outer signature algorithm mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlgorithmResolver {
    mode: SignatureAlgorithmMode,
}

impl AlgorithmResolver {
    #[must_use]
    pub fn new(mode: SignatureAlgorithmMode) -> Self {
        Self { mode }
    }

    #[must_use]
    pub fn mode(&self) -> SignatureAlgorithmMode {
        self.mode
    }

    pub fn resolve_suite(&self, suite: &AlgorithmSuite) -> SigningResult<ResolvedSuite> {
        let digest_algorithm = resolve(suite.digest_oid())?;
        // Validate the suite's cipher OID even when the fixed mode ignores it.
        let cipher_algorithm = resolve(suite.cipher_oid())?;
        let hash = HashAlgorithm::from_oid(&digest_algorithm.oid.to_string()).ok_or_else(|| {
            SigningError::UnsupportedAlgorithm(format!(
                "digest algorithm {} is not supported",
                digest_algorithm.oid
            ))
        })?;
        let signature_algorithm = match self.mode {
            SignatureAlgorithmMode::FromSuite => cipher_algorithm,
            SignatureAlgorithmMode::FixedRsaSha256 => resolve(constants::SHA256_WITH_RSA_OID)?,
        };
        log::debug!(
            "resolved suite {suite}: digest={}, signature={} ({:?})",
            digest_algorithm.oid,
            signature_algorithm.oid,
            self.mode
        );
        Ok(ResolvedSuite {
            digest_algorithm,
            signature_algorithm,
            hash,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::algorithm::SignerAlgorithm;

    #[test]
    fn resolves_oid_without_parameters() {
        let alg = resolve("2.16.840.1.101.3.4.2.1").unwrap();
        assert_eq!(alg.oid.to_string(), "2.16.840.1.101.3.4.2.1");
        assert!(alg.parameters.is_none());
    }

    #[test]
    fn rejects_empty_and_malformed_oids() {
        for bad in ["", "   ", "sha256", "1", "1.2.abc"] {
            let err = resolve(bad).unwrap_err();
            assert!(
                matches!(err, SigningError::InvalidAlgorithmIdentifier(_)),
                "{bad:?} -> {err:?}"
            );
        }
    }

    #[test]
    fn suite_mode_controls_outer_signature_algorithm() {
        let suite = SignerAlgorithm::Sha384WithEcdsa.suite();

        let from_suite = AlgorithmResolver::new(SignatureAlgorithmMode::FromSuite)
            .resolve_suite(&suite)
            .unwrap();
        assert_eq!(from_suite.hash, HashAlgorithm::Sha384);
        assert_eq!(
            from_suite.signature_algorithm.oid.to_string(),
            constants::ECDSA_WITH_SHA384_OID
        );

        let fixed = AlgorithmResolver::new(SignatureAlgorithmMode::FixedRsaSha256)
            .resolve_suite(&suite)
            .unwrap();
        assert_eq!(fixed.digest_algorithm, from_suite.digest_algorithm);
        assert_eq!(
            fixed.signature_algorithm.oid.to_string(),
            constants::SHA256_WITH_RSA_OID
        );
    }

    #[test]
    fn unknown_digest_oid_is_unsupported() {
        // SHA-1
        let suite = AlgorithmSuite::new("1.3.14.3.2.26", constants::SHA256_WITH_RSA_OID);
        let err = AlgorithmResolver::default().resolve_suite(&suite).unwrap_err();
        assert!(matches!(err, SigningError::UnsupportedAlgorithm(_)));
    }

    #[test]
    fn empty_cipher_oid_is_invalid() {
        let suite = AlgorithmSuite::new(constants::SHA256_OID, "");
        let err = AlgorithmResolver::default().resolve_suite(&suite).unwrap_err();
        assert!(matches!(err, SigningError::InvalidAlgorithmIdentifier(_)));
    }
}
