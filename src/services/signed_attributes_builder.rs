//! Service for constructing the ordered signed attribute set.
//!
//! Phase one of a signature: validates caller input, resolves the suite,
//! generates the five attributes and encodes them as the DER SET that the
//! external signer signs over.

use crate::domain::algorithm::AlgorithmSuite;
use crate::domain::crypto::{DigestBytes, SignerCertificate};
use crate::domain::pkcs7::{AttributeOrdering, SignedAttributeSet};
use crate::domain::policy::SignaturePolicy;
use crate::domain::time::SigningTime;
use crate::infra::config::SignerConfiguration;
use crate::infra::error::{SigningError, SigningResult};
use crate::services::algorithm_resolver::AlgorithmResolver;
use crate::services::attribute_generator::{
    AttributeRequest, CadesBesAttributeGenerator, SignedAttributeGenerator,
};
use crate::services::der_serializer;

/// Output of the attribute build process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedAttributesOutput {
    /// Structured five-slot set with its algorithm identifiers.
    pub set: SignedAttributeSet,
    /// DER `SET OF Attribute` to be signed.
    pub der: Vec<u8>,
    /// Order the SET was written in; phase two must embed the same order.
    pub ordering: AttributeOrdering,
    /// Document digest carried by the message-digest attribute.
    pub digest: DigestBytes,
}

pub struct SignedAttributesBuilder<G = CadesBesAttributeGenerator> {
    resolver: AlgorithmResolver,
    generator: G,
    ordering: AttributeOrdering,
}

impl Default for SignedAttributesBuilder {
    fn default() -> Self {
        Self::new(AlgorithmResolver::default(), AttributeOrdering::default())
    }
}

impl SignedAttributesBuilder {
    #[must_use]
    pub fn new(resolver: AlgorithmResolver, ordering: AttributeOrdering) -> Self {
        Self::with_generator(resolver, ordering, CadesBesAttributeGenerator::new())
    }

    /// Builder using the configured signature mode and attribute order.
    #[must_use]
    pub fn from_config(config: &SignerConfiguration) -> Self {
        Self::new(
            AlgorithmResolver::new(config.signature_algorithm_mode),
            config.attribute_ordering,
        )
    }
}

impl<G: SignedAttributeGenerator> SignedAttributesBuilder<G> {
    #[must_use]
    pub fn with_generator(
        resolver: AlgorithmResolver,
        ordering: AttributeOrdering,
        generator: G,
    ) -> Self {
        Self {
            resolver,
            generator,
            ordering,
        }
    }

    #[must_use]
    pub fn ordering(&self) -> AttributeOrdering {
        self.ordering
    }

    #[must_use]
    pub fn resolver(&self) -> &AlgorithmResolver {
        &self.resolver
    }

    /// Build the signed attribute set. Deterministic; never reads the clock.
    pub fn build(
        &self,
        certificate: &SignerCertificate,
        digest: &[u8],
        suite: &AlgorithmSuite,
        policy: &SignaturePolicy,
        signing_time: SigningTime,
    ) -> SigningResult<SignedAttributesOutput> {
        validate_inputs(digest, policy)?;

        let resolved = self.resolver.resolve_suite(suite)?;
        let digest = DigestBytes::new(resolved.hash, digest.to_vec())?;

        let request = AttributeRequest {
            certificate,
            digest: &digest,
            policy,
            signing_time,
            hash: resolved.hash,
        };
        let slots = self.generator.generate(&request)?;
        let set = SignedAttributeSet::from_slots(
            slots,
            resolved.digest_algorithm,
            resolved.signature_algorithm,
        )?;

        let der = der_serializer::serialize_set(&set.arranged(self.ordering)?)?;
        log::debug!(
            "signed attributes for {:?}: {} bytes ({:?} order)",
            certificate,
            der.len(),
            self.ordering
        );

        Ok(SignedAttributesOutput {
            set,
            der,
            ordering: self.ordering,
            digest,
        })
    }
}

fn validate_inputs(digest: &[u8], policy: &SignaturePolicy) -> SigningResult<()> {
    if digest.is_empty() {
        return Err(SigningError::MissingInput("document digest is empty".into()));
    }
    if policy.oid().trim().is_empty() {
        return Err(SigningError::MissingInput("policy identifier is empty".into()));
    }
    if policy.hash_algorithm_oid().trim().is_empty() {
        return Err(SigningError::MissingInput(
            "policy hash algorithm is empty".into(),
        ));
    }
    if policy.hash().is_empty() {
        return Err(SigningError::MissingInput("policy hash is empty".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::algorithm::SignerAlgorithm;
    use crate::domain::constants;

    const SIGNER_PEM: &[u8] = include_bytes!("../../tests/fixtures/signer.pem");

    fn builder() -> SignedAttributesBuilder {
        SignedAttributesBuilder::default()
    }

    fn policy() -> SignaturePolicy {
        SignaturePolicy::new("2.16.76.1.7.1.1.2.3", constants::SHA256_OID, vec![0x11; 32])
    }

    #[test]
    fn builds_set_tagged_as_der_set() {
        let cert = SignerCertificate::from_pem(SIGNER_PEM).unwrap();
        let out = builder()
            .build(
                &cert,
                &[0u8; 32],
                &SignerAlgorithm::Sha256WithRsa.suite(),
                &policy(),
                SigningTime::from_unix_seconds(1_700_000_000),
            )
            .unwrap();
        assert_eq!(out.der[0], 0x31);
        assert_eq!(out.ordering, AttributeOrdering::Fixed);
        assert_eq!(out.digest.as_slice(), &[0u8; 32]);
    }

    #[test]
    fn empty_inputs_are_missing_input() {
        let cert = SignerCertificate::from_pem(SIGNER_PEM).unwrap();
        let builder = builder();
        let suite = SignerAlgorithm::Sha256WithRsa.suite();
        let time = SigningTime::from_unix_seconds(0);

        let err = builder.build(&cert, &[], &suite, &policy(), time).unwrap_err();
        assert!(matches!(err, SigningError::MissingInput(_)));

        let empty_policy = SignaturePolicy::new("", constants::SHA256_OID, vec![1]);
        let err = builder
            .build(&cert, &[0; 32], &suite, &empty_policy, time)
            .unwrap_err();
        assert!(matches!(err, SigningError::MissingInput(_)));

        let no_hash = SignaturePolicy::new("1.2.3", constants::SHA256_OID, Vec::new());
        let err = builder.build(&cert, &[0; 32], &suite, &no_hash, time).unwrap_err();
        assert!(matches!(err, SigningError::MissingInput(_)));
    }

    #[test]
    fn digest_length_must_match_suite() {
        let cert = SignerCertificate::from_pem(SIGNER_PEM).unwrap();
        let err = builder()
            .build(
                &cert,
                &[0u8; 32],
                &SignerAlgorithm::Sha512WithRsa.suite(),
                &policy(),
                SigningTime::from_unix_seconds(0),
            )
            .unwrap_err();
        assert!(matches!(err, SigningError::InvalidDigest(_)));
    }
}
