//! CAdES-BES Signer Library
//!
//! Builds the signed attributes of a CAdES-BES signature and the detached
//! CMS `SignedData` envelope around an externally computed signature.
//! Signature computation, key handling and document hashing stay with the
//! caller.

pub mod domain;
pub mod infra;
pub mod pipelines;
pub mod services;

use std::sync::Arc;

pub use domain::algorithm::{AlgorithmSuite, SignatureAlgorithmMode, SignerAlgorithm};
pub use domain::crypto::{DigestBytes, HashAlgorithm, RawSignature, SignerCertificate};
pub use domain::pkcs7::{AttributeOrdering, CadesEnvelope, SignedAttributeSet};
pub use domain::policy::SignaturePolicy;
pub use domain::time::SigningTime;
pub use infra::config::{ConfigManager, SignerConfiguration};
pub use infra::context::{CertificateAuthorityCache, SignerContext};
pub use infra::error::{SigningError, SigningResult};
pub use pipelines::{CadesSignWorkflow, SignRequest, SignatureProvider};
pub use services::{EnvelopeBuilder, SignedAttributesBuilder, SignedAttributesOutput};

/// Phase one from raw inputs: DER `SET OF Attribute` to be signed.
///
/// `certificate` may be DER or PEM.
pub fn produce_signed_attributes(
    context: &SignerContext,
    certificate: &[u8],
    digest: &[u8],
    suite: &AlgorithmSuite,
    policy: &SignaturePolicy,
    signing_time: SigningTime,
) -> SigningResult<Vec<u8>> {
    let certificate = SignerCertificate::load(certificate)?;
    let output = SignedAttributesBuilder::from_config(context.config()).build(
        &certificate,
        digest,
        suite,
        policy,
        signing_time,
    )?;
    Ok(output.der)
}

/// Phase two from raw inputs: DER `ContentInfo` holding the `SignedData`.
///
/// Rebuilds the attribute set from the same inputs, so it must be called
/// with exactly what was passed to [`produce_signed_attributes`].
pub fn produce_envelope(
    context: Arc<SignerContext>,
    certificate: &[u8],
    digest: &[u8],
    suite: &AlgorithmSuite,
    policy: &SignaturePolicy,
    signing_time: SigningTime,
    signature: &[u8],
) -> SigningResult<Vec<u8>> {
    let certificate = SignerCertificate::load(certificate)?;
    let signature = RawSignature::new(signature.to_vec())?;
    let envelope = EnvelopeBuilder::new(context).build(
        &certificate,
        digest,
        suite,
        policy,
        signing_time,
        &signature,
    )?;
    Ok(envelope.into_der())
}
