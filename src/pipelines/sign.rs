//! `CadesSignWorkflow` orchestrates the two signing phases.
//!
//! Phase one builds the signed attributes, the external
//! [`SignatureProvider`] signs their DER, and phase two wraps everything
//! into the envelope. The attribute set is built once, so the bytes signed
//! and the bytes embedded are the same.

use std::sync::Arc;

use spki::AlgorithmIdentifierOwned;

use crate::domain::algorithm::AlgorithmSuite;
use crate::domain::crypto::{RawSignature, SignerCertificate};
use crate::domain::pkcs7::CadesEnvelope;
use crate::domain::policy::SignaturePolicy;
use crate::domain::time::SigningTime;
use crate::infra::context::SignerContext;
use crate::infra::error::SigningResult;
use crate::services::envelope_builder::EnvelopeBuilder;
use crate::services::signed_attributes_builder::SignedAttributesOutput;

/// External producer of the raw signature value.
pub trait SignatureProvider {
    /// Sign the DER `SET OF Attribute` with `algorithm`.
    fn sign(
        &self,
        signed_attributes: &[u8],
        algorithm: &AlgorithmIdentifierOwned,
    ) -> SigningResult<RawSignature>;
}

impl<F> SignatureProvider for F
where
    F: Fn(&[u8], &AlgorithmIdentifierOwned) -> SigningResult<RawSignature>,
{
    fn sign(
        &self,
        signed_attributes: &[u8],
        algorithm: &AlgorithmIdentifierOwned,
    ) -> SigningResult<RawSignature> {
        self(signed_attributes, algorithm)
    }
}

/// Inputs of one signature.
#[derive(Debug, Clone)]
pub struct SignRequest {
    pub certificate: SignerCertificate,
    pub digest: Vec<u8>,
    pub suite: AlgorithmSuite,
    pub policy: SignaturePolicy,
    pub signing_time: SigningTime,
}

/// Both phase outputs of a completed signature.
#[derive(Debug, Clone)]
pub struct SignOutcome {
    pub attributes: SignedAttributesOutput,
    pub signature: RawSignature,
    pub envelope: CadesEnvelope,
}

pub struct CadesSignWorkflow {
    envelope: EnvelopeBuilder,
}

impl CadesSignWorkflow {
    #[must_use]
    pub fn new(context: Arc<SignerContext>) -> Self {
        Self {
            envelope: EnvelopeBuilder::new(context),
        }
    }

    /// Phase one only.
    pub fn prepare(&self, request: &SignRequest) -> SigningResult<SignedAttributesOutput> {
        self.envelope.attributes_builder().build(
            &request.certificate,
            &request.digest,
            &request.suite,
            &request.policy,
            request.signing_time,
        )
    }

    /// Phase two from a previously prepared attribute set.
    pub fn complete(
        &self,
        request: &SignRequest,
        attributes: &SignedAttributesOutput,
        signature: &RawSignature,
    ) -> SigningResult<CadesEnvelope> {
        self.envelope
            .assemble(attributes, &request.certificate, signature)
    }

    pub fn sign(
        &self,
        request: &SignRequest,
        provider: &dyn SignatureProvider,
    ) -> SigningResult<SignOutcome> {
        log::info!(
            "signing with suite {} for {:?}",
            request.suite,
            request.certificate
        );
        let attributes = self.prepare(request)?;
        let signature = provider.sign(&attributes.der, attributes.set.signature_algorithm())?;
        log::debug!("external signature: {} bytes", signature.len());
        let envelope = self.complete(request, &attributes, &signature)?;
        Ok(SignOutcome {
            attributes,
            signature,
            envelope,
        })
    }
}
