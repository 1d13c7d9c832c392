//! Shared fixtures for integration tests.
//!
//! `ca.pem` is a self-signed test root; `signer.pem`/`signer.der` is an RSA
//! signer certificate it issued (serial 0x1F2E3D4C).

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cades_signer::domain::pkcs7::AttributeSlots;
use cades_signer::services::{
    AttributeRequest, CadesBesAttributeGenerator, SignedAttributeGenerator,
};
use cades_signer::{
    AttributeOrdering, SignatureAlgorithmMode, SignaturePolicy, SignerAlgorithm,
    SignerCertificate, SignerConfiguration, SignerContext, SigningResult, SigningTime,
};

/// 2024-03-15T12:30:45Z
pub const FIXED_TIME: u64 = 1_710_505_845;

pub const POLICY_OID: &str = "2.16.76.1.7.1.1.2.3";
pub const POLICY_URI: &str = "http://politicas.icpbrasil.gov.br/PA_AD_RB_v2_3.der";
pub const SHA256_OID: &str = "2.16.840.1.101.3.4.2.1";

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

pub fn fixture_bytes(name: &str) -> Vec<u8> {
    std::fs::read(fixtures_dir().join(name)).expect("fixture readable")
}

pub fn signer_cert() -> SignerCertificate {
    SignerCertificate::from_pem(&fixture_bytes("signer.pem")).expect("signer fixture")
}

pub fn ca_cert() -> SignerCertificate {
    SignerCertificate::from_pem(&fixture_bytes("ca.pem")).expect("CA fixture")
}

pub fn policy() -> SignaturePolicy {
    let hash = hex::decode("ddc8bf1e4ff2b8b9d2bb5b2a86ef36a1c7c1e3fbbd3bd0cbe7e1b6fb5a7a0f09")
        .expect("hex");
    SignaturePolicy::new(POLICY_OID, SHA256_OID, hash).with_uri(POLICY_URI)
}

pub fn fixed_time() -> SigningTime {
    SigningTime::from_unix_seconds(FIXED_TIME)
}

pub fn zero_digest() -> Vec<u8> {
    vec![0u8; 32]
}

pub fn rsa_suite() -> cades_signer::AlgorithmSuite {
    SignerAlgorithm::Sha256WithRsa.suite()
}

pub fn config(ordering: AttributeOrdering, ca_cache_enabled: bool) -> SignerConfiguration {
    SignerConfiguration {
        default_algorithm: SignerAlgorithm::Sha256WithRsa,
        signature_algorithm_mode: SignatureAlgorithmMode::FromSuite,
        attribute_ordering: ordering,
        ca_cache_enabled,
        ca_bundle_path: None,
    }
}

/// Context without CA caching: the certificate store holds the signer only.
pub fn signer_only_context(ordering: AttributeOrdering) -> Arc<SignerContext> {
    Arc::new(
        SignerContext::with_ca_certificates(config(ordering, false), vec![ca_cert()])
            .expect("context"),
    )
}

/// Context with the test root cached.
pub fn cached_ca_context(ordering: AttributeOrdering) -> Arc<SignerContext> {
    Arc::new(
        SignerContext::with_ca_certificates(config(ordering, true), vec![ca_cert()])
            .expect("context"),
    )
}

/// Generator that produces the standard attributes, then empties one slot.
#[derive(Clone, Copy)]
pub struct DropsSlot(pub fn(&mut AttributeSlots));

impl SignedAttributeGenerator for DropsSlot {
    fn generate(&self, request: &AttributeRequest<'_>) -> SigningResult<AttributeSlots> {
        let mut slots = CadesBesAttributeGenerator::new().generate(request)?;
        (self.0)(&mut slots);
        Ok(slots)
    }
}

/// Each slot name paired with a generator that leaves that slot empty.
pub fn slot_droppers() -> [(&'static str, DropsSlot); 5] {
    [
        ("content-type", DropsSlot(|s| s.content_type = None)),
        ("signing-time", DropsSlot(|s| s.signing_time = None)),
        ("message-digest", DropsSlot(|s| s.message_digest = None)),
        (
            "signature-policy-identifier",
            DropsSlot(|s| s.signature_policy = None),
        ),
        (
            "signing-certificate-v2",
            DropsSlot(|s| s.signing_certificate = None),
        ),
    ]
}
