//! CAdES-BES envelope assembly.
//!
//! Phase two of a signature: wraps the phase-one attribute set, the raw
//! signature and the certificates into a detached CMS `SignedData` inside a
//! `ContentInfo`, serialized to DER.

use std::sync::Arc;

use cms::cert::{CertificateChoices, IssuerAndSerialNumber};
use cms::content_info::{CmsVersion, ContentInfo};
use cms::signed_data::{
    CertificateSet, DigestAlgorithmIdentifiers, EncapsulatedContentInfo, SignerIdentifier,
};
use der::asn1::OctetString;
use der::{Any, Decode, Encode};

use crate::domain::algorithm::AlgorithmSuite;
use crate::domain::constants;
use crate::domain::crypto::{HashAlgorithm, RawSignature, SignerCertificate};
use crate::domain::pkcs7::cades::SigningCertificateV2;
use crate::domain::pkcs7::{
    CadesEnvelope, CadesSignedData, CadesSignerInfo, SignedAttributeSet, SignerInformation,
    SignerInformationStore,
};
use crate::domain::policy::SignaturePolicy;
use crate::domain::time::SigningTime;
use crate::infra::context::SignerContext;
use crate::infra::error::{SigningError, SigningResult};
use crate::services::algorithm_resolver::AlgorithmResolver;
use crate::services::attribute_generator::{CadesBesAttributeGenerator, SignedAttributeGenerator};
use crate::services::signed_attributes_builder::{SignedAttributesBuilder, SignedAttributesOutput};

pub struct EnvelopeBuilder<G = CadesBesAttributeGenerator> {
    context: Arc<SignerContext>,
    attributes: SignedAttributesBuilder<G>,
}

impl EnvelopeBuilder {
    /// Builder configured from the context's signature mode and ordering.
    #[must_use]
    pub fn new(context: Arc<SignerContext>) -> Self {
        Self::with_generator(context, CadesBesAttributeGenerator::new())
    }
}

impl<G: SignedAttributeGenerator> EnvelopeBuilder<G> {
    #[must_use]
    pub fn with_generator(context: Arc<SignerContext>, generator: G) -> Self {
        let config = context.config();
        let attributes = SignedAttributesBuilder::with_generator(
            AlgorithmResolver::new(config.signature_algorithm_mode),
            config.attribute_ordering,
            generator,
        );
        Self {
            context,
            attributes,
        }
    }

    /// Phase-one builder sharing this envelope's configuration.
    #[must_use]
    pub fn attributes_builder(&self) -> &SignedAttributesBuilder<G> {
        &self.attributes
    }

    #[must_use]
    pub fn context(&self) -> &SignerContext {
        &self.context
    }

    /// Build the complete envelope: re-runs phase one, then assembles.
    pub fn build(
        &self,
        certificate: &SignerCertificate,
        digest: &[u8],
        suite: &AlgorithmSuite,
        policy: &SignaturePolicy,
        signing_time: SigningTime,
        signature: &RawSignature,
    ) -> SigningResult<CadesEnvelope> {
        let attributes = self
            .attributes
            .build(certificate, digest, suite, policy, signing_time)?;
        self.assemble(&attributes, certificate, signature)
    }

    /// Assemble an envelope from an existing phase-one output.
    ///
    /// `certificate` must be the one bound by the set's
    /// signing-certificate-v2 attribute.
    pub fn assemble(
        &self,
        attributes: &SignedAttributesOutput,
        certificate: &SignerCertificate,
        signature: &RawSignature,
    ) -> SigningResult<CadesEnvelope> {
        ensure_bound_certificate(&attributes.set, certificate)?;
        let signed_attrs = attributes.set.to_attributes(attributes.ordering)?;
        let signer_info = CadesSignerInfo {
            version: CmsVersion::V1,
            sid: signer_identifier(certificate)?,
            digest_alg: attributes.set.digest_algorithm().clone(),
            signed_attrs: Some(signed_attrs),
            signature_algorithm: attributes.set.signature_algorithm().clone(),
            signature: OctetString::new(signature.as_slice().to_vec()).map_err(|e| {
                SigningError::EnvelopeConstruction(format!("Failed to wrap signature: {e}"))
            })?,
        };

        let certificates = self.certificate_store(certificate)?;
        let signers = SignerInformationStore::single(SignerInformation::new(
            signer_info,
            constants::ID_DATA,
            None,
            attributes.digest.as_slice().to_vec(),
        ));

        let der = build_signed_data(
            attributes.set.digest_algorithm().clone(),
            certificates,
            &signers,
        )?;
        log::info!(
            "assembled CAdES-BES envelope: {} bytes, {} signer(s)",
            der.len(),
            signers.len()
        );
        Ok(CadesEnvelope::from_der(der))
    }

    /// Signer certificate followed by its cached issuer chain, without
    /// duplicates.
    pub fn certificate_store(&self, certificate: &SignerCertificate) -> SigningResult<CertificateSet> {
        let chain = self.context.ca_cache().chain_for(certificate).map_err(|e| {
            log::error!("Failed to collect issuer chain: {e}");
            e
        })?;

        let mut members: Vec<&SignerCertificate> = vec![certificate];
        for ca in &chain {
            if !members.contains(&ca) {
                members.push(ca);
            }
        }
        let choices = members
            .iter()
            .map(|c| CertificateChoices::Certificate(c.certificate().clone()))
            .collect::<Vec<_>>();

        let store = CertificateSet::try_from(choices).map_err(|e| {
            log::error!("Failed to add certificates to store: {e}");
            SigningError::CertificateStore(format!("Failed to build certificate store: {e}"))
        })?;
        log::debug!("certificate store holds {} certificate(s)", members.len());
        Ok(store)
    }
}

/// `IssuerAndSerialNumber` of the signer.
pub fn signer_identifier(certificate: &SignerCertificate) -> SigningResult<SignerIdentifier> {
    let sid = SignerIdentifier::IssuerAndSerialNumber(IssuerAndSerialNumber {
        issuer: certificate.issuer().clone(),
        serial_number: certificate.serial_number().clone(),
    });
    sid.to_der().map_err(|e| {
        SigningError::CertificateEncoding(format!("Failed to encode signer identifier: {e}"))
    })?;
    Ok(sid)
}

/// Check `certificate` against the ESSCertIDv2 hash in the attribute set.
fn ensure_bound_certificate(
    set: &SignedAttributeSet,
    certificate: &SignerCertificate,
) -> SigningResult<()> {
    let unreadable = |e: der::Error| {
        SigningError::CertificateEncoding(format!("Failed to read signing-certificate-v2: {e}"))
    };
    let value = set.signing_certificate().values.get(0).ok_or_else(|| {
        SigningError::CertificateEncoding("signing-certificate-v2 has no value".to_string())
    })?;
    let bound =
        SigningCertificateV2::from_der(&value.to_der().map_err(unreadable)?).map_err(unreadable)?;
    let cert_id = bound.certs.first().ok_or_else(|| {
        SigningError::CertificateEncoding("signing-certificate-v2 lists no certificate".to_string())
    })?;

    let hash = match &cert_id.hash_algorithm {
        None => HashAlgorithm::Sha256,
        Some(alg) => HashAlgorithm::from_oid(&alg.oid.to_string()).ok_or_else(|| {
            SigningError::CertificateEncoding(format!("unsupported certificate hash {}", alg.oid))
        })?,
    };
    if hash.digest(certificate.as_der()).as_slice() != cert_id.cert_hash.as_bytes() {
        log::error!("certificate {certificate:?} is not the one bound by the signed attributes");
        return Err(SigningError::CertificateEncoding(
            "certificate does not match the signing-certificate-v2 attribute".to_string(),
        ));
    }
    Ok(())
}

fn build_signed_data(
    digest_algorithm: spki::AlgorithmIdentifierOwned,
    certificates: CertificateSet,
    signers: &SignerInformationStore,
) -> SigningResult<Vec<u8>> {
    let construction =
        |e: der::Error| SigningError::EnvelopeConstruction(format!("Failed to build SignedData: {e}"));

    let signed_data = CadesSignedData {
        version: CmsVersion::V1,
        digest_algorithms: DigestAlgorithmIdentifiers::try_from(vec![digest_algorithm])
            .map_err(construction)?,
        encap_content_info: EncapsulatedContentInfo {
            econtent_type: constants::ID_DATA,
            econtent: None,
        },
        certificates: Some(certificates),
        signer_infos: signers.to_signer_infos(),
    };
    let content_info = ContentInfo {
        content_type: constants::ID_SIGNED_DATA,
        content: Any::encode_from(&signed_data).map_err(construction)?,
    };
    content_info.to_der().map_err(construction)
}
