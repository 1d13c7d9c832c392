//! CAdES-BES signed attribute generation.
//!
//! A [`SignedAttributeGenerator`] fills the five attribute slots; the
//! builder then checks that every slot is present and fixes the order.

use der::asn1::{ObjectIdentifier, OctetString, SetOfVec};
use der::{Any, EncodeValue, Tagged};
use spki::AlgorithmIdentifierOwned;
use x509_cert::attr::Attribute;
use x509_cert::ext::pkix::name::GeneralName;

use crate::domain::constants;
use crate::domain::crypto::{DigestBytes, HashAlgorithm, SignerCertificate};
use crate::domain::pkcs7::cades::{
    EssCertIdV2, IssuerSerial, OtherHashAlgAndValue, SigPolicyQualifierInfo, SignaturePolicyId,
    SigningCertificateV2,
};
use crate::domain::pkcs7::AttributeSlots;
use crate::domain::policy::SignaturePolicy;
use crate::domain::time::SigningTime;
use crate::infra::error::{SigningError, SigningResult};
use crate::services::algorithm_resolver;

/// Everything a generator needs for one attribute set.
#[derive(Debug, Clone, Copy)]
pub struct AttributeRequest<'a> {
    pub certificate: &'a SignerCertificate,
    pub digest: &'a DigestBytes,
    pub policy: &'a SignaturePolicy,
    pub signing_time: SigningTime,
    /// Hash of the resolved suite; drives the signing-certificate-v2 hash.
    pub hash: HashAlgorithm,
}

pub trait SignedAttributeGenerator: Send + Sync {
    fn generate(&self, request: &AttributeRequest<'_>) -> SigningResult<AttributeSlots>;
}

/// Produces content-type, signing-time, message-digest,
/// signature-policy-identifier and signing-certificate-v2.
#[derive(Debug, Clone, Copy, Default)]
pub struct CadesBesAttributeGenerator;

impl CadesBesAttributeGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Attributes derived from certificate, digest and policy.
    pub fn base_attributes(&self, request: &AttributeRequest<'_>) -> SigningResult<AttributeSlots> {
        Ok(AttributeSlots {
            content_type: Some(content_type_attribute()?),
            signing_time: None,
            message_digest: Some(message_digest_attribute(request.digest)?),
            signature_policy: Some(signature_policy_attribute(request.policy)?),
            signing_certificate: Some(signing_certificate_attribute(
                request.certificate,
                request.hash,
            )?),
        })
    }
}

impl SignedAttributeGenerator for CadesBesAttributeGenerator {
    fn generate(&self, request: &AttributeRequest<'_>) -> SigningResult<AttributeSlots> {
        let mut slots = self.base_attributes(request)?;
        slots.signing_time = Some(signing_time_attribute(request.signing_time)?);
        Ok(slots)
    }
}

/// Single-valued attribute.
pub fn single_value_attribute<T: Tagged + EncodeValue>(
    oid: ObjectIdentifier,
    value: &T,
) -> SigningResult<Attribute> {
    let value = Any::encode_from(value)?;
    let values = SetOfVec::try_from(vec![value])?;
    Ok(Attribute { oid, values })
}

pub fn content_type_attribute() -> SigningResult<Attribute> {
    single_value_attribute(constants::ID_CONTENT_TYPE, &constants::ID_DATA)
}

pub fn signing_time_attribute(signing_time: SigningTime) -> SigningResult<Attribute> {
    single_value_attribute(constants::ID_SIGNING_TIME, &signing_time.to_time()?)
}

pub fn message_digest_attribute(digest: &DigestBytes) -> SigningResult<Attribute> {
    let value = OctetString::new(digest.as_slice().to_vec())?;
    single_value_attribute(constants::ID_MESSAGE_DIGEST, &value)
}

pub fn signature_policy_attribute(policy: &SignaturePolicy) -> SigningResult<Attribute> {
    let sig_policy_id = ObjectIdentifier::new(policy.oid().trim()).map_err(|e| {
        SigningError::InvalidAlgorithmIdentifier(format!(
            "policy identifier '{}' is not an OID: {e}",
            policy.oid()
        ))
    })?;
    let sig_policy_qualifiers = match policy.uri() {
        Some(uri) => Some(vec![SigPolicyQualifierInfo::spuri(uri).map_err(|e| {
            SigningError::Serialization(format!("policy URI is not IA5: {e}"))
        })?]),
        None => None,
    };
    let value = SignaturePolicyId {
        sig_policy_id,
        sig_policy_hash: OtherHashAlgAndValue {
            hash_algorithm: algorithm_resolver::resolve(policy.hash_algorithm_oid())?,
            hash_value: OctetString::new(policy.hash().to_vec())?,
        },
        sig_policy_qualifiers,
    };
    single_value_attribute(constants::ID_AA_ETS_SIG_POLICY_ID, &value)
}

/// ESSCertIDv2 binding `certificate` by its `hash` digest and issuer/serial.
pub fn signing_certificate_attribute(
    certificate: &SignerCertificate,
    hash: HashAlgorithm,
) -> SigningResult<Attribute> {
    // id-sha256 is the DEFAULT and must be omitted.
    let hash_algorithm = match hash {
        HashAlgorithm::Sha256 => None,
        other => Some(AlgorithmIdentifierOwned {
            oid: ObjectIdentifier::new(other.oid())?,
            parameters: None,
        }),
    };
    let cert_id = EssCertIdV2 {
        hash_algorithm,
        cert_hash: OctetString::new(hash.digest(certificate.as_der()))?,
        issuer_serial: Some(IssuerSerial {
            issuer: vec![GeneralName::DirectoryName(certificate.issuer().clone())],
            serial_number: certificate.serial_number().clone(),
        }),
    };
    let value = SigningCertificateV2 {
        certs: vec![cert_id],
    };
    single_value_attribute(constants::ID_AA_SIGNING_CERTIFICATE_V2, &value)
}
