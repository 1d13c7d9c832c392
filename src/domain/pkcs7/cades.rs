//! ASN.1 value types of the CAdES / ESS signed attributes.
//!
//! ```text
//! SignaturePolicyId ::= SEQUENCE {
//!     sigPolicyId           SigPolicyId,
//!     sigPolicyHash         SigPolicyHash,
//!     sigPolicyQualifiers   SEQUENCE SIZE (1..MAX) OF SigPolicyQualifierInfo OPTIONAL }
//!
//! OtherHashAlgAndValue ::= SEQUENCE {
//!     hashAlgorithm   AlgorithmIdentifier,
//!     hashValue       OCTET STRING }
//!
//! SigningCertificateV2 ::= SEQUENCE {
//!     certs        SEQUENCE OF ESSCertIDv2,
//!     policies     SEQUENCE OF PolicyInformation OPTIONAL }
//!
//! ESSCertIDv2 ::= SEQUENCE {
//!     hashAlgorithm   AlgorithmIdentifier DEFAULT {algorithm id-sha256},
//!     certHash        OCTET STRING,
//!     issuerSerial    IssuerSerial OPTIONAL }
//!
//! IssuerSerial ::= SEQUENCE {
//!     issuer         GeneralNames,
//!     serialNumber   CertificateSerialNumber }
//! ```
//!
//! The signature-policy-identifier attribute value is the `signaturePolicyId`
//! alternative of the `SignaturePolicyIdentifier` CHOICE; the
//! `signaturePolicyImplied` NULL alternative is never produced.

use der::asn1::{Any, Ia5String, ObjectIdentifier, OctetString};
use der::Sequence;
use spki::AlgorithmIdentifierOwned;
use x509_cert::ext::pkix::name::GeneralNames;
use x509_cert::serial_number::SerialNumber;

#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct OtherHashAlgAndValue {
    pub hash_algorithm: AlgorithmIdentifierOwned,
    pub hash_value: OctetString,
}

#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct SigPolicyQualifierInfo {
    pub sig_policy_qualifier_id: ObjectIdentifier,
    pub qualifier: Any,
}

impl SigPolicyQualifierInfo {
    /// SPURI qualifier carrying the policy document location.
    pub fn spuri(uri: &str) -> der::Result<Self> {
        Ok(Self {
            sig_policy_qualifier_id: crate::domain::constants::ID_SPQ_ETS_URI,
            qualifier: Any::encode_from(&Ia5String::new(uri)?)?,
        })
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct SignaturePolicyId {
    pub sig_policy_id: ObjectIdentifier,
    pub sig_policy_hash: OtherHashAlgAndValue,
    #[asn1(optional = "true")]
    pub sig_policy_qualifiers: Option<Vec<SigPolicyQualifierInfo>>,
}

#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct IssuerSerial {
    pub issuer: GeneralNames,
    pub serial_number: SerialNumber,
}

/// `hash_algorithm` is `None` for SHA-256: DER omits a DEFAULT value.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct EssCertIdV2 {
    #[asn1(optional = "true")]
    pub hash_algorithm: Option<AlgorithmIdentifierOwned>,
    pub cert_hash: OctetString,
    #[asn1(optional = "true")]
    pub issuer_serial: Option<IssuerSerial>,
}

#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct SigningCertificateV2 {
    pub certs: Vec<EssCertIdV2>,
}
