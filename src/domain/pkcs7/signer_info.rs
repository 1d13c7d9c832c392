//! SignerInfo and SignedData records with insertion-ordered SETs.
//!
//! ```text
//! SignerInfo ::= SEQUENCE {
//!     version CMSVersion,
//!     sid SignerIdentifier,
//!     digestAlgorithm DigestAlgorithmIdentifier,
//!     signedAttrs [0] IMPLICIT SignedAttributes OPTIONAL,
//!     signatureAlgorithm SignatureAlgorithmIdentifier,
//!     signature SignatureValue,
//!     unsignedAttrs [1] IMPLICIT UnsignedAttributes OPTIONAL }
//!
//! SignedData ::= SEQUENCE {
//!     version CMSVersion,
//!     digestAlgorithms SET OF DigestAlgorithmIdentifier,
//!     encapContentInfo EncapsulatedContentInfo,
//!     certificates [0] IMPLICIT CertificateSet OPTIONAL,
//!     crls [1] IMPLICIT RevocationInfoChoices OPTIONAL,
//!     signerInfos SET OF SignerInfo }
//! ```
//!
//! The `cms` crate types carry `SetOfVec`, which re-sorts signed attributes;
//! these mirror them with [`OrderedSetOf`] so the embedded `signedAttrs` are
//! the exact bytes that were signed. Unsigned attributes and CRLs are never
//! produced and are left out of the records.

use std::fmt;

use cms::content_info::CmsVersion;
use cms::signed_data::{
    CertificateSet, DigestAlgorithmIdentifiers, EncapsulatedContentInfo, SignerIdentifier,
};
use der::asn1::{ObjectIdentifier, OctetString};
use der::Sequence;
use spki::AlgorithmIdentifierOwned;

use super::attributes::SignedAttributes;
use super::ordered_set::OrderedSetOf;

#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct CadesSignerInfo {
    pub version: CmsVersion,
    pub sid: SignerIdentifier,
    pub digest_alg: AlgorithmIdentifierOwned,
    #[asn1(
        context_specific = "0",
        tag_mode = "IMPLICIT",
        constructed = "true",
        optional = "true"
    )]
    pub signed_attrs: Option<SignedAttributes>,
    pub signature_algorithm: AlgorithmIdentifierOwned,
    pub signature: OctetString,
}

#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct CadesSignedData {
    pub version: CmsVersion,
    pub digest_algorithms: DigestAlgorithmIdentifiers,
    pub encap_content_info: EncapsulatedContentInfo,
    #[asn1(
        context_specific = "0",
        tag_mode = "IMPLICIT",
        constructed = "true",
        optional = "true"
    )]
    pub certificates: Option<CertificateSet>,
    pub signer_infos: OrderedSetOf<CadesSignerInfo>,
}

/// One signer's record together with what it signs over.
///
/// `content` is `None` for detached signatures; `result_digest` is the
/// precomputed document digest the message-digest attribute carries.
#[derive(Clone, PartialEq, Eq)]
pub struct SignerInformation {
    info: CadesSignerInfo,
    content_type: ObjectIdentifier,
    content: Option<Vec<u8>>,
    result_digest: Vec<u8>,
}

impl SignerInformation {
    #[must_use]
    pub fn new(
        info: CadesSignerInfo,
        content_type: ObjectIdentifier,
        content: Option<Vec<u8>>,
        result_digest: Vec<u8>,
    ) -> Self {
        Self {
            info,
            content_type,
            content,
            result_digest,
        }
    }

    #[must_use]
    pub fn signer_info(&self) -> &CadesSignerInfo {
        &self.info
    }
    #[must_use]
    pub fn content_type(&self) -> &ObjectIdentifier {
        &self.content_type
    }
    #[must_use]
    pub fn content(&self) -> Option<&[u8]> {
        self.content.as_deref()
    }
    #[must_use]
    pub fn result_digest(&self) -> &[u8] {
        &self.result_digest
    }
    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.content.is_none()
    }
    #[must_use]
    pub fn into_signer_info(self) -> CadesSignerInfo {
        self.info
    }
}

impl fmt::Debug for SignerInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SignerInformation(content_type={}, detached={}, digest_len={})",
            self.content_type,
            self.is_detached(),
            self.result_digest.len()
        )
    }
}

/// Signer records of one envelope, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignerInformationStore {
    signers: Vec<SignerInformation>,
}

impl SignerInformationStore {
    #[must_use]
    pub fn single(signer: SignerInformation) -> Self {
        Self {
            signers: vec![signer],
        }
    }

    pub fn push(&mut self, signer: SignerInformation) {
        self.signers.push(signer);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.signers.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, SignerInformation> {
        self.signers.iter()
    }

    /// `signerInfos` SET value for the SignedData.
    #[must_use]
    pub fn to_signer_infos(&self) -> OrderedSetOf<CadesSignerInfo> {
        OrderedSetOf::new(
            self.signers
                .iter()
                .map(|s| s.signer_info().clone())
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cms::cert::IssuerAndSerialNumber;
    use der::{Decode, Encode};
    use x509_cert::name::Name;
    use x509_cert::serial_number::SerialNumber;

    fn alg(oid: &str) -> AlgorithmIdentifierOwned {
        AlgorithmIdentifierOwned {
            oid: ObjectIdentifier::new_unwrap(oid),
            parameters: None,
        }
    }

    fn sample_info(signed_attrs: Option<SignedAttributes>) -> CadesSignerInfo {
        CadesSignerInfo {
            version: CmsVersion::V1,
            sid: SignerIdentifier::IssuerAndSerialNumber(IssuerAndSerialNumber {
                issuer: Name::default(),
                serial_number: SerialNumber::new(&[0x2a]).unwrap(),
            }),
            digest_alg: alg("2.16.840.1.101.3.4.2.1"),
            signed_attrs,
            signature_algorithm: alg("1.2.840.113549.1.1.11"),
            signature: OctetString::new(vec![0xAB; 4]).unwrap(),
        }
    }

    #[test]
    fn signed_attrs_use_constructed_context_tag() {
        let info = sample_info(Some(OrderedSetOf::new(Vec::new())));
        let der = info.to_der().unwrap();
        // [0] IMPLICIT SET, constructed, empty
        assert!(der.windows(2).any(|w| w == [0xA0, 0x00]));

        let decoded = CadesSignerInfo::from_der(&der).unwrap();
        assert_eq!(decoded, info);
    }

    #[test]
    fn absent_signed_attrs_are_omitted() {
        let info = sample_info(None);
        let decoded = CadesSignerInfo::from_der(&info.to_der().unwrap()).unwrap();
        assert!(decoded.signed_attrs.is_none());
    }

    #[test]
    fn store_keeps_single_signer() {
        let signer = SignerInformation::new(
            sample_info(None),
            crate::domain::constants::ID_DATA,
            None,
            vec![0; 32],
        );
        assert!(signer.is_detached());
        let store = SignerInformationStore::single(signer);
        assert_eq!(store.len(), 1);
        assert_eq!(store.to_signer_infos().len(), 1);
    }
}
