//! Signed attribute set of a CAdES-BES signature.
//!
//! The five mandatory attributes live in named slots, so the fixed order
//! content-type, signing-time, message-digest, signature-policy-identifier,
//! signing-certificate-v2 is a property of the type rather than of an
//! iteration order.

use std::fmt;

use der::Encode;
use serde::{Deserialize, Serialize};
use spki::AlgorithmIdentifierOwned;
use x509_cert::attr::Attribute;

use super::ordered_set::OrderedSetOf;
use crate::domain::constants;
use crate::infra::error::{SigningError, SigningResult};

/// `SignedAttributes ::= SET SIZE (1..MAX) OF Attribute`, insertion ordered.
pub type SignedAttributes = OrderedSetOf<Attribute>;

/// Order in which the five attributes are written into the SET.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttributeOrdering {
    /// Slot order, never re-sorted.
    #[default]
    Fixed,
    /// DER `SET OF` canonical order (ascending encodings).
    DerCanonical,
}

/// Attribute slots as produced by a generator; any slot may still be empty.
#[derive(Clone, Debug, Default)]
pub struct AttributeSlots {
    pub content_type: Option<Attribute>,
    pub signing_time: Option<Attribute>,
    pub message_digest: Option<Attribute>,
    pub signature_policy: Option<Attribute>,
    pub signing_certificate: Option<Attribute>,
}

impl AttributeSlots {
    /// Names of the slots that are still empty, in slot order.
    #[must_use]
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("content-type", self.content_type.is_none()),
            ("signing-time", self.signing_time.is_none()),
            ("message-digest", self.message_digest.is_none()),
            ("signature-policy-identifier", self.signature_policy.is_none()),
            ("signing-certificate-v2", self.signing_certificate.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect()
    }
}

/// Complete, immutable signed attribute set plus the algorithm identifiers
/// it was generated with.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedAttributeSet {
    content_type: Attribute,
    signing_time: Attribute,
    message_digest: Attribute,
    signature_policy: Attribute,
    signing_certificate: Attribute,
    digest_algorithm: AlgorithmIdentifierOwned,
    signature_algorithm: AlgorithmIdentifierOwned,
}

impl SignedAttributeSet {
    /// Fill the five slots; fails when any generator output is missing or
    /// carries an unexpected attribute type.
    pub fn from_slots(
        slots: AttributeSlots,
        digest_algorithm: AlgorithmIdentifierOwned,
        signature_algorithm: AlgorithmIdentifierOwned,
    ) -> SigningResult<Self> {
        let missing = slots.missing();
        if !missing.is_empty() {
            return Err(SigningError::IncompleteAttributeSet(format!(
                "missing {}",
                missing.join(", ")
            )));
        }
        let take = |slot: Option<Attribute>, name: &str| {
            slot.ok_or_else(|| SigningError::IncompleteAttributeSet(format!("missing {name}")))
        };
        let set = Self {
            content_type: take(slots.content_type, "content-type")?,
            signing_time: take(slots.signing_time, "signing-time")?,
            message_digest: take(slots.message_digest, "message-digest")?,
            signature_policy: take(slots.signature_policy, "signature-policy-identifier")?,
            signing_certificate: take(slots.signing_certificate, "signing-certificate-v2")?,
            digest_algorithm,
            signature_algorithm,
        };
        set.check_types()?;
        Ok(set)
    }

    fn check_types(&self) -> SigningResult<()> {
        let expected = [
            constants::ID_CONTENT_TYPE,
            constants::ID_SIGNING_TIME,
            constants::ID_MESSAGE_DIGEST,
            constants::ID_AA_ETS_SIG_POLICY_ID,
            constants::ID_AA_SIGNING_CERTIFICATE_V2,
        ];
        for (attr, oid) in self.ordered().into_iter().zip(expected) {
            if attr.oid != oid {
                return Err(SigningError::IncompleteAttributeSet(format!(
                    "expected attribute {oid}, found {}",
                    attr.oid
                )));
            }
            if attr.values.is_empty() {
                return Err(SigningError::IncompleteAttributeSet(format!(
                    "attribute {oid} has no value"
                )));
            }
        }
        Ok(())
    }

    /// The five attributes in slot order.
    #[must_use]
    pub fn ordered(&self) -> [&Attribute; 5] {
        [
            &self.content_type,
            &self.signing_time,
            &self.message_digest,
            &self.signature_policy,
            &self.signing_certificate,
        ]
    }

    /// The attributes as they are written into the SET for `ordering`.
    pub fn arranged(&self, ordering: AttributeOrdering) -> SigningResult<Vec<Attribute>> {
        let mut attrs: Vec<Attribute> = self.ordered().into_iter().cloned().collect();
        if ordering == AttributeOrdering::DerCanonical {
            let mut keyed = attrs
                .into_iter()
                .map(|attr| attr.to_der().map(|der| (der, attr)))
                .collect::<der::Result<Vec<_>>>()?;
            // Complete TLVs never prefix one another, so plain byte order
            // matches the X.690 SET OF comparison.
            keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
            attrs = keyed.into_iter().map(|(_, attr)| attr).collect();
        }
        Ok(attrs)
    }

    /// ASN.1 `Attributes` value for embedding as `signedAttrs`.
    pub fn to_attributes(&self, ordering: AttributeOrdering) -> SigningResult<SignedAttributes> {
        Ok(OrderedSetOf::new(self.arranged(ordering)?))
    }

    #[must_use]
    pub fn content_type(&self) -> &Attribute {
        &self.content_type
    }
    #[must_use]
    pub fn signing_time(&self) -> &Attribute {
        &self.signing_time
    }
    #[must_use]
    pub fn message_digest(&self) -> &Attribute {
        &self.message_digest
    }
    #[must_use]
    pub fn signature_policy(&self) -> &Attribute {
        &self.signature_policy
    }
    #[must_use]
    pub fn signing_certificate(&self) -> &Attribute {
        &self.signing_certificate
    }
    #[must_use]
    pub fn digest_algorithm(&self) -> &AlgorithmIdentifierOwned {
        &self.digest_algorithm
    }
    #[must_use]
    pub fn signature_algorithm(&self) -> &AlgorithmIdentifierOwned {
        &self.signature_algorithm
    }
}

impl fmt::Debug for SignedAttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let oids: Vec<String> = self.ordered().iter().map(|a| a.oid.to_string()).collect();
        write!(
            f,
            "SignedAttributeSet(attrs=[{}], digest_alg={}, sig_alg={})",
            oids.join(", "),
            self.digest_algorithm.oid,
            self.signature_algorithm.oid
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use der::asn1::{ObjectIdentifier, OctetString, SetOfVec};
    use der::Any;

    fn attr(oid: ObjectIdentifier, value: &[u8]) -> Attribute {
        Attribute {
            oid,
            values: SetOfVec::try_from(vec![
                Any::encode_from(&OctetString::new(value.to_vec()).unwrap()).unwrap()
            ])
            .unwrap(),
        }
    }

    fn alg(oid: &str) -> AlgorithmIdentifierOwned {
        AlgorithmIdentifierOwned {
            oid: ObjectIdentifier::new_unwrap(oid),
            parameters: None,
        }
    }

    fn full_slots() -> AttributeSlots {
        AttributeSlots {
            content_type: Some(attr(constants::ID_CONTENT_TYPE, &[1])),
            signing_time: Some(attr(constants::ID_SIGNING_TIME, &[2])),
            message_digest: Some(attr(constants::ID_MESSAGE_DIGEST, &[3; 40])),
            signature_policy: Some(attr(constants::ID_AA_ETS_SIG_POLICY_ID, &[4; 8])),
            signing_certificate: Some(attr(constants::ID_AA_SIGNING_CERTIFICATE_V2, &[5])),
        }
    }

    #[test]
    fn missing_slots_are_reported_in_order() {
        let mut slots = full_slots();
        slots.signing_time = None;
        slots.signing_certificate = None;
        assert_eq!(slots.missing(), vec!["signing-time", "signing-certificate-v2"]);

        let err = SignedAttributeSet::from_slots(
            slots,
            alg(constants::SHA256_OID),
            alg(constants::SHA256_WITH_RSA_OID),
        )
        .unwrap_err();
        assert!(matches!(err, SigningError::IncompleteAttributeSet(_)));
    }

    #[test]
    fn wrong_attribute_type_in_slot_is_rejected() {
        let mut slots = full_slots();
        slots.content_type = Some(attr(constants::ID_MESSAGE_DIGEST, &[1]));
        let err = SignedAttributeSet::from_slots(
            slots,
            alg(constants::SHA256_OID),
            alg(constants::SHA256_WITH_RSA_OID),
        )
        .unwrap_err();
        assert!(matches!(err, SigningError::IncompleteAttributeSet(_)));
    }

    #[test]
    fn fixed_ordering_keeps_slots_and_canonical_sorts() {
        let set = SignedAttributeSet::from_slots(
            full_slots(),
            alg(constants::SHA256_OID),
            alg(constants::SHA256_WITH_RSA_OID),
        )
        .unwrap();

        let fixed: Vec<_> = set
            .arranged(AttributeOrdering::Fixed)
            .unwrap()
            .into_iter()
            .map(|a| a.oid)
            .collect();
        assert_eq!(
            fixed,
            vec![
                constants::ID_CONTENT_TYPE,
                constants::ID_SIGNING_TIME,
                constants::ID_MESSAGE_DIGEST,
                constants::ID_AA_ETS_SIG_POLICY_ID,
                constants::ID_AA_SIGNING_CERTIFICATE_V2,
            ]
        );

        let canonical = set.arranged(AttributeOrdering::DerCanonical).unwrap();
        let encodings: Vec<Vec<u8>> = canonical.iter().map(|a| a.to_der().unwrap()).collect();
        let mut sorted = encodings.clone();
        sorted.sort();
        assert_eq!(encodings, sorted);
    }
}
