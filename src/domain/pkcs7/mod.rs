//! CMS `SignedData` domain: attribute set, record types, DER envelope.

use std::fmt;

pub mod attributes;
pub mod cades;
pub mod ordered_set;
pub mod signer_info;

/// DER-encoded `ContentInfo` wrapping a CAdES-BES `SignedData`.
#[derive(Clone, PartialEq, Eq)]
pub struct CadesEnvelope {
    der: Vec<u8>,
}

impl CadesEnvelope {
    #[must_use]
    pub fn from_der(der: Vec<u8>) -> Self {
        Self { der }
    }
    #[must_use]
    pub fn as_der(&self) -> &[u8] {
        &self.der
    }
    #[must_use]
    pub fn into_der(self) -> Vec<u8> {
        self.der
    }
    #[must_use]
    pub fn len(&self) -> usize {
        self.der.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.der.is_empty()
    }
}

impl fmt::Debug for CadesEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CadesEnvelope(len={})", self.der.len())
    }
}

pub use attributes::{AttributeOrdering, AttributeSlots, SignedAttributeSet, SignedAttributes};
pub use ordered_set::{OrderedSetOf, OrderedSetRef};
pub use signer_info::{
    CadesSignedData, CadesSignerInfo, SignerInformation, SignerInformationStore,
};
