use std::fmt;

use crate::infra::error::{SigningError, SigningResult};

/// Raw signature value produced externally over the DER signed attributes.
/// Opaque to this crate: RSA PKCS#1 bytes or a DER Ecdsa-Sig-Value alike.
#[derive(Clone, Eq, PartialEq)]
pub struct RawSignature {
    bytes: Box<[u8]>,
}

impl RawSignature {
    pub fn new(bytes: Vec<u8>) -> SigningResult<Self> {
        if bytes.is_empty() {
            return Err(SigningError::MissingInput("signature value is empty".into()));
        }
        Ok(Self {
            bytes: bytes.into_boxed_slice(),
        })
    }
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for RawSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawSignature(len={})", self.bytes.len())
    }
}
