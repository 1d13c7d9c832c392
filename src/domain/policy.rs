//! Signature policy identifier value.

use std::fmt;

/// Signature policy under which the signature is produced.
///
/// Opaque here: the OID, the policy document hash and its algorithm are
/// embedded verbatim into the signature-policy-identifier attribute.
#[derive(Clone, PartialEq, Eq)]
pub struct SignaturePolicy {
    oid: String,
    hash_algorithm_oid: String,
    hash: Vec<u8>,
    uri: Option<String>,
}

impl SignaturePolicy {
    #[must_use]
    pub fn new(
        oid: impl Into<String>,
        hash_algorithm_oid: impl Into<String>,
        hash: Vec<u8>,
    ) -> Self {
        Self {
            oid: oid.into(),
            hash_algorithm_oid: hash_algorithm_oid.into(),
            hash,
            uri: None,
        }
    }

    /// Attach an SPURI qualifier pointing at the policy document.
    #[must_use]
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    #[must_use]
    pub fn oid(&self) -> &str {
        &self.oid
    }
    #[must_use]
    pub fn hash_algorithm_oid(&self) -> &str {
        &self.hash_algorithm_oid
    }
    #[must_use]
    pub fn hash(&self) -> &[u8] {
        &self.hash
    }
    #[must_use]
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }
}

impl fmt::Debug for SignaturePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SignaturePolicy(oid={}, hash_alg={}, hash_len={}, uri={:?})",
            self.oid,
            self.hash_algorithm_oid,
            self.hash.len(),
            self.uri
        )
    }
}
