//! Foundational cryptographic domain types.
//!
//! Provides strongly-typed wrappers for cryptographic artifacts including:
//! - Hash algorithms and digest values with size validation
//! - The signer certificate with its original encoding
//! - Opaque raw signature values produced by an external signer

mod cert;
mod digest_bytes;
mod hash;
mod signature;

pub use cert::SignerCertificate;
pub use digest_bytes::{DigestBytes, DigestBytesError};
pub use hash::HashAlgorithm;
pub use signature::RawSignature;
