//! Error types for CAdES attribute and envelope construction.
//!
//! Every operation either returns complete bytes or one of these errors;
//! there are no partial results.

use thiserror::Error;

/// Result type for signing operations
pub type SigningResult<T> = Result<T, SigningError>;

/// Error kinds raised while building signed attributes and envelopes.
#[derive(Error, Debug, miette::Diagnostic)]
pub enum SigningError {
    #[error("Missing input: {0}")]
    #[diagnostic(code(cades::missing_input))]
    MissingInput(String),

    #[error("Invalid algorithm identifier: {0}")]
    #[diagnostic(code(cades::invalid_algorithm))]
    InvalidAlgorithmIdentifier(String),

    #[error("Unsupported algorithm: {0}")]
    #[diagnostic(code(cades::unsupported_algorithm))]
    UnsupportedAlgorithm(String),

    #[error("Invalid digest: {0}")]
    #[diagnostic(code(cades::invalid_digest))]
    InvalidDigest(String),

    #[error("Incomplete signed attribute set: {0}")]
    #[diagnostic(code(cades::incomplete_attributes))]
    IncompleteAttributeSet(String),

    #[error("Certificate encoding error: {0}")]
    #[diagnostic(code(cades::certificate_encoding))]
    CertificateEncoding(String),

    #[error("Certificate store error: {0}")]
    #[diagnostic(code(cades::certificate_store))]
    CertificateStore(String),

    #[error("Envelope construction error: {0}")]
    #[diagnostic(code(cades::envelope_construction))]
    EnvelopeConstruction(String),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(cades::serialization))]
    Serialization(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(cades::configuration))]
    ConfigurationError(String),

    #[error("IO error: {0}")]
    #[diagnostic(code(cades::io))]
    IoError(String),
}

impl SigningError {
    /// True for errors caused by caller-supplied algorithm, policy or digest
    /// input, as opposed to encoding failures.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SigningError::MissingInput(_)
                | SigningError::InvalidAlgorithmIdentifier(_)
                | SigningError::UnsupportedAlgorithm(_)
                | SigningError::InvalidDigest(_)
                | SigningError::ConfigurationError(_)
        )
    }
}

impl From<der::Error> for SigningError {
    fn from(error: der::Error) -> Self {
        SigningError::Serialization(error.to_string())
    }
}

impl From<const_oid::Error> for SigningError {
    fn from(error: const_oid::Error) -> Self {
        SigningError::InvalidAlgorithmIdentifier(error.to_string())
    }
}

impl From<std::io::Error> for SigningError {
    fn from(error: std::io::Error) -> Self {
        SigningError::IoError(error.to_string())
    }
}
