use std::fmt;

use der::{Decode, DecodePem, Encode};
use x509_cert::{name::Name, serial_number::SerialNumber, Certificate};

use crate::infra::error::{SigningError, SigningResult};

/// Signer certificate: the parsed X.509 structure plus its original encoding.
#[derive(Clone)]
pub struct SignerCertificate {
    cert: Certificate,
    der: Box<[u8]>,
}

impl SignerCertificate {
    pub fn from_der(der: &[u8]) -> SigningResult<Self> {
        if der.is_empty() {
            return Err(SigningError::MissingInput("certificate is empty".into()));
        }
        let cert = Certificate::from_der(der).map_err(|e| {
            SigningError::CertificateEncoding(format!("Failed to parse certificate: {e}"))
        })?;
        Ok(Self {
            cert,
            der: der.to_vec().into_boxed_slice(),
        })
    }

    pub fn from_pem(pem: &[u8]) -> SigningResult<Self> {
        let cert = Certificate::from_pem(pem).map_err(|e| {
            SigningError::CertificateEncoding(format!("Failed to parse PEM certificate: {e}"))
        })?;
        Self::from_certificate(cert)
    }

    /// Accept either PEM or DER input.
    pub fn load(bytes: &[u8]) -> SigningResult<Self> {
        if bytes.starts_with(b"-----BEGIN") {
            Self::from_pem(bytes)
        } else {
            Self::from_der(bytes)
        }
    }

    pub fn from_certificate(cert: Certificate) -> SigningResult<Self> {
        let der = cert.to_der().map_err(|e| {
            SigningError::CertificateEncoding(format!("Failed to re-encode certificate: {e}"))
        })?;
        Ok(Self {
            cert,
            der: der.into_boxed_slice(),
        })
    }

    #[must_use]
    pub fn certificate(&self) -> &Certificate {
        &self.cert
    }
    #[must_use]
    pub fn as_der(&self) -> &[u8] {
        &self.der
    }
    #[must_use]
    pub fn issuer(&self) -> &Name {
        &self.cert.tbs_certificate.issuer
    }
    #[must_use]
    pub fn subject(&self) -> &Name {
        &self.cert.tbs_certificate.subject
    }
    #[must_use]
    pub fn serial_number(&self) -> &SerialNumber {
        &self.cert.tbs_certificate.serial_number
    }

    /// True when subject and issuer are the same name.
    #[must_use]
    pub fn is_self_issued(&self) -> bool {
        self.issuer() == self.subject()
    }
}

impl PartialEq for SignerCertificate {
    fn eq(&self, other: &Self) -> bool {
        self.der == other.der
    }
}
impl Eq for SignerCertificate {}

impl fmt::Debug for SignerCertificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SignerCertificate(subject={}, len={})",
            self.subject(),
            self.der.len()
        )
    }
}
