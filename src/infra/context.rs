//! Process-wide signer context.
//!
//! Built once at startup from [`SignerConfiguration`]; read-only afterwards
//! and safe to share through `Arc` across threads.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use der::Encode;
use x509_cert::name::Name;
use x509_cert::Certificate;

use crate::domain::constants::MAX_CHAIN_DEPTH;
use crate::domain::crypto::SignerCertificate;
use crate::infra::config::SignerConfiguration;
use crate::infra::error::{SigningError, SigningResult};

/// CA certificates keyed by the DER encoding of their subject name.
#[derive(Debug, Clone, Default)]
pub struct CertificateAuthorityCache {
    by_subject: HashMap<Vec<u8>, SignerCertificate>,
}

impl CertificateAuthorityCache {
    /// An empty cache: the certificate store will hold the signer only.
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn from_certificates(certs: Vec<SignerCertificate>) -> SigningResult<Self> {
        let mut by_subject = HashMap::with_capacity(certs.len());
        for cert in certs {
            let key = name_key(cert.subject())?;
            // First occurrence wins so reloading the same bundle is idempotent.
            by_subject.entry(key).or_insert(cert);
        }
        Ok(Self { by_subject })
    }

    /// Parse a PEM bundle holding one or more CA certificates.
    pub fn from_pem_bundle(pem: &[u8]) -> SigningResult<Self> {
        let certs = Certificate::load_pem_chain(pem).map_err(|e| {
            SigningError::CertificateStore(format!("Failed to parse CA bundle: {e}"))
        })?;
        let certs = certs
            .into_iter()
            .map(SignerCertificate::from_certificate)
            .collect::<SigningResult<Vec<_>>>()?;
        Self::from_certificates(certs)
    }

    pub fn load_pem_file(path: &Path) -> SigningResult<Self> {
        let pem = fs::read(path).map_err(|e| {
            SigningError::ConfigurationError(format!(
                "Failed to read CA bundle {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_pem_bundle(&pem)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_subject.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_subject.is_empty()
    }

    pub fn find_issuer(&self, cert: &SignerCertificate) -> SigningResult<Option<&SignerCertificate>> {
        Ok(self.by_subject.get(&name_key(cert.issuer())?))
    }

    /// Issuer chain of `cert`, nearest issuer first, excluding `cert` itself.
    ///
    /// Stops at a self-issued certificate, at a missing issuer, or after
    /// [`MAX_CHAIN_DEPTH`] links.
    pub fn chain_for(&self, cert: &SignerCertificate) -> SigningResult<Vec<SignerCertificate>> {
        let mut chain: Vec<SignerCertificate> = Vec::new();
        let mut current = cert;
        while chain.len() < MAX_CHAIN_DEPTH && !current.is_self_issued() {
            let Some(issuer) = self.find_issuer(current)? else {
                break;
            };
            if issuer == cert || chain.contains(issuer) {
                break;
            }
            chain.push(issuer.clone());
            current = issuer;
        }
        Ok(chain)
    }
}

fn name_key(name: &Name) -> SigningResult<Vec<u8>> {
    name.to_der()
        .map_err(|e| SigningError::CertificateStore(format!("Failed to encode name: {e}")))
}

/// Configuration plus the CA cache derived from it.
#[derive(Debug, Clone)]
pub struct SignerContext {
    config: SignerConfiguration,
    ca_cache: CertificateAuthorityCache,
}

impl SignerContext {
    pub fn new(config: SignerConfiguration) -> SigningResult<Self> {
        config.validate()?;
        let ca_cache = match (&config.ca_bundle_path, config.ca_cache_enabled) {
            (Some(path), true) => CertificateAuthorityCache::load_pem_file(path)?,
            _ => CertificateAuthorityCache::disabled(),
        };
        log::debug!(
            "signer context ready: {} cached CA certificate(s)",
            ca_cache.len()
        );
        Ok(Self { config, ca_cache })
    }

    /// Context with an already loaded CA set; ignored when caching is off.
    pub fn with_ca_certificates(
        config: SignerConfiguration,
        ca_certs: Vec<SignerCertificate>,
    ) -> SigningResult<Self> {
        let ca_cache = if config.ca_cache_enabled {
            CertificateAuthorityCache::from_certificates(ca_certs)?
        } else {
            CertificateAuthorityCache::disabled()
        };
        Ok(Self { config, ca_cache })
    }

    #[must_use]
    pub fn config(&self) -> &SignerConfiguration {
        &self.config
    }
    #[must_use]
    pub fn ca_cache(&self) -> &CertificateAuthorityCache {
        &self.ca_cache
    }
}

impl Default for SignerContext {
    fn default() -> Self {
        Self {
            config: SignerConfiguration::default(),
            ca_cache: CertificateAuthorityCache::disabled(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CA_PEM: &[u8] = include_bytes!("../../tests/fixtures/ca.pem");
    const SIGNER_PEM: &[u8] = include_bytes!("../../tests/fixtures/signer.pem");

    #[test]
    fn chain_stops_at_self_issued_root() {
        let cache = CertificateAuthorityCache::from_pem_bundle(CA_PEM).unwrap();
        assert_eq!(cache.len(), 1);

        let signer = SignerCertificate::from_pem(SIGNER_PEM).unwrap();
        let chain = cache.chain_for(&signer).unwrap();
        assert_eq!(chain.len(), 1);
        assert!(chain[0].is_self_issued());

        // The root has no further issuer to add.
        assert!(cache.chain_for(&chain[0]).unwrap().is_empty());
    }

    #[test]
    fn disabled_cache_yields_no_chain() {
        let signer = SignerCertificate::from_pem(SIGNER_PEM).unwrap();
        let config = SignerConfiguration {
            ca_cache_enabled: false,
            ..SignerConfiguration::default()
        };
        let ca = SignerCertificate::from_pem(CA_PEM).unwrap();
        let context = SignerContext::with_ca_certificates(config, vec![ca]).unwrap();
        assert!(context.ca_cache().is_empty());
        assert!(context.ca_cache().chain_for(&signer).unwrap().is_empty());
    }

    #[test]
    fn reloading_same_bundle_is_idempotent() {
        let ca = SignerCertificate::from_pem(CA_PEM).unwrap();
        let cache = CertificateAuthorityCache::from_certificates(vec![ca.clone(), ca]).unwrap();
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn context_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SignerContext>();
    }
}
