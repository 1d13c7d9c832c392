//! Configuration management infrastructure.
//!
//! Signer preferences live in a TOML file: the default algorithm suite, how
//! the outer signature algorithm and attribute order are chosen, and where
//! the CA certificates for the envelope's certificate store come from.

use crate::domain::algorithm::{SignatureAlgorithmMode, SignerAlgorithm};
use crate::domain::pkcs7::AttributeOrdering;
use crate::infra::error::{SigningError, SigningResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Signer configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignerConfiguration {
    /// Algorithm suite used when the caller names none
    pub default_algorithm: SignerAlgorithm,

    /// Outer SignerInfo signature algorithm selection
    pub signature_algorithm_mode: SignatureAlgorithmMode,

    /// Order of the signed attributes inside their SET
    pub attribute_ordering: AttributeOrdering,

    /// Whether CA certificates are cached and added to the certificate store
    pub ca_cache_enabled: bool,

    /// PEM bundle with CA certificates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_bundle_path: Option<PathBuf>,
}

impl Default for SignerConfiguration {
    fn default() -> Self {
        Self {
            default_algorithm: SignerAlgorithm::Sha256WithRsa,
            signature_algorithm_mode: SignatureAlgorithmMode::FromSuite,
            attribute_ordering: AttributeOrdering::Fixed,
            ca_cache_enabled: true,
            ca_bundle_path: None,
        }
    }
}

impl SignerConfiguration {
    /// Check values that serde alone cannot.
    pub fn validate(&self) -> SigningResult<()> {
        if let Some(path) = &self.ca_bundle_path {
            if self.ca_cache_enabled && !path.is_file() {
                return Err(SigningError::ConfigurationError(format!(
                    "CA bundle not found: {}",
                    path.display()
                )));
            }
        }
        if self.ca_cache_enabled && self.ca_bundle_path.is_none() {
            log::debug!("CA cache enabled without a bundle; certificate store holds the signer only");
        }
        Ok(())
    }
}

/// Configuration manager for handling config files
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new configuration manager with default path
    pub fn new() -> SigningResult<Self> {
        let config_path = Self::default_config_path()?;
        Ok(Self { config_path })
    }

    /// Create a configuration manager with custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the default configuration file path
    pub fn default_config_path() -> SigningResult<PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            Ok(config_dir.join("cades-signer").join("config.toml"))
        } else {
            Ok(PathBuf::from("cades-signer-config.toml"))
        }
    }

    /// Load configuration from file, creating default if it doesn't exist
    pub fn load_or_create_default(&self) -> SigningResult<SignerConfiguration> {
        if self.config_path.exists() {
            self.load()
        } else {
            log::info!(
                "Configuration file not found, creating default: {}",
                self.config_path.display()
            );
            let default_config = SignerConfiguration::default();
            self.save(&default_config)?;
            Ok(default_config)
        }
    }

    /// Load configuration from file
    pub fn load(&self) -> SigningResult<SignerConfiguration> {
        log::info!("Loading configuration from: {}", self.config_path.display());

        let content = fs::read_to_string(&self.config_path).map_err(|e| {
            SigningError::ConfigurationError(format!(
                "Failed to read config file {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        let config: SignerConfiguration = toml::from_str(&content).map_err(|e| {
            SigningError::ConfigurationError(format!("Failed to parse config file: {e}"))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, config: &SignerConfiguration) -> SigningResult<()> {
        log::info!("Saving configuration to: {}", self.config_path.display());

        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    SigningError::ConfigurationError(format!(
                        "Failed to create config directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let content = toml::to_string_pretty(config).map_err(|e| {
            SigningError::ConfigurationError(format!("Failed to serialize config: {e}"))
        })?;

        fs::write(&self.config_path, content).map_err(|e| {
            SigningError::ConfigurationError(format!(
                "Failed to write config file {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Update a specific configuration value
    pub fn update_value(&self, key: &str, value: &str) -> SigningResult<()> {
        let mut config = self.load_or_create_default()?;

        match key {
            "default_algorithm" => {
                config.default_algorithm = value.parse().map_err(|_| {
                    SigningError::ConfigurationError(format!("Invalid algorithm suite: {value}"))
                })?;
            }
            "signature_algorithm_mode" => {
                config.signature_algorithm_mode = parse_kebab_enum(key, value)?;
            }
            "attribute_ordering" => {
                config.attribute_ordering = parse_kebab_enum(key, value)?;
            }
            "ca_cache_enabled" => {
                config.ca_cache_enabled = value.parse().map_err(|_| {
                    SigningError::ConfigurationError(format!("Invalid boolean value: {value}"))
                })?;
            }
            "ca_bundle_path" => {
                config.ca_bundle_path = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            _ => {
                return Err(SigningError::ConfigurationError(format!(
                    "Unknown configuration key: {key}"
                )));
            }
        }

        config.validate()?;
        self.save(&config)
    }

    /// Get the configuration file path
    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

/// Parse a kebab-case unit variant through its serde representation.
fn parse_kebab_enum<T: serde::de::DeserializeOwned>(key: &str, value: &str) -> SigningResult<T> {
    #[derive(Deserialize)]
    struct Wrapper<T> {
        value: T,
    }
    let doc = format!("value = {value:?}");
    toml::from_str::<Wrapper<T>>(&doc)
        .map(|w| w.value)
        .map_err(|_| SigningError::ConfigurationError(format!("Invalid value for {key}: {value}")))
}
