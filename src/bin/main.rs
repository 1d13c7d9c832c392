//! CAdES-BES signer CLI
//!
//! Builds the signed attributes to hand to an external signer, and the
//! detached CMS envelope once the raw signature is back.

use base64::Engine;
use clap::{Args, Parser, Subcommand};
use miette::{Context, IntoDiagnostic, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use cades_signer::{
    AlgorithmSuite, ConfigManager, EnvelopeBuilder, RawSignature, SignaturePolicy,
    SignedAttributesBuilder, SignerAlgorithm, SignerCertificate, SignerConfiguration,
    SignerContext, SigningTime,
};

#[derive(Parser)]
#[command(name = "cades-signer")]
#[command(about = "CAdES-BES signed attributes and CMS envelope builder")]
#[command(long_about = "
CAdES-BES signer - two-phase detached signature assembly

EXAMPLES:
    # Phase 1: attributes to be signed (base64 on stdout)
    cades-signer attributes -c signer.pem -d <hex digest> \\
        --policy-oid 2.16.76.1.7.1.1.2.3 --policy-hash <hex>

    # Phase 2: wrap the raw signature into the envelope
    cades-signer envelope -c signer.pem -d <hex digest> \\
        --policy-oid 2.16.76.1.7.1.1.2.3 --policy-hash <hex> \\
        --signing-time 1700000000 -s signature.bin -o signature.p7s

Phase 2 must receive the same inputs, including --signing-time, as phase 1.

ENVIRONMENT VARIABLES:
    RUST_LOG        Logging level (debug, info, warn, error)
")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the DER signed attributes that the external signer signs
    Attributes {
        #[command(flatten)]
        inputs: SignInputs,

        /// Output file for the DER (defaults to base64 on stdout)
        #[arg(short, long, value_name = "OUTPUT_FILE")]
        output: Option<PathBuf>,
    },

    /// Build the DER CMS SignedData envelope around a raw signature
    Envelope {
        #[command(flatten)]
        inputs: SignInputs,

        /// File holding the raw signature bytes
        #[arg(short, long, value_name = "SIGNATURE_FILE")]
        signature: PathBuf,

        /// Output file for the DER (defaults to base64 on stdout)
        #[arg(short, long, value_name = "OUTPUT_FILE")]
        output: Option<PathBuf>,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Create default configuration file
    Init,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
}

#[derive(Args)]
struct SignInputs {
    /// Signer certificate (DER or PEM)
    #[arg(short, long, value_name = "CERT_FILE")]
    certificate: PathBuf,

    /// Document digest, hex encoded
    #[arg(short, long, value_name = "HEX")]
    digest: String,

    /// Algorithm suite, e.g. SHA256withRSA (defaults to the configured one)
    #[arg(long, value_name = "SUITE")]
    suite: Option<String>,

    /// Raw digest algorithm OID, overriding --suite
    #[arg(long, value_name = "OID", requires = "cipher_oid")]
    digest_oid: Option<String>,

    /// Raw signature algorithm OID, overriding --suite
    #[arg(long, value_name = "OID", requires = "digest_oid")]
    cipher_oid: Option<String>,

    /// Signature policy OID
    #[arg(long, value_name = "OID")]
    policy_oid: String,

    /// Hash algorithm OID of the policy document hash
    #[arg(long, value_name = "OID", default_value = "2.16.840.1.101.3.4.2.1")]
    policy_hash_alg: String,

    /// Policy document hash, hex encoded
    #[arg(long, value_name = "HEX")]
    policy_hash: String,

    /// Policy document URI (SPURI qualifier)
    #[arg(long, value_name = "URI")]
    policy_uri: Option<String>,

    /// Signing time as Unix seconds (defaults to now)
    #[arg(long, value_name = "SECONDS")]
    signing_time: Option<u64>,
}

/// Parsed form of [`SignInputs`].
struct ResolvedInputs {
    certificate: SignerCertificate,
    digest: Vec<u8>,
    suite: AlgorithmSuite,
    policy: SignaturePolicy,
    signing_time: SigningTime,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config_manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new().into_diagnostic()?,
    };

    match cli.command {
        Commands::Attributes { inputs, output } => {
            let config = load_config(&config_manager)?;
            let from_clock = inputs.signing_time.is_none();
            let inputs = resolve_inputs(inputs, &config)?;
            let attributes = SignedAttributesBuilder::from_config(&config)
                .build(
                    &inputs.certificate,
                    &inputs.digest,
                    &inputs.suite,
                    &inputs.policy,
                    inputs.signing_time,
                )
                .into_diagnostic()?;
            if from_clock {
                log::info!(
                    "signing time {}; pass it to the envelope command",
                    inputs.signing_time.unix_duration().as_secs()
                );
            }
            emit(&attributes.der, output.as_deref())?;
        }

        Commands::Envelope {
            inputs,
            signature,
            output,
        } => {
            let config = load_config(&config_manager)?;
            let inputs = resolve_inputs(inputs, &config)?;
            let raw = std::fs::read(&signature)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to read signature {}", signature.display()))?;
            let raw = RawSignature::new(raw).into_diagnostic()?;
            let context = Arc::new(SignerContext::new(config).into_diagnostic()?);
            let envelope = EnvelopeBuilder::new(context)
                .build(
                    &inputs.certificate,
                    &inputs.digest,
                    &inputs.suite,
                    &inputs.policy,
                    inputs.signing_time,
                    &raw,
                )
                .into_diagnostic()?;
            emit(envelope.as_der(), output.as_deref())?;
        }

        Commands::Config(config_cmd) => handle_config_command(&config_manager, config_cmd)?,
    }

    Ok(())
}

fn load_config(manager: &ConfigManager) -> Result<SignerConfiguration> {
    if manager.config_path().exists() {
        manager.load().into_diagnostic()
    } else {
        log::debug!(
            "no configuration at {}, using defaults",
            manager.config_path().display()
        );
        Ok(SignerConfiguration::default())
    }
}

fn resolve_inputs(inputs: SignInputs, config: &SignerConfiguration) -> Result<ResolvedInputs> {
    let cert_bytes = std::fs::read(&inputs.certificate)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read certificate {}", inputs.certificate.display()))?;
    let certificate = SignerCertificate::load(&cert_bytes).into_diagnostic()?;

    let digest = hex::decode(inputs.digest.trim())
        .into_diagnostic()
        .wrap_err("Digest is not valid hex")?;

    let suite = match (inputs.digest_oid, inputs.cipher_oid) {
        (Some(digest_oid), Some(cipher_oid)) => AlgorithmSuite::new(digest_oid, cipher_oid),
        _ => {
            let algorithm = match inputs.suite {
                Some(name) => name.parse::<SignerAlgorithm>().into_diagnostic()?,
                None => config.default_algorithm,
            };
            algorithm.suite()
        }
    };

    let policy_hash = hex::decode(inputs.policy_hash.trim())
        .into_diagnostic()
        .wrap_err("Policy hash is not valid hex")?;
    let mut policy = SignaturePolicy::new(inputs.policy_oid, inputs.policy_hash_alg, policy_hash);
    if let Some(uri) = inputs.policy_uri {
        policy = policy.with_uri(uri);
    }

    let signing_time = match inputs.signing_time {
        Some(secs) => SigningTime::from_unix_seconds(secs),
        None => SigningTime::from_system_time(SystemTime::now()).into_diagnostic()?,
    };

    Ok(ResolvedInputs {
        certificate,
        digest,
        suite,
        policy,
        signing_time,
    })
}

fn emit(der: &[u8], output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, der)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
            log::info!("wrote {} bytes to {}", der.len(), path.display());
        }
        None => println!("{}", base64::engine::general_purpose::STANDARD.encode(der)),
    }
    Ok(())
}

fn handle_config_command(config_manager: &ConfigManager, config_cmd: ConfigCommands) -> Result<()> {
    match config_cmd {
        ConfigCommands::Show => match config_manager.load() {
            Ok(config) => {
                println!("Current Configuration:");
                println!("  Default algorithm: {}", config.default_algorithm);
                println!(
                    "  Signature algorithm mode: {:?}",
                    config.signature_algorithm_mode
                );
                println!("  Attribute ordering: {:?}", config.attribute_ordering);
                println!("  CA cache enabled: {}", config.ca_cache_enabled);
                match &config.ca_bundle_path {
                    Some(path) => println!("  CA bundle: {}", path.display()),
                    None => println!("  CA bundle: (none)"),
                }
                println!(
                    "  Configuration file: {}",
                    config_manager.config_path().display()
                );
            }
            Err(_) => {
                println!("No configuration file found. Use 'config init' to create one.");
            }
        },

        ConfigCommands::Init => {
            let _config = config_manager.load_or_create_default().into_diagnostic()?;
            println!(
                "Configuration initialized: {}",
                config_manager.config_path().display()
            );
        }

        ConfigCommands::Set { key, value } => {
            config_manager
                .update_value(&key, &value)
                .into_diagnostic()?;
            println!("Configuration updated: {key} = {value}");
        }
    }
    Ok(())
}
