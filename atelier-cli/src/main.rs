//! Atelier CLI
//!
//! Command-line interface for the Atelier builder membership registry:
//! key material handling, content storage, and the API server.

use std::io::Write;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use atelier_api::{ApiConfig, ApiServer};
use atelier_core::constants::CONTENT_SECRET_SIZE;
use atelier_core::types::{KeyParity, PublicKeyBytes, RegisteredKey};
use atelier_keys::{
    decode_public_key, derive_address, encode_public_key, export_public_key, generate_keypair,
};
use atelier_storage::{encrypt_bytes, ContentStorage, StorageConfig};

/// Atelier - builder membership registry
#[derive(Parser)]
#[command(name = "atelier")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new builder identity
    Generate {
        /// Output file for the identity (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Encode a raw public key into the registry form (parity + key bytes)
    EncodeKey {
        /// Public key hex (SEC1 compressed, uncompressed, or bare X||Y)
        public_key: String,
    },

    /// Derive the registry form of the public key behind a private key
    ExportKey {
        /// Private key hex
        private_key: String,
    },

    /// Derive the builder address for a registered key
    DeriveAddress {
        /// Y-parity bit (0 or 1)
        parity: u8,
        /// X coordinate hex (32 bytes)
        public_key: String,
    },

    /// Upload a file to content storage
    Upload {
        /// File to upload
        file: PathBuf,
        /// Optional symmetric secret (32 bytes hex); encrypts before upload
        #[arg(short, long)]
        secret: Option<String>,
    },

    /// Download content by CID
    Download {
        /// Content identifier
        cid: String,
        /// Write the content here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Optional symmetric secret (32 bytes hex); decrypts after download
        #[arg(short, long)]
        secret: Option<String>,
    },

    /// Run the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3001")]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,
        /// Founding builder address (derived from the key when unset)
        #[arg(long, env = "ATELIER_OWNER_ADDRESS")]
        owner_address: Option<String>,
        /// Founding builder public key (raw SEC1 hex)
        #[arg(long, env = "ATELIER_OWNER_PUBLIC_KEY")]
        owner_public_key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "atelier=debug,info"
    } else {
        "atelier=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Generate { output } => cmd_generate(output),
        Commands::EncodeKey { public_key } => cmd_encode_key(&public_key),
        Commands::ExportKey { private_key } => cmd_export_key(&private_key),
        Commands::DeriveAddress { parity, public_key } => cmd_derive_address(parity, &public_key),
        Commands::Upload { file, secret } => cmd_upload(&file, secret.as_deref()).await,
        Commands::Download {
            cid,
            output,
            secret,
        } => cmd_download(&cid, output, secret.as_deref()).await,
        Commands::Serve {
            port,
            bind,
            owner_address,
            owner_public_key,
        } => cmd_serve(port, &bind, owner_address, owner_public_key).await,
    }
}

/// Generate a new builder identity
fn cmd_generate(output: Option<PathBuf>) -> Result<()> {
    println!("{}", "Generating builder identity...".cyan().bold());

    let (secret, key) = generate_keypair();
    let address = derive_address(&key)?;

    let identity = serde_json::json!({
        "address": address.to_hex(),
        "parity": key.parity.bit(),
        "public_key": key.public_key.to_hex(),
        "compressed": hex::encode(decode_public_key(&key)),
        "private_key": secret.to_hex(),
    });

    if let Some(path) = output {
        std::fs::write(&path, serde_json::to_string_pretty(&identity)?)?;
        println!("{} {}", "Identity saved to:".green(), path.display());
    } else {
        println!("{}", serde_json::to_string_pretty(&identity)?);
    }

    println!(
        "\n{}",
        "IMPORTANT: keep the private key safe and never share it.".red().bold()
    );

    Ok(())
}

/// Encode a raw public key into the registry form
fn cmd_encode_key(public_key: &str) -> Result<()> {
    let key = encode_public_key(public_key)?;
    print_registered_key(&key)
}

/// Derive the registry form from a private key
fn cmd_export_key(private_key: &str) -> Result<()> {
    let key = export_public_key(private_key)?;
    print_registered_key(&key)
}

fn print_registered_key(key: &RegisteredKey) -> Result<()> {
    let address = derive_address(key)?;

    println!("{} {}", "address:".yellow(), address.to_hex());
    println!("{} {}", "parity:".yellow(), key.parity.bit());
    println!("{} {}", "public_key:".yellow(), key.public_key.to_hex());

    Ok(())
}

/// Derive the builder address for a registered key pair
fn cmd_derive_address(parity: u8, public_key: &str) -> Result<()> {
    let key = RegisteredKey::new(
        KeyParity::from_bit(parity)?,
        PublicKeyBytes::from_hex(public_key)?,
    );

    let address = derive_address(&key)?;
    println!("{}", address.to_hex());

    Ok(())
}

/// Upload a file to content storage
async fn cmd_upload(file: &PathBuf, secret: Option<&str>) -> Result<()> {
    let mut data = std::fs::read(file).with_context(|| format!("reading {}", file.display()))?;

    if let Some(secret) = secret {
        let secret = parse_secret(secret)?;
        data = encrypt_bytes(&data, &secret)?;
        println!("{}", "Content encrypted before upload".cyan());
    }

    let storage = ContentStorage::with_config(StorageConfig::from_env());
    let cid = storage.upload(&data).await?;

    println!("{} {}", "Uploaded:".green().bold(), cid);
    Ok(())
}

/// Download content by CID
async fn cmd_download(cid: &str, output: Option<PathBuf>, secret: Option<&str>) -> Result<()> {
    let secret = secret.map(parse_secret).transpose()?;

    let storage = ContentStorage::with_config(StorageConfig::from_env());
    let content = storage
        .download_to(cid, output.as_deref(), secret.as_ref())
        .await?;

    match output {
        Some(path) => println!(
            "{} {} ({} bytes)",
            "Saved to:".green().bold(),
            path.display(),
            content.len()
        ),
        None => std::io::stdout().write_all(&content)?,
    }

    Ok(())
}

fn parse_secret(raw: &str) -> Result<[u8; CONTENT_SECRET_SIZE]> {
    let bytes = hex::decode(raw.strip_prefix("0x").unwrap_or(raw)).context("secret hex")?;
    let secret: [u8; CONTENT_SECRET_SIZE] = bytes
        .try_into()
        .map_err(|_| anyhow::anyhow!("secret must be exactly {CONTENT_SECRET_SIZE} bytes"))?;
    Ok(secret)
}

/// Run the API server
async fn cmd_serve(
    port: u16,
    bind: &str,
    owner_address: Option<String>,
    owner_public_key: Option<String>,
) -> Result<()> {
    let mut config = ApiConfig::from_env();
    if owner_address.is_some() {
        config.owner_address = owner_address;
    }
    if let Some(key) = owner_public_key {
        config.owner_public_key = key;
    }

    let server = ApiServer::new(config)?;
    let addr: SocketAddr = format!("{bind}:{port}")
        .parse()
        .context("invalid bind address")?;

    println!(
        "{} {}",
        "Atelier registry listening on".cyan().bold(),
        addr.to_string().yellow()
    );

    server.run(addr).await?;
    Ok(())
}
