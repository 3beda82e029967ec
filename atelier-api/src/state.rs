//! App state: registry seeded with the founding builder, config.

use atelier_core::error::Result;
use atelier_core::types::BuilderRecord;
use atelier_keys::{derive_address, encode_public_key};
use atelier_registry::BuilderRegistry;

/// Well-known development key (the secp256k1 generator point). Override in
/// production via `ATELIER_OWNER_PUBLIC_KEY`.
const DEFAULT_OWNER_KEY: &str = "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

/// API server configuration.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Founding builder address (`0x…`); derived from the key when unset.
    pub owner_address: Option<String>,
    /// Founding builder public key (raw SEC1 hex).
    pub owner_public_key: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            owner_address: None,
            owner_public_key: DEFAULT_OWNER_KEY.into(),
        }
    }
}

impl ApiConfig {
    /// Reads configuration from the environment (and `.env` if present).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        Self {
            owner_address: std::env::var("ATELIER_OWNER_ADDRESS").ok(),
            owner_public_key: std::env::var("ATELIER_OWNER_PUBLIC_KEY")
                .unwrap_or_else(|_| DEFAULT_OWNER_KEY.into()),
        }
    }
}

/// Shared server state.
pub struct AppState {
    /// Active configuration.
    pub config: ApiConfig,
    /// The registry, seeded with the founding builder.
    pub registry: BuilderRegistry,
}

impl AppState {
    /// Builds the state, constructing the founding builder from config.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let key = encode_public_key(&config.owner_public_key)?;
        let address = match &config.owner_address {
            Some(raw) => raw.parse()?,
            None => derive_address(&key)?,
        };

        Ok(Self {
            registry: BuilderRegistry::new(BuilderRecord::new(address, key)),
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_seeds_founder() {
        let state = AppState::new(ApiConfig::default()).unwrap();
        assert_eq!(state.registry.builders_len(), 1);

        // the default dev key derives the well-known address of scalar 1
        let founder = state.registry.builder_at(0).unwrap();
        assert_eq!(founder.to_hex(), "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf");
    }

    #[test]
    fn test_explicit_owner_address_wins() {
        let config = ApiConfig {
            owner_address: Some(format!("0x{}", "11".repeat(20))),
            ..ApiConfig::default()
        };
        let state = AppState::new(config).unwrap();
        assert_eq!(
            state.registry.builder_at(0).unwrap().to_hex(),
            format!("0x{}", "11".repeat(20))
        );
    }

    #[test]
    fn test_bad_owner_key_is_rejected() {
        let config = ApiConfig {
            owner_address: None,
            owner_public_key: "beef".into(),
        };
        assert!(AppState::new(config).is_err());
    }
}
