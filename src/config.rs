use std::collections::HashMap;
use std::str::FromStr;

use alloy_primitives::Address;
use thiserror::Error;

/// Default LP fee tier (0.30%) used when a pool key is built from bare token
/// addresses.
pub const DEFAULT_FEE: u32 = 3000;

/// Default tick spacing paired with [`DEFAULT_FEE`].
pub const DEFAULT_TICK_SPACING: i32 = 60;

/// Network-level configuration passed explicitly into every component that
/// touches the chain. There is no ambient/global address state anywhere in
/// the crate; tests construct this directly against a mock network.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// JSON-RPC endpoint for `eth_call` reads.
    pub rpc_url: String,
    /// StateView contract exposing `getSlot0`.
    pub state_view: Address,
    /// PositionManager contract exposing position info, liquidity, and
    /// `modifyLiquidities`.
    pub position_manager: Address,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl NetworkConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let rpc_url = env_map
            .get("RPC_URL")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("RPC_URL".to_string()))?;

        let state_view = parse_address(&env_map, "STATE_VIEW_ADDRESS")?;
        let position_manager = parse_address(&env_map, "POSITION_MANAGER_ADDRESS")?;

        Ok(NetworkConfig { rpc_url, state_view, position_manager })
    }
}

fn parse_address(env_map: &HashMap<String, String>, key: &str) -> Result<Address, ConfigError> {
    let raw = env_map
        .get(key)
        .ok_or_else(|| ConfigError::MissingEnv(key.to_string()))?;
    Address::from_str(raw)
        .map_err(|_| ConfigError::InvalidValue(key.to_string(), "must be a 20-byte hex address".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_required_env() -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("RPC_URL".to_string(), "http://localhost:8545".to_string());
        map.insert(
            "STATE_VIEW_ADDRESS".to_string(),
            "0x7ffe42c4a5deea5b0fec41c94c136cf115597227".to_string(),
        );
        map.insert(
            "POSITION_MANAGER_ADDRESS".to_string(),
            "0x7c5f5a4bbd8fd63184577525326123b519429bdc".to_string(),
        );
        map
    }

    #[test]
    fn test_missing_rpc_url() {
        let mut env_map = setup_required_env();
        env_map.remove("RPC_URL");
        match NetworkConfig::from_env_map(env_map) {
            Err(ConfigError::MissingEnv(s)) => assert_eq!(s, "RPC_URL"),
            _ => panic!("Expected MissingEnv error"),
        }
    }

    #[test]
    fn test_missing_state_view() {
        let mut env_map = setup_required_env();
        env_map.remove("STATE_VIEW_ADDRESS");
        match NetworkConfig::from_env_map(env_map) {
            Err(ConfigError::MissingEnv(s)) => assert_eq!(s, "STATE_VIEW_ADDRESS"),
            _ => panic!("Expected MissingEnv error"),
        }
    }

    #[test]
    fn test_invalid_address() {
        let mut env_map = setup_required_env();
        env_map.insert("POSITION_MANAGER_ADDRESS".to_string(), "not_hex".to_string());
        match NetworkConfig::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "POSITION_MANAGER_ADDRESS"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_all_required_vars_present() {
        let config = NetworkConfig::from_env_map(setup_required_env()).unwrap();
        assert_eq!(config.rpc_url, "http://localhost:8545");
        assert_eq!(
            config.state_view,
            Address::from_str("0x7ffe42c4a5deea5b0fec41c94c136cf115597227").unwrap()
        );
    }
}
