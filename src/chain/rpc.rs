//! JSON-RPC `eth_call` reader for pool and position state.

use std::time::Duration;

use alloy_primitives::{Address, U256};
use alloy_sol_types::{SolCall, SolValue};
use backoff::future::retry;
use backoff::ExponentialBackoff;
use reqwest::Client;
use tracing::debug;

use super::{ChainError, PoolReader};
use crate::config::NetworkConfig;
use crate::domain::{PackedPositionInfo, PoolId, PoolKey, PoolState};

alloy_sol_types::sol! {
    struct RpcPoolKey {
        address currency0;
        address currency1;
        uint24 fee;
        int24 tickSpacing;
        address hooks;
    }

    function getSlot0(bytes32 poolId) external view returns (uint160 sqrtPriceX96, int24 tick, uint24 protocolFee, uint24 lpFee);
    function getPoolAndPositionInfo(uint256 tokenId) external view returns (RpcPoolKey poolKey, uint256 info);
    function getPositionLiquidity(uint256 tokenId) external view returns (uint128 liquidity);
}

/// State reader backed by a plain JSON-RPC endpoint. `getSlot0` targets the
/// state-view contract, the position calls target the position manager; both
/// addresses come from [`NetworkConfig`].
#[derive(Debug, Clone)]
pub struct RpcPoolReader {
    client: Client,
    config: NetworkConfig,
}

impl RpcPoolReader {
    pub fn new(config: NetworkConfig) -> Self {
        Self { client: Client::new(), config }
    }

    async fn eth_call(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>, ChainError> {
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_call",
            "params": [
                {
                    "to": format!("0x{}", hex::encode(to)),
                    "data": format!("0x{}", hex::encode(&data)),
                },
                "latest"
            ]
        });

        let backoff = ExponentialBackoff {
            max_elapsed_time: Some(Duration::from_secs(30)),
            ..Default::default()
        };

        retry(backoff, || async {
            let response = self
                .client
                .post(&self.config.rpc_url)
                .json(&payload)
                .send()
                .await
                .map_err(|e| backoff::Error::transient(ChainError::Network(e.to_string())))?;

            let status = response.status();
            if status == 429 {
                return Err(backoff::Error::transient(ChainError::RateLimited));
            }
            if status.is_server_error() {
                return Err(backoff::Error::transient(ChainError::Http {
                    status: status.as_u16(),
                    message: "Server error".to_string(),
                }));
            }
            if !status.is_success() {
                return Err(backoff::Error::permanent(ChainError::Http {
                    status: status.as_u16(),
                    message: "Client error".to_string(),
                }));
            }

            let body = response
                .json::<serde_json::Value>()
                .await
                .map_err(|e| backoff::Error::permanent(ChainError::Parse(e.to_string())))?;

            if let Some(error) = body.get("error") {
                let message = error
                    .get("message")
                    .and_then(|m| m.as_str())
                    .unwrap_or("unknown RPC error")
                    .to_string();
                return Err(backoff::Error::permanent(ChainError::Rpc(message)));
            }

            let result = body
                .get("result")
                .and_then(|r| r.as_str())
                .ok_or_else(|| {
                    backoff::Error::permanent(ChainError::Parse(
                        "missing result field".to_string(),
                    ))
                })?;

            hex::decode(result.trim_start_matches("0x")).map_err(|e| {
                backoff::Error::permanent(ChainError::Parse(format!("invalid hex result: {}", e)))
            })
        })
        .await
    }
}

#[async_trait::async_trait]
impl PoolReader for RpcPoolReader {
    async fn get_slot0(&self, pool_id: PoolId) -> Result<PoolState, ChainError> {
        debug!("Fetching slot0 for pool {}", pool_id);

        let call = getSlot0Call { poolId: pool_id };
        let raw = self.eth_call(self.config.state_view, call.abi_encode()).await?;
        let ret = getSlot0Call::abi_decode_returns(&raw, true)
            .map_err(|e| ChainError::Parse(format!("getSlot0 returndata: {}", e)))?;

        Ok(PoolState {
            sqrt_price_x96: ret.sqrtPriceX96.to::<U256>(),
            tick: ret.tick.as_i32(),
            protocol_fee: ret.protocolFee.to::<u32>(),
            lp_fee: ret.lpFee.to::<u32>(),
        })
    }

    async fn get_pool_and_position_info(
        &self,
        token_id: U256,
    ) -> Result<(PoolKey, PackedPositionInfo), ChainError> {
        debug!("Fetching pool and position info for token {}", token_id);

        let call = getPoolAndPositionInfoCall { tokenId: token_id };
        let raw = self
            .eth_call(self.config.position_manager, call.abi_encode())
            .await?;
        let ret = getPoolAndPositionInfoCall::abi_decode_returns(&raw, true)
            .map_err(|e| ChainError::Parse(format!("getPoolAndPositionInfo returndata: {}", e)))?;

        let key = ret.poolKey;
        let pool_key = PoolKey::from_tokens(
            key.currency0,
            key.currency1,
            key.fee.to::<u32>(),
            key.tickSpacing.as_i32(),
            key.hooks,
        )
        .map_err(|e| ChainError::Parse(format!("registry returned invalid pool key: {}", e)))?;

        Ok((pool_key, PackedPositionInfo::new(ret.info)))
    }

    async fn get_position_liquidity(&self, token_id: U256) -> Result<u128, ChainError> {
        debug!("Fetching liquidity for token {}", token_id);

        let call = getPositionLiquidityCall { tokenId: token_id };
        let raw = self
            .eth_call(self.config.position_manager, call.abi_encode())
            .await?;
        let ret = getPositionLiquidityCall::abi_decode_returns(&raw, true)
            .map_err(|e| ChainError::Parse(format!("getPositionLiquidity returndata: {}", e)))?;

        Ok(ret.liquidity)
    }
}
