//! Contract metadata for wallet-facing clients.
//!
//! Everything here is static simulation data shaped like real Polygon
//! deployments; only the contract address comes from configuration.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NetworkInfo {
    pub name: String,
    pub chain_id: u64,
    pub rpc_url: String,
    pub contract_address: String,
    pub explorer_url: String,
    pub native_currency: NativeCurrency,
}

/// Rough gas costs per contract call, in units
#[derive(Debug, Serialize, ToSchema)]
pub struct GasEstimates {
    pub mint: u64,
    pub purchase_access: u64,
    pub transfer: u64,
    pub approve: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ContractInfoResponse {
    pub networks: BTreeMap<String, NetworkInfo>,
    pub supported_networks: Vec<String>,
    pub default_network: String,
    pub gas_estimates: GasEstimates,
    /// Which ledger backend serves these contracts
    pub backend: String,
    pub timestamp: DateTime<Utc>,
}

fn matic() -> NativeCurrency {
    NativeCurrency {
        name: "MATIC".to_string(),
        symbol: "MATIC".to_string(),
        decimals: 18,
    }
}

fn build_contract_info(contract_address: &str, backend: String) -> ContractInfoResponse {
    let mut networks = BTreeMap::new();
    networks.insert(
        "mumbai".to_string(),
        NetworkInfo {
            name: "Polygon Mumbai Testnet".to_string(),
            chain_id: 80001,
            rpc_url: "https://rpc-mumbai.maticvigil.com/".to_string(),
            contract_address: contract_address.to_string(),
            explorer_url: "https://mumbai.polygonscan.com/".to_string(),
            native_currency: matic(),
        },
    );
    networks.insert(
        "polygon".to_string(),
        NetworkInfo {
            name: "Polygon Mainnet".to_string(),
            chain_id: 137,
            rpc_url: "https://polygon-rpc.com/".to_string(),
            contract_address: contract_address.to_string(),
            explorer_url: "https://polygonscan.com/".to_string(),
            native_currency: matic(),
        },
    );

    let supported_networks = networks.keys().cloned().collect();

    ContractInfoResponse {
        networks,
        supported_networks,
        default_network: "mumbai".to_string(),
        gas_estimates: GasEstimates {
            mint: 150_000,
            purchase_access: 80_000,
            transfer: 21_000,
            approve: 50_000,
        },
        backend,
        timestamp: Utc::now(),
    }
}

#[utoipa::path(
    get,
    path = "/api/v0/contract-info",
    tag = "marketplace",
    responses(
        (status = 200, description = "Contract deployment metadata", body = ContractInfoResponse)
    )
)]
pub async fn contract_info(State(state): State<Arc<AppState>>) -> Json<ContractInfoResponse> {
    Json(build_contract_info(
        state.config.contract_address(),
        state.ledger.backend_type().to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_info_lists_polygon_networks() {
        let info = build_contract_info("0xabc123", "simulated".to_string());

        assert_eq!(info.default_network, "mumbai");
        assert_eq!(
            info.supported_networks,
            vec!["mumbai".to_string(), "polygon".to_string()]
        );

        let mumbai = &info.networks["mumbai"];
        assert_eq!(mumbai.chain_id, 80001);
        assert_eq!(mumbai.contract_address, "0xabc123");
        assert_eq!(info.networks["polygon"].chain_id, 137);
        assert_eq!(info.backend, "simulated");
        assert_eq!(info.gas_estimates.mint, 150_000);
    }
}
