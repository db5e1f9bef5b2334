//! People, balances and settlements API endpoints.
//!
//! Nothing here is stored: every request recomputes from the current expenses.

use api_types::{
    ApiResponse,
    settlement::{BalancesView, SettlementView},
};
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState};

/// Handle requests for the distinct people involved in any expense
pub async fn people(
    State(state): State<ServerState>,
) -> Result<Json<ApiResponse<Vec<String>>>, ServerError> {
    let people = state.engine.people().await?.into_iter().collect();
    Ok(Json(ApiResponse::ok(people)))
}

/// Handle requests for the net balance of every person
pub async fn balances(
    State(state): State<ServerState>,
) -> Result<Json<ApiResponse<BalancesView>>, ServerError> {
    let balances = state
        .engine
        .balances()
        .await?
        .into_iter()
        .map(|(name, balance)| (name, balance.to_major()))
        .collect();
    Ok(Json(ApiResponse::ok(balances)))
}

/// Handle requests for the transfers settling every balance
pub async fn settlements(
    State(state): State<ServerState>,
) -> Result<Json<ApiResponse<Vec<SettlementView>>>, ServerError> {
    let transfers = state.engine.settlements().await?;
    tracing::debug!(count = transfers.len(), "settlements computed");

    let settlements = transfers
        .into_iter()
        .map(|transfer| SettlementView {
            from: transfer.from,
            to: transfer.to,
            amount: transfer.amount.to_major(),
        })
        .collect();
    Ok(Json(ApiResponse::ok(settlements)))
}
