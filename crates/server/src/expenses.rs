//! Expenses API endpoints

use api_types::{
    ApiResponse,
    expense::{ExpenseNew, ExpenseUpdate, ExpenseView, SplitEntry},
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use engine::Money;

use crate::{ServerError, server::ServerState};

fn map_expense(expense: engine::Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        amount: expense.amount.to_major(),
        description: expense.description,
        paid_by: expense.paid_by,
        split: expense
            .split
            .into_iter()
            .map(|entry| SplitEntry { name: entry.name })
            .collect(),
        created_at: expense.created_at,
        updated_at: expense.updated_at,
    }
}

fn map_split(split: Vec<SplitEntry>) -> Vec<engine::SplitEntry> {
    split
        .into_iter()
        .map(|entry| engine::SplitEntry::new(entry.name))
        .collect()
}

/// Handle requests for listing every expense
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<ApiResponse<Vec<ExpenseView>>>, ServerError> {
    let expenses = state
        .engine
        .list_expenses()
        .await?
        .into_iter()
        .map(map_expense)
        .collect();

    Ok(Json(ApiResponse::ok(expenses)))
}

/// Handle requests for creating a new expense
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<ExpenseNew>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<ExpenseView>>), ServerError> {
    let Json(payload) = payload?;
    let expense = state
        .engine
        .create_expense(engine::ExpenseCmd {
            amount: Money::from_major(payload.amount)?,
            description: payload.description,
            paid_by: payload.paid_by,
            split: map_split(payload.split),
        })
        .await?;
    tracing::info!(id = %expense.id, amount = %expense.amount, "expense created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            map_expense(expense),
            "Expense added successfully",
        )),
    ))
}

/// Handle requests for partially updating an expense
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<ExpenseUpdate>, JsonRejection>,
) -> Result<Json<ApiResponse<ExpenseView>>, ServerError> {
    let Json(payload) = payload?;
    let patch = engine::ExpensePatch {
        amount: payload.amount.map(Money::from_major).transpose()?,
        description: payload.description,
        paid_by: payload.paid_by,
        split: payload.split.map(map_split),
    };

    let expense = state.engine.update_expense(&id, patch).await?;
    tracing::info!(id = %expense.id, "expense updated");

    Ok(Json(ApiResponse::ok_with_message(
        map_expense(expense),
        "Expense updated",
    )))
}

/// Handle requests for deleting an expense
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ServerError> {
    state.engine.delete_expense(&id).await?;
    tracing::info!(%id, "expense deleted");

    Ok(Json(ApiResponse::message("Expense deleted")))
}
