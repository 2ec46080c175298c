use axum::extract::{Path, Query, State};
use tracing::instrument;

use crate::{
    error::AppError,
    pagination::{next_offset, page_size, PageQuery, TxPageQuery},
    types::{DepositResponse, OutputResponse, WithdrawalResponse},
    ApiResponse, ApiResult, AppState,
};

#[instrument(skip_all)]
pub async fn health_check(State(_state): State<AppState>) -> ApiResult<String> {
    Ok(ApiResponse::single("OK".to_string()))
}

#[instrument(skip(state), fields(query = ?query))]
pub async fn get_withdrawals(
    State(state): State<AppState>,
    Query(query): Query<TxPageQuery>,
) -> ApiResult<Vec<WithdrawalResponse>> {
    let params = query.to_params();
    let (count, items) = state
        .db_client
        .fetch_withdrawals_paginated(&params)
        .await
        .map_err(AppError::from)?;

    Ok(ApiResponse {
        success: true,
        count: Some(count),
        next: next_offset(count, params.offset, params.limit),
        items: items.into_iter().map(WithdrawalResponse::from).collect(),
    })
}

/// Claim data for one withdrawal: the stored record with its merkle root and
/// proof, enough for an L1 user to prove membership in the committed output.
#[instrument(skip(state))]
pub async fn get_withdrawal(
    State(state): State<AppState>,
    Path((bridge_id, sequence)): Path<(i64, i64)>,
) -> ApiResult<WithdrawalResponse> {
    let row = state
        .db_client
        .withdrawal_by_sequence(bridge_id, sequence)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "withdrawal {sequence} for bridge {bridge_id} not found"
            ))
        })?;

    Ok(ApiResponse::single(row.into()))
}

#[instrument(skip(state), fields(query = ?query))]
pub async fn get_deposits(
    State(state): State<AppState>,
    Query(query): Query<TxPageQuery>,
) -> ApiResult<Vec<DepositResponse>> {
    let params = query.to_params();
    let (count, items) = state
        .db_client
        .fetch_deposits_paginated(&params)
        .await
        .map_err(AppError::from)?;

    Ok(ApiResponse {
        success: true,
        count: Some(count),
        next: next_offset(count, params.offset, params.limit),
        items: items.into_iter().map(DepositResponse::from).collect(),
    })
}

#[instrument(skip(state), fields(query = ?query))]
pub async fn get_outputs(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Vec<OutputResponse>> {
    let offset = query.offset.unwrap_or(0);
    let limit = page_size(query.limit);
    let (count, items) = state
        .db_client
        .fetch_outputs_paginated(offset, limit, query.descending.unwrap_or(false))
        .await
        .map_err(AppError::from)?;

    Ok(ApiResponse {
        success: true,
        count: Some(count),
        next: next_offset(count, offset, limit),
        items: items.into_iter().map(OutputResponse::from).collect(),
    })
}

#[instrument(skip(state))]
pub async fn get_output(
    State(state): State<AppState>,
    Path(index): Path<i64>,
) -> ApiResult<OutputResponse> {
    let row = state
        .db_client
        .output_by_index(index)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound(format!("output {index} not found")))?;

    Ok(ApiResponse::single(row.into()))
}
