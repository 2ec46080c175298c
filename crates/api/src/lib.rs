mod controller;
pub mod error;
pub mod pagination;
pub mod types;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use database::client::DbClient;
use serde::Serialize;
use std::net::SocketAddrV4;
use std::sync::Arc;
use tracing::info;

use error::AppError;

#[derive(Clone)]
struct AppState {
    pub db_client: Arc<DbClient>,
}

/// Uniform envelope: `count` and `next` only make sense on the paginated
/// listings and stay `None` elsewhere.
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    pub next: Option<u64>,
    pub items: T,
}

impl<T: Serialize> ApiResponse<T> {
    fn single(items: T) -> Self {
        Self {
            success: true,
            count: None,
            next: None,
            items,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = if self.success {
            StatusCode::OK
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (status, Json(self)).into_response()
    }
}

type ApiResult<T> = Result<ApiResponse<T>, AppError>;

fn make_server(state: AppState) -> Router {
    Router::new()
        .route("/withdrawals", get(controller::get_withdrawals))
        .route(
            "/withdrawals/{bridge_id}/{sequence}",
            get(controller::get_withdrawal),
        )
        .route("/deposits", get(controller::get_deposits))
        .route("/outputs", get(controller::get_outputs))
        .route("/outputs/{index}", get(controller::get_output))
        .route("/status", get(controller::health_check))
        .with_state(state)
}

pub async fn start_api(
    primary_db_conn: sea_orm::DatabaseConnection,
    port: u16,
) -> eyre::Result<()> {
    let state = AppState {
        db_client: Arc::new(DbClient::new(primary_db_conn)),
    };
    let server = make_server(state);
    let addr = SocketAddrV4::new(std::net::Ipv4Addr::new(0, 0, 0, 0), port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API Server running on {}", addr);
    axum::serve(listener, server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;
    Ok(())
}
