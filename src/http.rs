//! 電卓コアの REST API。
//!
//! 要求の形を確かめ、結果とエラー種別を HTTP ステータスに写すだけの薄い層。

use crate::calculator::Calculator;
use crate::dto::{CalculationRequest, CalculationResponse, ChainCalculationRequest};
use crate::error::CalcError;
use crate::operation::Operation;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub const HEALTH_MESSAGE: &str = "計算サービスは稼働中です";

type ApiResponse = (StatusCode, Json<CalculationResponse>);

pub fn router(calculator: Calculator) -> Router {
    Router::new()
        .route("/api/calculator/calculate", post(calculate_handler))
        .route("/api/calculator/chain", post(chain_handler))
        .route("/api/calculator/operations", get(operations_handler))
        .route("/api/calculator/health", get(health_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(calculator)
}

/// Ctrl-C を受けるまで待ち受ける
pub async fn serve(addr: SocketAddr, calculator: Calculator) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "HTTP サーバを起動");

    axum::serve(listener, router(calculator))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "シグナル待ちに失敗");
            }
        })
        .await?;
    Ok(())
}

fn respond(result: Result<f64, CalcError>) -> ApiResponse {
    match result {
        Ok(value) => (StatusCode::OK, Json(CalculationResponse::ok(value))),
        Err(e) => {
            let status = if e.is_client_error() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            tracing::warn!(error = %e, %status, "計算要求に失敗");
            (status, Json(CalculationResponse::failure(e.to_string())))
        }
    }
}

fn malformed(rejection: JsonRejection) -> ApiResponse {
    tracing::warn!(error = %rejection, "不正なリクエスト本文");
    (
        StatusCode::BAD_REQUEST,
        Json(CalculationResponse::failure(format!(
            "不正な入力: {}",
            rejection.body_text()
        ))),
    )
}

async fn calculate_handler(
    State(calculator): State<Calculator>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> ApiResponse {
    match payload {
        Ok(Json(request)) => respond(request.execute(&calculator)),
        Err(rejection) => malformed(rejection),
    }
}

async fn chain_handler(
    State(calculator): State<Calculator>,
    payload: Result<Json<ChainCalculationRequest>, JsonRejection>,
) -> ApiResponse {
    match payload {
        Ok(Json(request)) => respond(request.execute(&calculator)),
        Err(rejection) => malformed(rejection),
    }
}

async fn operations_handler(State(calculator): State<Calculator>) -> Json<Vec<Operation>> {
    Json(calculator.operations().to_vec())
}

async fn health_handler() -> &'static str {
    HEALTH_MESSAGE
}
