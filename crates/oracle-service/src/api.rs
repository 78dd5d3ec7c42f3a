//! Read-only HTTP surface for the oracle adapter.
//!
//! Registry mutation is not exposed here: `add_symbol` stays a library
//! operation of the embedding system, keeping authorization outside this
//! service. The HTTP surface covers price reads, registry audit and the
//! advisory activation acknowledgment.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use oracle_core::{AdapterError, PriceAdapter, PriceSource};
use oracle_registry::RegistryError;
use oracle_types::{Address, FeedId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[derive(Clone)]
struct AppState {
	adapter: Arc<PriceAdapter>,
}

pub fn router(adapter: Arc<PriceAdapter>) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/prices/{symbol}", get(get_price))
		.route("/symbols", get(list_symbols))
		.route("/active", post(set_active))
		.with_state(AppState { adapter })
		.layer(TraceLayer::new_for_http())
}

pub async fn serve(adapter: Arc<PriceAdapter>, port: u16) -> anyhow::Result<()> {
	let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
	info!("HTTP API listening on port {}", port);

	axum::serve(listener, router(adapter))
		.with_graceful_shutdown(shutdown_signal())
		.await?;

	info!("HTTP API stopped");
	Ok(())
}

async fn shutdown_signal() {
	let _ = tokio::signal::ctrl_c().await;
	info!("Shutdown signal received");
}

async fn health() -> StatusCode {
	StatusCode::OK
}

#[derive(Serialize)]
struct PriceResponse {
	symbol: String,
	pips: u64,
}

#[derive(Serialize)]
struct ErrorResponse {
	error: String,
}

async fn get_price(State(state): State<AppState>, Path(symbol): Path<String>) -> Response {
	match state.adapter.load_price(&symbol).await {
		Ok(price) => Json(PriceResponse {
			symbol,
			pips: price.value(),
		})
		.into_response(),
		Err(error) => {
			warn!(symbol, %error, "price request failed");
			(
				status_for(&error),
				Json(ErrorResponse {
					error: error.to_string(),
				}),
			)
				.into_response()
		}
	}
}

fn status_for(error: &AdapterError) -> StatusCode {
	match error {
		AdapterError::Registry(RegistryError::UnknownSymbol(_)) => StatusCode::NOT_FOUND,
		AdapterError::Registry(_) => StatusCode::BAD_REQUEST,
		AdapterError::Feed(_) => StatusCode::BAD_GATEWAY,
		AdapterError::Conversion(_) | AdapterError::ZeroPrice { .. } => {
			StatusCode::UNPROCESSABLE_ENTITY
		}
	}
}

#[derive(Serialize)]
struct SymbolEntry {
	symbol: String,
	feed_id: FeedId,
}

async fn list_symbols(State(state): State<AppState>) -> Json<Vec<SymbolEntry>> {
	let entries = state
		.adapter
		.entries()
		.await
		.into_iter()
		.map(|(symbol, feed_id)| SymbolEntry { symbol, feed_id })
		.collect();
	Json(entries)
}

#[derive(Deserialize)]
struct ActivateRequest {
	consumer: Address,
}

async fn set_active(
	State(state): State<AppState>,
	Json(request): Json<ActivateRequest>,
) -> StatusCode {
	state.adapter.set_active(&request.consumer);
	StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
	use super::*;
	use oracle_feeds::FeedError;
	use oracle_types::PipError;

	#[test]
	fn statuses_track_failure_origin() {
		let unknown = AdapterError::Registry(RegistryError::UnknownSymbol("ETH".into()));
		assert_eq!(status_for(&unknown), StatusCode::NOT_FOUND);

		let stale = AdapterError::Feed(FeedError::StaleOrMissingAnswer);
		assert_eq!(status_for(&stale), StatusCode::BAD_GATEWAY);

		let overflow = AdapterError::Conversion(PipError::Overflow);
		assert_eq!(status_for(&overflow), StatusCode::UNPROCESSABLE_ENTITY);

		let zero = AdapterError::ZeroPrice {
			symbol: "ETH".into(),
		};
		assert_eq!(status_for(&zero), StatusCode::UNPROCESSABLE_ENTITY);
	}
}
