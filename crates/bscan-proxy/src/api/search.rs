use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::middleware::RequestId;

use super::{ApiFailure, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct SearchParams {
    q: Option<String>,
    page: Option<u32>,
}

/// Success envelope for `/api/search`. An empty product list is still a
/// success — only a missing query is a client error.
#[derive(Debug, Serialize)]
pub(super) struct SearchResponse {
    pub success: bool,
    pub data: Value,
    pub products: Value,
    #[serde(rename = "totalProducts")]
    pub total_products: usize,
}

pub(super) async fn search_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiFailure> {
    let query = params.q.as_deref().map(str::trim).unwrap_or_default();
    if query.is_empty() {
        return Err(ApiFailure::invalid_query());
    }
    let page = params.page.unwrap_or(1);

    tracing::info!(request_id = %req_id.0, query, page, "search via BarcodeLookup upstream");
    let data = state.upstream.search(query, page).await.map_err(|e| {
        tracing::warn!(request_id = %req_id.0, error = %e, "upstream search failed");
        ApiFailure::from_upstream(&e)
    })?;

    let products = data
        .get("products")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    Ok(Json(SearchResponse {
        success: true,
        total_products: products.len(),
        products: Value::Array(products),
        data,
    }))
}
