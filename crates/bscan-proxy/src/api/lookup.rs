use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::middleware::RequestId;

use super::{ApiFailure, AppState};

/// Success envelope for `/api/lookup/{barcode}`.
#[derive(Debug, Serialize)]
pub(super) struct LookupResponse {
    pub success: bool,
    /// The untouched upstream body, for callers that want more than the
    /// first match.
    pub data: Value,
    /// The first product — the best match.
    pub product: Value,
    #[serde(rename = "totalProducts")]
    pub total_products: usize,
}

pub(super) async fn lookup_barcode(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(barcode): Path<String>,
) -> Result<Json<LookupResponse>, ApiFailure> {
    let barcode = barcode.trim();
    if barcode.is_empty() {
        return Err(ApiFailure::invalid_barcode());
    }

    tracing::info!(request_id = %req_id.0, barcode, "lookup via BarcodeLookup upstream");
    let data = state.upstream.lookup(barcode).await.map_err(|e| {
        tracing::warn!(request_id = %req_id.0, error = %e, "upstream lookup failed");
        ApiFailure::from_upstream(&e)
    })?;

    let products = data
        .get("products")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let Some(product) = products.first().cloned() else {
        return Err(ApiFailure::not_found());
    };

    Ok(Json(LookupResponse {
        success: true,
        data,
        product,
        total_products: products.len(),
    }))
}
