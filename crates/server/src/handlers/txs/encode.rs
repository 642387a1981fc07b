// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::types::{DecodeTxError, EncodeTxRequest, EncodeTxResponse};
use crate::state::AppState;
use auth::StdTx;
use axum::{Json, body::Bytes, extract::State};
use base64::{Engine, engine::general_purpose::STANDARD};

#[utoipa::path(
    post,
    path = "/txs/encode",
    tag = "txs",
    summary = "Encode transaction",
    description = "Encode a transaction JSON, as returned by /txs/decode, to base64 binary.",
    request_body(content = EncodeTxRequest, description = "Transaction JSON under 'tx'"),
    responses(
        (status = 200, description = "Base64 of the binary transaction", body = EncodeTxResponse),
        (status = 400, description = "Malformed request or transaction JSON", body = String),
        (status = 500, description = "Transaction could not be encoded", body = String)
    )
)]
pub async fn encode_tx(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<EncodeTxResponse>, DecodeTxError> {
    let request: EncodeTxRequest =
        serde_json::from_slice(&body).map_err(|e| DecodeTxError::MalformedRequest(e.to_string()))?;

    let tx: StdTx = state
        .codec
        .unmarshal_json_value(request.tx)
        .map_err(|e| DecodeTxError::MalformedRequest(e.to_string()))?;
    let bytes = state
        .codec
        .marshal_binary(&tx)
        .map_err(DecodeTxError::EncodeError)?;

    Ok(Json(EncodeTxResponse {
        tx: STANDARD.encode(bytes),
    }))
}
