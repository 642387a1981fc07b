// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::types::{DecodeTxError, DecodeTxRequest};
use crate::state::AppState;
use auth::StdTx;
use axum::{
    body::Bytes,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use base64::{Engine, engine::general_purpose::STANDARD};

#[utoipa::path(
    post,
    path = "/txs/decode",
    tag = "txs",
    summary = "Decode transaction",
    description = "Decode a base64 binary-encoded signed transaction into its JSON form.",
    request_body(content = DecodeTxRequest, description = "Base64 of the binary transaction"),
    responses(
        (status = 200, description = "Transaction JSON", body = Object),
        (status = 400, description = "Malformed request or undecodable transaction", body = String),
        (status = 500, description = "Transaction could not be rendered as JSON", body = String)
    )
)]
pub async fn decode_tx(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, DecodeTxError> {
    let result = decode(&state, &body);
    crate::metrics::record_tx_decode(result.is_ok());
    let json = result?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        json,
    )
        .into_response())
}

fn decode(state: &AppState, body: &[u8]) -> Result<Vec<u8>, DecodeTxError> {
    let request: DecodeTxRequest =
        serde_json::from_slice(body).map_err(|e| DecodeTxError::MalformedRequest(e.to_string()))?;
    let bytes = STANDARD.decode(request.txbase64.as_bytes())?;

    let tx: StdTx = state
        .codec
        .unmarshal_binary(&bytes)
        .map_err(DecodeTxError::DecodeError)?;
    tracing::debug!(
        msgs = tx.msgs.len(),
        signatures = tx.signatures.len(),
        size = bytes.len(),
        "decoded transaction"
    );

    state
        .codec
        .marshal_json(&tx)
        .map_err(DecodeTxError::EncodeError)
}
