// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;

/// Plain-text error body with the given status.
pub fn error_response(status: StatusCode, message: String) -> Response {
    (status, message).into_response()
}

/// Map error variants to status codes and render them through [`error_response`].
///
/// ```ignore
/// impl_error_response!(MyError,
///     MyError::BadInput(_) => BAD_REQUEST,
///     _ => INTERNAL_SERVER_ERROR
/// );
/// ```
macro_rules! impl_error_response {
    ($error_type:ty, $($variant:pat => $status:ident),+ $(,)?) => {
        impl IntoResponse for $error_type {
            fn into_response(self) -> Response {
                let status = match &self {
                    $($variant => StatusCode::$status,)+
                };
                error_response(status, self.to_string())
            }
        }
    };
}

/// Request body for POST /txs/decode
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct DecodeTxRequest {
    /// Standard padded base64 of the binary transaction.
    pub txbase64: String,
}

/// Request body for POST /txs/encode
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct EncodeTxRequest {
    /// Transaction in the JSON form returned by /txs/decode.
    #[schema(value_type = Object)]
    pub tx: Value,
}

/// Response for POST /txs/encode
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EncodeTxResponse {
    pub tx: String,
}

#[derive(Debug, Error)]
pub enum DecodeTxError {
    #[error("{0}")]
    MalformedRequest(String),

    #[error("{0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    #[error("{0}")]
    DecodeError(auth::CodecError),

    #[error("{0}")]
    EncodeError(auth::CodecError),
}

impl_error_response!(DecodeTxError,
    DecodeTxError::MalformedRequest(_) => BAD_REQUEST,
    DecodeTxError::InvalidEncoding(_) => BAD_REQUEST,
    DecodeTxError::DecodeError(_) => BAD_REQUEST,
    DecodeTxError::EncodeError(_) => INTERNAL_SERVER_ERROR,
);
