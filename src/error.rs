//! Errors surfaced by the strict settlement mode and by the HTTP service.
//!
//! The default settlement path never fails; [`SettlementError`] only comes
//! out of [`settle_strict`](crate::report::settle_strict).
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::balance::IgnoreReason;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettlementError {
    #[error("The group has no valid members")]
    NoValidMembers,
    #[error("Expense \"{id}\" would be ignored: {reason}")]
    IgnoredExpense { id: String, reason: IgnoreReason },
    #[error("Expense \"{id}\" has a negative amount: {amount}")]
    NegativeAmount { id: String, amount: f64 },
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Couldn't find group \"{0}\"")]
    GroupNotFound(String),
    #[error(transparent)]
    Store(#[from] mongodb::error::Error),
    #[error(transparent)]
    Settlement(#[from] SettlementError),
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::GroupNotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Settlement(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ServiceError::Store(err) = self {
            tracing::error!("store failure: {err}");
        }
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
