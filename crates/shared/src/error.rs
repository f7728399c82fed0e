use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::StoreStatus;

pub const REGISTER_FAILURE: &str = "Failed to save registration";

/// Body returned by the registration endpoint when a submission is rejected.
/// `db_status` carries the store connectivity code observed at failure time.
#[derive(Debug, Clone, Serialize, Deserialize, Error, PartialEq)]
#[serde(rename_all = "camelCase")]
#[error("{error}: {details}")]
pub struct RegisterFailure {
    pub error: String,
    pub details: String,
    pub db_status: StoreStatus,
}

impl RegisterFailure {
    pub fn new(details: impl Into<String>, db_status: StoreStatus) -> Self {
        Self {
            error: REGISTER_FAILURE.to_string(),
            details: details.into(),
            db_status,
        }
    }
}
