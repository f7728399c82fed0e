use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Batch, ParticipationMode};

pub const REGISTER_SUCCESS: &str = "Registration successful!";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRecord {
    pub name: String,
    pub age: u8,
    pub email: String,
    pub phone: String,
    pub batch: Batch,
    pub enrollment_no: String,
    pub degree: String,
    pub course: String,
}

/// One complete submission as sent to `POST /api/register`. Duo-only fields
/// are omitted from solo payloads rather than sent empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPayload {
    #[serde(default)]
    pub participation_mode: ParticipationMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    pub participants: Vec<ParticipantRecord>,
    pub institute_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institute_name2: Option<String>,
}

/// The stored form of a registration: the payload plus the server-assigned
/// submission time, flattened into a single document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationDocument {
    #[serde(flatten)]
    pub registration: RegistrationPayload,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterAck {
    pub message: String,
}

impl RegisterAck {
    pub fn success() -> Self {
        Self {
            message: REGISTER_SUCCESS.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub database: String,
}
