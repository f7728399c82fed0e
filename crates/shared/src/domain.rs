use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParticipationMode {
    #[default]
    Solo,
    Duo,
}

impl ParticipationMode {
    pub fn participant_count(self) -> usize {
        match self {
            ParticipationMode::Solo => 1,
            ParticipationMode::Duo => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ParticipationMode::Solo => "solo",
            ParticipationMode::Duo => "duo",
        }
    }
}

impl FromStr for ParticipationMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "solo" => Ok(ParticipationMode::Solo),
            "duo" => Ok(ParticipationMode::Duo),
            other => Err(format!("unknown participation mode '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Batch {
    #[serde(rename = "2026")]
    Y2026,
    #[serde(rename = "2027")]
    Y2027,
    #[serde(rename = "2028")]
    Y2028,
    #[serde(rename = "2029")]
    Y2029,
}

impl Batch {
    pub const ALL: [Batch; 4] = [Batch::Y2026, Batch::Y2027, Batch::Y2028, Batch::Y2029];

    pub fn as_str(self) -> &'static str {
        match self {
            Batch::Y2026 => "2026",
            Batch::Y2027 => "2027",
            Batch::Y2028 => "2028",
            Batch::Y2029 => "2029",
        }
    }
}

impl FromStr for Batch {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "2026" => Ok(Batch::Y2026),
            "2027" => Ok(Batch::Y2027),
            "2028" => Ok(Batch::Y2028),
            "2029" => Ok(Batch::Y2029),
            other => Err(format!("unknown batch '{other}'")),
        }
    }
}

/// Connectivity of the registration store, carried on the wire as the
/// numeric code clients already know (`dbStatus`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum StoreStatus {
    Disconnected = 0,
    Connected = 1,
    Connecting = 2,
}

impl StoreStatus {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn is_connected(self) -> bool {
        self == StoreStatus::Connected
    }
}

impl From<StoreStatus> for u8 {
    fn from(status: StoreStatus) -> Self {
        status as u8
    }
}

impl TryFrom<u8> for StoreStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(StoreStatus::Disconnected),
            1 => Ok(StoreStatus::Connected),
            2 => Ok(StoreStatus::Connecting),
            other => Err(format!("unknown store status code {other}")),
        }
    }
}
