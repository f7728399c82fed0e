use shared::{
    domain::{Batch, ParticipationMode},
    protocol::{ParticipantRecord, RegistrationPayload},
};
use thiserror::Error;

/// Raw text captured for one participant before any parsing happens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantDraft {
    pub name: String,
    pub age: String,
    pub email: String,
    pub phone: String,
    pub batch: String,
    pub enrollment_no: String,
    pub degree: String,
    pub course: String,
}

/// Everything the flow collects. Both participant slots always exist; solo
/// mode never reads the second one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationDraft {
    pub participation_mode: ParticipationMode,
    pub team_name: String,
    pub participants: [ParticipantDraft; 2],
    pub institute_name: String,
    pub institute_name2: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("participant {participant}: age '{value}' is not a whole number")]
    InvalidAge { participant: usize, value: String },
    #[error("participant {participant}: unknown batch '{value}'")]
    UnknownBatch { participant: usize, value: String },
}

impl RegistrationDraft {
    /// Builds the wire payload for the active mode. Only the participants the
    /// mode uses are included, and the duo-only fields are omitted for solo.
    /// Text fields are sent exactly as entered.
    pub fn to_payload(&self) -> Result<RegistrationPayload, DraftError> {
        let mode = self.participation_mode;
        let participants = self.participants[..mode.participant_count()]
            .iter()
            .enumerate()
            .map(|(index, draft)| draft.to_record(index))
            .collect::<Result<Vec<_>, _>>()?;

        let (team_name, institute_name2) = match mode {
            ParticipationMode::Solo => (None, None),
            ParticipationMode::Duo => (
                Some(self.team_name.clone()),
                Some(self.institute_name2.clone()),
            ),
        };

        Ok(RegistrationPayload {
            participation_mode: mode,
            team_name,
            participants,
            institute_name: self.institute_name.clone(),
            institute_name2,
        })
    }
}

impl ParticipantDraft {
    fn to_record(&self, index: usize) -> Result<ParticipantRecord, DraftError> {
        let age = self
            .age
            .trim()
            .parse::<u8>()
            .map_err(|_| DraftError::InvalidAge {
                participant: index + 1,
                value: self.age.clone(),
            })?;
        let batch = self
            .batch
            .parse::<Batch>()
            .map_err(|_| DraftError::UnknownBatch {
                participant: index + 1,
                value: self.batch.clone(),
            })?;

        Ok(ParticipantRecord {
            name: self.name.clone(),
            age,
            email: self.email.clone(),
            phone: self.phone.clone(),
            batch,
            enrollment_no: self.enrollment_no.clone(),
            degree: self.degree.clone(),
            course: self.course.clone(),
        })
    }
}
