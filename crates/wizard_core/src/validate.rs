use std::{collections::HashMap, sync::OnceLock};

use regex::Regex;
use shared::domain::{Batch, ParticipationMode};

use crate::form::RegistrationDraft;
use crate::steps::{Step, StepKind};

/// Fields that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    TeamName,
    Name,
    Age,
    Email,
    Phone,
    Batch,
    EnrollmentNo,
    Degree,
    Course,
    InstituteName,
    InstituteName2,
}

impl Field {
    pub fn is_per_participant(self) -> bool {
        matches!(
            self,
            Field::Name
                | Field::Age
                | Field::Email
                | Field::Phone
                | Field::Batch
                | Field::EnrollmentNo
                | Field::Degree
                | Field::Course
        )
    }
}

/// Error-map key: a field plus the participant it belongs to. Fields that are
/// not per-participant always key to participant 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldKey {
    pub participant: usize,
    pub field: Field,
}

impl FieldKey {
    pub fn root(field: Field) -> Self {
        Self {
            participant: 0,
            field,
        }
    }

    pub fn for_participant(participant: usize, field: Field) -> Self {
        Self { participant, field }
    }
}

pub fn field_key_for(field: Field, participant: usize) -> FieldKey {
    if field.is_per_participant() {
        FieldKey::for_participant(participant, field)
    } else {
        FieldKey::root(field)
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{10}$").expect("phone pattern compiles"))
}

/// Checks one step of the draft and returns the errors it found. Only the
/// fields the step shows are checked; email and phone are matched raw, the
/// free-text fields are trimmed before the emptiness check.
pub fn validate_step(draft: &RegistrationDraft, step: Step) -> HashMap<FieldKey, String> {
    let mut errors = HashMap::new();
    let participant = step.participant;

    match step.kind {
        StepKind::Participation => {
            if draft.participation_mode == ParticipationMode::Duo
                && draft.team_name.trim().is_empty()
            {
                errors.insert(
                    FieldKey::root(Field::TeamName),
                    "Team name is required for Duo participation".to_string(),
                );
            }
        }
        StepKind::Personal => {
            let entry = &draft.participants[participant];
            if entry.name.trim().is_empty() {
                errors.insert(
                    FieldKey::for_participant(participant, Field::Name),
                    "Name is required".to_string(),
                );
            }
            let age_in_range = entry
                .age
                .trim()
                .parse::<i64>()
                .is_ok_and(|age| (10..=100).contains(&age));
            if !age_in_range {
                errors.insert(
                    FieldKey::for_participant(participant, Field::Age),
                    "Age must be between 10 and 100".to_string(),
                );
            }
        }
        StepKind::Contact => {
            let entry = &draft.participants[participant];
            if !email_pattern().is_match(&entry.email) {
                errors.insert(
                    FieldKey::for_participant(participant, Field::Email),
                    "Valid email required".to_string(),
                );
            }
            if !phone_pattern().is_match(&entry.phone) {
                errors.insert(
                    FieldKey::for_participant(participant, Field::Phone),
                    "Phone number must be 10 digits".to_string(),
                );
            }
        }
        StepKind::Academic => {
            let entry = &draft.participants[participant];
            if entry.batch.parse::<Batch>().is_err() {
                errors.insert(
                    FieldKey::for_participant(participant, Field::Batch),
                    "Batch is required".to_string(),
                );
            }
            if entry.enrollment_no.trim().is_empty() {
                errors.insert(
                    FieldKey::for_participant(participant, Field::EnrollmentNo),
                    "Enrollment number is required".to_string(),
                );
            }
            if entry.degree.trim().is_empty() {
                errors.insert(
                    FieldKey::for_participant(participant, Field::Degree),
                    "Degree is required".to_string(),
                );
            }
            if entry.course.trim().is_empty() {
                errors.insert(
                    FieldKey::for_participant(participant, Field::Course),
                    "Course is required".to_string(),
                );
            }
        }
        StepKind::Institute => {
            if draft.institute_name.trim().is_empty() {
                errors.insert(
                    FieldKey::root(Field::InstituteName),
                    "Institute name is required".to_string(),
                );
            }
            if draft.participation_mode == ParticipationMode::Duo
                && draft.institute_name2.trim().is_empty()
            {
                errors.insert(
                    FieldKey::root(Field::InstituteName2),
                    "Participant 2 institute name is required".to_string(),
                );
            }
        }
        StepKind::Submission | StepKind::Finish => {}
    }

    errors
}
