use std::collections::HashMap;

use shared::domain::ParticipationMode;
use tracing::{debug, warn};

use crate::{
    form::RegistrationDraft,
    gateway::RegistrationGateway,
    steps::{expand_steps, Step, StepKind},
    validate::{field_key_for, validate_step, Field, FieldKey},
};

/// What a call to [`Wizard::advance`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The current step failed validation; the errors are on the wizard.
    Blocked,
    /// Moved forward one step.
    Moved,
    /// The registration was accepted and the flow is on the final step.
    Submitted,
    /// Submission was attempted and failed; the message is on the wizard.
    Failed,
    /// Nothing to do: already on the last step, or a submission is in flight.
    Ignored,
}

/// Multi-step registration flow. Holds the draft being filled in, the step
/// sequence for the current mode, and whatever validation or submission
/// errors are currently showing.
#[derive(Debug)]
pub struct Wizard {
    draft: RegistrationDraft,
    steps: Vec<Step>,
    current: usize,
    review_index: usize,
    errors: HashMap<FieldKey, String>,
    is_submitting: bool,
    submit_error: Option<String>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        let draft = RegistrationDraft::default();
        let steps = expand_steps(draft.participation_mode);
        Self {
            draft,
            steps,
            current: 0,
            review_index: 0,
            errors: HashMap::new(),
            is_submitting: false,
            submit_error: None,
        }
    }

    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> Step {
        self.steps[self.current]
    }

    pub fn review_index(&self) -> usize {
        self.review_index
    }

    pub fn errors(&self) -> &HashMap<FieldKey, String> {
        &self.errors
    }

    /// Error for `field` as addressed from the current step.
    pub fn error_for(&self, field: Field) -> Option<&str> {
        let key = field_key_for(field, self.current_step().participant);
        self.errors.get(&key).map(String::as_str)
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn is_finished(&self) -> bool {
        self.current_step().kind == StepKind::Finish
    }

    /// Writes `value` into `field`, addressed to the participant the current
    /// step belongs to, and clears any error showing for that field.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let participant = self.current_step().participant;
        let value = value.into();
        match field {
            Field::TeamName => self.draft.team_name = value,
            Field::Name => self.draft.participants[participant].name = value,
            Field::Age => self.draft.participants[participant].age = value,
            Field::Email => self.draft.participants[participant].email = value,
            Field::Phone => self.draft.participants[participant].phone = value,
            Field::Batch => self.draft.participants[participant].batch = value,
            Field::EnrollmentNo => self.draft.participants[participant].enrollment_no = value,
            Field::Degree => self.draft.participants[participant].degree = value,
            Field::Course => self.draft.participants[participant].course = value,
            Field::InstituteName => self.draft.institute_name = value,
            Field::InstituteName2 => self.draft.institute_name2 = value,
        }
        self.errors.remove(&field_key_for(field, participant));
    }

    /// Switching mode discards everything entered so far and restarts the
    /// flow from the first step.
    pub fn set_participation_mode(&mut self, mode: ParticipationMode) {
        self.draft = RegistrationDraft {
            participation_mode: mode,
            ..RegistrationDraft::default()
        };
        self.steps = expand_steps(mode);
        self.current = 0;
        self.review_index = 0;
        self.errors.clear();
        self.is_submitting = false;
        self.submit_error = None;
    }

    /// Runs the current step's checks, replacing the error map with the
    /// result. Returns whether the step passed.
    pub fn validate_current_step(&mut self) -> bool {
        self.errors = validate_step(&self.draft, self.current_step());
        self.errors.is_empty()
    }

    /// Validates the current step and moves forward. On the review step,
    /// forward means submitting through `gateway`.
    pub async fn advance<G>(&mut self, gateway: &G) -> AdvanceOutcome
    where
        G: RegistrationGateway + ?Sized,
    {
        if self.is_submitting {
            return AdvanceOutcome::Ignored;
        }
        if !self.validate_current_step() {
            return AdvanceOutcome::Blocked;
        }
        if self.current + 1 >= self.steps.len() {
            return AdvanceOutcome::Ignored;
        }
        if self.current_step().kind == StepKind::Submission {
            return self.submit(gateway).await;
        }
        self.current += 1;
        AdvanceOutcome::Moved
    }

    async fn submit<G>(&mut self, gateway: &G) -> AdvanceOutcome
    where
        G: RegistrationGateway + ?Sized,
    {
        let payload = match self.draft.to_payload() {
            Ok(payload) => payload,
            Err(err) => {
                self.submit_error = Some(format!("Failed to save data: {err}"));
                return AdvanceOutcome::Failed;
            }
        };

        self.is_submitting = true;
        self.submit_error = None;
        let result = gateway.submit(&payload).await;
        self.is_submitting = false;

        match result {
            Ok(ack) => {
                debug!(message = %ack.message, "registration accepted");
                self.current += 1;
                AdvanceOutcome::Submitted
            }
            Err(err) => {
                warn!(%err, "registration submission failed");
                self.submit_error = Some(format!("Failed to save data: {err}"));
                AdvanceOutcome::Failed
            }
        }
    }

    /// Steps back one step. Entered values and errors are kept.
    pub fn retreat(&mut self) {
        if self.is_submitting {
            return;
        }
        if self.current > 0 {
            self.current -= 1;
        }
    }

    /// Picks which participant the review step is showing. Out-of-range
    /// indices are ignored.
    pub fn set_review_index(&mut self, index: usize) {
        if index < self.draft.participation_mode.participant_count() {
            self.review_index = index;
        }
    }

    /// Institute name for the participant the review step is showing.
    pub fn review_institute_name(&self) -> &str {
        match self.review_index {
            0 => &self.draft.institute_name,
            _ => &self.draft.institute_name2,
        }
    }

    /// Clears a submission that was abandoned mid-flight (its future was
    /// dropped) so the flow can submit again.
    pub fn cancel_submission(&mut self) {
        self.is_submitting = false;
    }
}
