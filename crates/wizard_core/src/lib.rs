//! Client-side state machine for the event registration flow: the step
//! sequence, the form draft, per-step validation, and submission to the
//! registration endpoint.

pub mod form;
pub mod gateway;
pub mod steps;
pub mod validate;
pub mod wizard;

pub use form::{DraftError, ParticipantDraft, RegistrationDraft};
pub use gateway::{
    GatewayError, HttpRegistrationGateway, RegistrationGateway, DEFAULT_SUBMIT_TIMEOUT,
};
pub use steps::{expand_steps, Step, StepKind, STEP_TEMPLATE};
pub use validate::{field_key_for, validate_step, Field, FieldKey};
pub use wizard::{AdvanceOutcome, Wizard};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
