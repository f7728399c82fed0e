use shared::{domain::StoreStatus, error::RegisterFailure, protocol::RegistrationPayload};
use storage::{Storage, StoredRegistration};
use tracing::warn;

#[derive(Clone)]
pub struct ApiContext {
    pub store: StoreGate,
}

/// Outcome of the startup connection attempt. A disconnected gate keeps the
/// process serving; writes fail fast and report the store status instead.
#[derive(Clone)]
pub enum StoreGate {
    Connected(Storage),
    Disconnected,
}

impl StoreGate {
    pub fn status(&self) -> StoreStatus {
        match self {
            StoreGate::Connected(_) => StoreStatus::Connected,
            StoreGate::Disconnected => StoreStatus::Disconnected,
        }
    }
}

/// Persists one registration document. The gate is consulted before any
/// write; resubmitting an identical payload creates a second document.
pub async fn create_registration(
    ctx: &ApiContext,
    registration: RegistrationPayload,
) -> Result<StoredRegistration, RegisterFailure> {
    let StoreGate::Connected(storage) = &ctx.store else {
        warn!("rejected registration while the store is unreachable");
        return Err(RegisterFailure::new(
            "Database is not connected",
            StoreStatus::Disconnected,
        ));
    };

    storage
        .insert_registration(&registration)
        .await
        .map_err(|err| persist_failure(&err))
}

fn persist_failure(err: &anyhow::Error) -> RegisterFailure {
    RegisterFailure::new(err.to_string(), StoreStatus::Connected)
}
