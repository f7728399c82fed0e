use super::*;
use shared::domain::{Batch, ParticipationMode};
use shared::protocol::ParticipantRecord;

fn participant(name: &str) -> ParticipantRecord {
    ParticipantRecord {
        name: name.to_string(),
        age: 20,
        email: format!("{}@campus.edu", name.to_lowercase()),
        phone: "9000000001".to_string(),
        batch: Batch::Y2026,
        enrollment_no: "EN-100".to_string(),
        degree: "B.Tech".to_string(),
        course: "ECE".to_string(),
    }
}

fn solo_registration(name: &str) -> RegistrationPayload {
    RegistrationPayload {
        participation_mode: ParticipationMode::Solo,
        team_name: None,
        participants: vec![participant(name)],
        institute_name: "IIT Delhi".to_string(),
        institute_name2: None,
    }
}

fn duo_registration() -> RegistrationPayload {
    RegistrationPayload {
        participation_mode: ParticipationMode::Duo,
        team_name: Some("Night Owls".to_string()),
        participants: vec![participant("Asha"), participant("Ravi")],
        institute_name: "IIT Delhi".to_string(),
        institute_name2: Some("NIT Trichy".to_string()),
    }
}

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.health_check().await.expect("health check");
}

#[tokio::test]
async fn creates_database_file_when_missing() {
    let temp_root = tempfile::tempdir().expect("temp dir");
    let db_path = temp_root.path().join("nested").join("registrations.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let storage = Storage::new(&database_url).await.expect("db");
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should exist: {}",
        db_path.display()
    );
}

#[tokio::test]
async fn insert_assigns_ids_and_submission_time() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let before = Utc::now();
    let stored = storage
        .insert_registration(&solo_registration("Asha"))
        .await
        .expect("insert");

    assert!(stored.id > 0);
    assert!(stored.document.submitted_at >= before);
    assert_eq!(stored.document.registration.participants[0].name, "Asha");
}

#[tokio::test]
async fn resubmission_stores_a_second_document() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let registration = solo_registration("Asha");

    let first = storage
        .insert_registration(&registration)
        .await
        .expect("first insert");
    let second = storage
        .insert_registration(&registration)
        .await
        .expect("second insert");

    assert_ne!(first.id, second.id);
    assert_eq!(storage.count_registrations().await.expect("count"), 2);
}

#[tokio::test]
async fn list_returns_most_recent_oldest_first() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    for name in ["Asha", "Ravi", "Meera"] {
        storage
            .insert_registration(&solo_registration(name))
            .await
            .expect("insert");
    }

    let newest_two = storage.list_registrations(2).await.expect("list");
    assert_eq!(newest_two.len(), 2);
    assert_eq!(
        newest_two[0].document.registration.participants[0].name,
        "Ravi"
    );
    assert_eq!(
        newest_two[1].document.registration.participants[0].name,
        "Meera"
    );
    assert!(newest_two[0].id < newest_two[1].id);
}

#[tokio::test]
async fn stored_document_keeps_wire_field_names() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage
        .insert_registration(&duo_registration())
        .await
        .expect("insert");

    let raw: String = sqlx::query_scalar("SELECT document FROM registrations LIMIT 1")
        .fetch_one(storage.pool())
        .await
        .expect("raw document");

    for field in [
        "\"participationMode\":\"duo\"",
        "\"teamName\":\"Night Owls\"",
        "\"enrollmentNo\":\"EN-100\"",
        "\"instituteName2\":\"NIT Trichy\"",
        "\"submittedAt\":",
    ] {
        assert!(raw.contains(field), "document missing {field}: {raw}");
    }
}
