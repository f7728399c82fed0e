use std::io::Write;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use shared::domain::ParticipationMode;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::debug;
use wizard_core::{
    AdvanceOutcome, Field, HttpRegistrationGateway, RegistrationDraft, StepKind, Wizard,
};

#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "http://localhost:5000")]
    server_url: String,
    /// Seconds to wait for the registration endpoint before giving up.
    #[arg(long, default_value_t = 30)]
    submit_timeout_secs: u64,
}

type InputLines = Lines<BufReader<Stdin>>;

enum Reply {
    Back,
    Keep,
    Value(String),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("warn").init();
    let args = Args::parse();

    let gateway = HttpRegistrationGateway::with_timeout(
        &args.server_url,
        Duration::from_secs(args.submit_timeout_secs),
    )?;
    debug!(server_url = %args.server_url, "registration gateway ready");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut wizard = Wizard::new();

    println!("Event registration at {}", args.server_url);
    println!("Enter 'back' on any field to return to the previous step.");
    println!();

    while !wizard.is_finished() {
        let step = wizard.current_step();
        println!("== {} ==", step.label(wizard.draft().participation_mode));
        match step.kind {
            StepKind::Participation => {
                run_participation_step(&mut wizard, &gateway, &mut lines).await?;
            }
            StepKind::Personal | StepKind::Contact | StepKind::Academic | StepKind::Institute => {
                let fields = step_fields(step.kind, wizard.draft().participation_mode);
                run_form_step(&mut wizard, &gateway, &fields, &mut lines).await?;
            }
            StepKind::Submission => {
                run_review_step(&mut wizard, &gateway, &mut lines).await?;
            }
            StepKind::Finish => {}
        }
        println!();
    }

    println!("== {} ==", wizard.current_step().label(wizard.draft().participation_mode));
    println!("Registration Successful!");
    println!("Thank you for letting us know who you are.");
    Ok(())
}

fn step_fields(kind: StepKind, mode: ParticipationMode) -> Vec<(Field, &'static str)> {
    match kind {
        StepKind::Personal => vec![(Field::Name, "Name"), (Field::Age, "Age")],
        StepKind::Contact => vec![(Field::Email, "Email"), (Field::Phone, "Phone (10 digits)")],
        StepKind::Academic => vec![
            (Field::Batch, "Batch (2026-2029)"),
            (Field::EnrollmentNo, "Enrollment number"),
            (Field::Degree, "Degree"),
            (Field::Course, "Course"),
        ],
        StepKind::Institute => {
            let mut fields = vec![(Field::InstituteName, "Institute name")];
            if mode == ParticipationMode::Duo {
                fields.push((Field::InstituteName2, "Participant 2 institute name"));
            }
            fields
        }
        StepKind::Participation | StepKind::Submission | StepKind::Finish => Vec::new(),
    }
}

async fn run_form_step(
    wizard: &mut Wizard,
    gateway: &HttpRegistrationGateway,
    fields: &[(Field, &'static str)],
    lines: &mut InputLines,
) -> Result<()> {
    for (field, label) in fields {
        match prompt(label, &field_value(wizard, *field), lines).await? {
            Reply::Back => {
                wizard.retreat();
                return Ok(());
            }
            Reply::Keep => {}
            Reply::Value(value) => wizard.set_field(*field, value),
        }
    }
    if wizard.advance(gateway).await == AdvanceOutcome::Blocked {
        print_step_errors(wizard, fields);
    }
    Ok(())
}

async fn run_participation_step(
    wizard: &mut Wizard,
    gateway: &HttpRegistrationGateway,
    lines: &mut InputLines,
) -> Result<()> {
    let current = wizard.draft().participation_mode;
    match prompt("Mode (solo/duo)", current.as_str(), lines).await? {
        Reply::Back => {
            wizard.retreat();
            return Ok(());
        }
        Reply::Keep => {}
        Reply::Value(value) => match value.parse::<ParticipationMode>() {
            Ok(mode) if mode != current => {
                if draft_started(wizard.draft()) && !confirm_mode_reset(lines).await? {
                    return Ok(());
                }
                wizard.set_participation_mode(mode);
            }
            Ok(_) => {}
            Err(err) => {
                println!("  ! {err}");
                return Ok(());
            }
        },
    }

    if wizard.draft().participation_mode == ParticipationMode::Duo {
        match prompt("Team name", &field_value(wizard, Field::TeamName), lines).await? {
            Reply::Back => {
                wizard.retreat();
                return Ok(());
            }
            Reply::Keep => {}
            Reply::Value(value) => wizard.set_field(Field::TeamName, value),
        }
    }

    if wizard.advance(gateway).await == AdvanceOutcome::Blocked {
        print_step_errors(wizard, &[(Field::TeamName, "Team name")]);
    }
    Ok(())
}

async fn run_review_step(
    wizard: &mut Wizard,
    gateway: &HttpRegistrationGateway,
    lines: &mut InputLines,
) -> Result<()> {
    render_review(wizard);

    let duo = wizard.draft().participation_mode == ParticipationMode::Duo;
    if duo {
        print!("submit / back / '<' or '>' to switch participant: ");
    } else {
        print!("submit / back: ");
    }
    std::io::stdout().flush()?;

    match read_reply(lines).await?.as_str() {
        "back" => wizard.retreat(),
        "<" => wizard.set_review_index(wizard.review_index().saturating_sub(1)),
        ">" => wizard.set_review_index(wizard.review_index() + 1),
        "submit" | "" => {
            println!("Submitting...");
            // Failure is rendered as a banner on the re-drawn review.
            let _ = wizard.advance(gateway).await;
        }
        other => println!("  ! unknown command '{other}'"),
    }
    Ok(())
}

fn render_review(wizard: &Wizard) {
    let draft = wizard.draft();
    if let Some(message) = wizard.submit_error() {
        println!("  ! {message}");
    }
    println!("Mode: {}", draft.participation_mode.as_str());
    if draft.participation_mode == ParticipationMode::Duo {
        println!("Team: {}", draft.team_name);
        println!("Participant {} of 2:", wizard.review_index() + 1);
    }
    let participant = &draft.participants[wizard.review_index()];
    println!("  Name:      {}", participant.name);
    println!("  Age:       {}", participant.age);
    println!("  Email:     {}", participant.email);
    println!("  Phone:     {}", participant.phone);
    println!("  Batch:     {}", participant.batch);
    println!("  Course:    {}", participant.course);
    println!("  Institute: {}", wizard.review_institute_name());
}

fn print_step_errors(wizard: &Wizard, fields: &[(Field, &'static str)]) {
    for (field, _) in fields {
        if let Some(message) = wizard.error_for(*field) {
            println!("  ! {message}");
        }
    }
}

fn field_value(wizard: &Wizard, field: Field) -> String {
    let draft = wizard.draft();
    let participant = &draft.participants[wizard.current_step().participant];
    match field {
        Field::TeamName => draft.team_name.clone(),
        Field::Name => participant.name.clone(),
        Field::Age => participant.age.clone(),
        Field::Email => participant.email.clone(),
        Field::Phone => participant.phone.clone(),
        Field::Batch => participant.batch.clone(),
        Field::EnrollmentNo => participant.enrollment_no.clone(),
        Field::Degree => participant.degree.clone(),
        Field::Course => participant.course.clone(),
        Field::InstituteName => draft.institute_name.clone(),
        Field::InstituteName2 => draft.institute_name2.clone(),
    }
}

fn draft_started(draft: &RegistrationDraft) -> bool {
    let blank = RegistrationDraft {
        participation_mode: draft.participation_mode,
        ..RegistrationDraft::default()
    };
    *draft != blank
}

async fn confirm_mode_reset(lines: &mut InputLines) -> Result<bool> {
    print!("Switching mode clears everything entered so far. Continue? (y/N): ");
    std::io::stdout().flush()?;
    Ok(read_reply(lines).await?.eq_ignore_ascii_case("y"))
}

async fn prompt(label: &str, current: &str, lines: &mut InputLines) -> Result<Reply> {
    if current.is_empty() {
        print!("{label}: ");
    } else {
        print!("{label} [{current}]: ");
    }
    std::io::stdout().flush()?;
    let reply = read_reply(lines).await?;
    Ok(match reply.as_str() {
        "back" => Reply::Back,
        "" => Reply::Keep,
        _ => Reply::Value(reply),
    })
}

async fn read_reply(lines: &mut InputLines) -> Result<String> {
    match lines.next_line().await? {
        Some(line) => Ok(line.trim().to_string()),
        None => bail!("input ended before the registration finished"),
    }
}
