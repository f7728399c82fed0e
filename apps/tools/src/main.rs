use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use storage::{Storage, StoredRegistration};

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "sqlite://registrations.db")]
    database_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the registration store and ping it.
    Check,
    /// Print stored registrations, oldest first.
    List {
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// Print the number of stored registrations.
    Count,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Check => check(&cli.database_url).await,
        Command::List { limit } => {
            let storage = Storage::new(&cli.database_url).await?;
            let stored = storage.list_registrations(limit).await?;
            if stored.is_empty() {
                println!("no registrations stored");
            }
            for row in &stored {
                print_registration(row);
            }
            Ok(())
        }
        Command::Count => {
            let storage = Storage::new(&cli.database_url).await?;
            println!("{}", storage.count_registrations().await?);
            Ok(())
        }
    }
}

async fn check(database_url: &str) -> Result<()> {
    println!("target: {database_url}");
    println!("attempting connection (5s timeout)...");

    let storage = tokio::time::timeout(Duration::from_secs(5), Storage::new(database_url))
        .await
        .context("timed out opening the registration store")?
        .with_context(|| format!("failed to open the registration store at '{database_url}'"))?;
    storage.health_check().await.context("store ping failed")?;

    let count = storage.count_registrations().await?;
    println!("connected; {count} registrations stored");
    Ok(())
}

fn print_registration(stored: &StoredRegistration) {
    let registration = &stored.document.registration;
    let names = registration
        .participants
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    println!(
        "{:>4}  {}  {:<4}  {:<16}  {}",
        stored.id,
        stored.document.submitted_at.to_rfc3339(),
        registration.participation_mode.as_str(),
        registration.team_name.as_deref().unwrap_or("-"),
        names,
    );
}
