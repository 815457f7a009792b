//! Renewal report entry point.
//!
//! # Responsibility
//! - Load configuration (optional `.env` file, then environment).
//! - Print each dog's age, last vet visit and renewal worklist.

use chrono::{Local, NaiveDate};
use clap::Parser;
use doghealth_core::repo::dog_repo::SqliteDogRepository;
use doghealth_core::repo::medical_event_repo::SqliteMedicalEventRepository;
use doghealth_core::service::profile_service::{DogProfile, ProfileService};
use doghealth_core::{init_logging, open_db, CoreConfig};
use log::info;
use std::error::Error;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "doghealth", version, about = "Print treatment renewals for every dog")]
struct Args {
    /// Reference date (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// Database file; overrides DOGHEALTH_DB_PATH.
    #[arg(long)]
    db: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut config = CoreConfig::from_env()?;
    if let Some(db) = args.db {
        config.db_path = db;
    }
    if let Some(log_dir) = &config.log_dir {
        init_logging(config.log_level, log_dir)?;
    }

    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let conn = open_db(&config.db_path)?;
    let profiles = ProfileService::new(
        SqliteDogRepository::try_new(&conn)?,
        SqliteMedicalEventRepository::try_new(&conn)?,
    );

    let all = profiles.all_profiles(as_of)?;
    info!(
        "event=renewal_report module=cli status=ok dog_count={}",
        all.len()
    );

    if all.is_empty() {
        println!("No dogs recorded in {}", config.db_path.display());
        return Ok(());
    }
    for profile in &all {
        print_profile(profile);
    }
    Ok(())
}

fn print_profile(profile: &DogProfile) {
    let board = &profile.board;
    println!("{}: {}", profile.dog.name, profile.age);
    println!("  Last vet visit: {}", date_or_no_data(board.last_vet_visit));
    for row in board.rows() {
        println!(
            "  {:<24} {:<12} {}",
            row.name,
            date_or_no_data(row.renewal_date),
            row.status
        );
    }

    let due = board.renewals_due();
    if due.is_empty() {
        println!("  Nothing due as of {}", board.as_of);
    } else {
        let names: Vec<&str> = due.iter().map(|row| row.name.as_str()).collect();
        println!("  Due as of {}: {}", board.as_of, names.join(", "));
    }
}

fn date_or_no_data(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "No data".to_string(), |date| date.to_string())
}
