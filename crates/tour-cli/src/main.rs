//! `tourbook` CLI — list open tour slots and book tours from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Register the demo realtors in tours.json
//! tourbook seed
//!
//! # List realtors and their ids
//! tourbook realtors
//!
//! # Show slots for a realtor on a date
//! tourbook slots --realtor <ID> --date 2026-03-16
//!
//! # Block a lunch hour, or a whole day when no times are given
//! tourbook block --realtor <ID> --date 2026-03-16 --start 12:00 --end 13:00 --reason Lunch
//!
//! # Book a 30-minute tour (end defaults to start + one slot)
//! tourbook book --realtor <ID> --date 2026-03-16 --start 10:00 \
//!     --name "Ann Lee" --email ann@example.com --phone "(555) 000-0000"
//!
//! # Evaluate against a fixed instant instead of the system clock
//! tourbook --now 2026-03-10T12:00:00Z slots --realtor <ID> --date 2026-03-16
//! ```
//!
//! Set `RUST_LOG=tour_engine=debug` to see engine logs on stderr.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use fd_lock::RwLock;
use serde_json::json;
use tour_engine::model::NewBlockedInterval;
use tour_engine::store::{seed_sample_realtors, BlockedSlotStore, RealtorDirectory};
use tour_engine::{
    slot_end, BookingId, BookingRequest, ClientInfo, Clock, EngineConfig, FixedClock, MemoryStore,
    RealtorId, Scheduler, SystemClock, TimeOfDay,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tourbook", version, about = "Realtor tour slot and booking CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file holding realtors, blocked slots and tours
    #[arg(long, default_value = "tours.json", global = true)]
    data: PathBuf,

    /// TOML engine configuration (granularity_minutes, cutoff)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Evaluate as if the current instant were this RFC 3339 timestamp
    #[arg(long, global = true)]
    now: Option<DateTime<Utc>>,
}

#[derive(Subcommand)]
enum Commands {
    /// Register the two demo realtors
    Seed,
    /// List realtors
    Realtors,
    /// Show every slot for a realtor on a date and whether it can be booked
    Slots {
        #[arg(long)]
        realtor: String,
        #[arg(long)]
        date: NaiveDate,
    },
    /// Block part or all of a date
    Block {
        #[arg(long)]
        realtor: String,
        #[arg(long)]
        date: NaiveDate,
        /// Window start (omit with --end to block the whole day)
        #[arg(long, requires = "end")]
        start: Option<TimeOfDay>,
        #[arg(long, requires = "start")]
        end: Option<TimeOfDay>,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Book a tour
    Book {
        #[arg(long)]
        realtor: String,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        start: TimeOfDay,
        /// Defaults to start plus one slot
        #[arg(long)]
        end: Option<TimeOfDay>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List active tours for a realtor on a date
    Tours {
        #[arg(long)]
        realtor: String,
        #[arg(long)]
        date: NaiveDate,
    },
    /// Confirm a tour
    Confirm { id: String },
    /// Cancel a tour, freeing its slot
    Cancel { id: String },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => EngineConfig::default(),
    };

    // Held until exit so each invocation's load-modify-save is exclusive.
    let mut lock = RwLock::new(open_lock_file(&cli.data)?);
    let _guard = lock
        .write()
        .with_context(|| format!("Failed to lock data file: {}", cli.data.display()))?;

    let store = MemoryStore::load(&cli.data)
        .with_context(|| format!("Failed to read data file: {}", cli.data.display()))?;

    match cli.now {
        Some(now) => run(cli.command, &cli.data, Scheduler::new(store, FixedClock(now), config)?),
        None => run(cli.command, &cli.data, Scheduler::new(store, SystemClock, config)?),
    }
}

fn run<C: Clock>(command: Commands, data: &Path, scheduler: Scheduler<MemoryStore, C>) -> Result<()> {
    match command {
        Commands::Seed => {
            let ids = seed_sample_realtors(scheduler.store())?;
            save(&scheduler, data)?;
            print_json(&ids)?;
        }
        Commands::Realtors => {
            print_json(&scheduler.store().list_realtors()?)?;
        }
        Commands::Slots { realtor, date } => {
            let slots = scheduler
                .day_slots(&RealtorId(realtor), date)
                .context("Failed to list slots")?;
            print_json(&slots)?;
        }
        Commands::Block {
            realtor,
            date,
            start,
            end,
            reason,
        } => {
            let realtor_id = RealtorId(realtor);
            scheduler.realtor(&realtor_id)?;
            let id = scheduler.store().create_blocked(NewBlockedInterval {
                realtor_id,
                date,
                start_time: start,
                end_time: end,
                reason,
                is_recurring: None,
            })?;
            save(&scheduler, data)?;
            print_json(&json!({ "id": id }))?;
        }
        Commands::Book {
            realtor,
            date,
            start,
            end,
            name,
            email,
            phone,
            notes,
        } => {
            let end_time = match end {
                Some(end) => end,
                None => slot_end(start, scheduler.config().granularity_minutes)?,
            };
            let request = BookingRequest {
                realtor_id: RealtorId(realtor),
                date,
                start_time: start,
                end_time,
                client: ClientInfo {
                    client_name: name,
                    client_email: email,
                    client_phone: phone,
                },
                notes,
            };
            let id = scheduler
                .propose_booking(request)
                .context("Failed to schedule tour")?;
            save(&scheduler, data)?;
            print_json(&json!({ "id": id }))?;
        }
        Commands::Tours { realtor, date } => {
            print_json(&scheduler.tours(&RealtorId(realtor), date)?)?;
        }
        Commands::Confirm { id } => {
            let tour = scheduler.confirm(&BookingId(id))?;
            save(&scheduler, data)?;
            print_json(&tour)?;
        }
        Commands::Cancel { id } => {
            let tour = scheduler.cancel(&BookingId(id))?;
            save(&scheduler, data)?;
            print_json(&tour)?;
        }
    }

    Ok(())
}

/// Sidecar lock file next to the data file; the data file itself is replaced on save.
fn open_lock_file(data: &Path) -> Result<std::fs::File> {
    let mut name = data.as_os_str().to_owned();
    name.push(".lock");
    let path = PathBuf::from(name);
    OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&path)
        .with_context(|| format!("Failed to open lock file: {}", path.display()))
}

fn save<C: Clock>(scheduler: &Scheduler<MemoryStore, C>, path: &Path) -> Result<()> {
    scheduler
        .store()
        .save(path)
        .with_context(|| format!("Failed to write data file: {}", path.display()))?;
    debug!(path = %path.display(), "saved data file");
    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
