//! `rehearsal` CLI: room board, availability checks and booking from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Which rooms are free at 14:00, from exported JSON files
//! rehearsal board --date 2026-03-16 --at 14:00 --rooms rooms.json --reservations day.json
//!
//! # Is a room free for an interval? Lists what blocks it.
//! rehearsal check --room sala-1 --from 14:00 --to 16:00 --date 2026-03-16 -r day.json
//!
//! # Free windows of a room, at least an hour long
//! rehearsal free --room sala-1 --date 2026-03-16 -r day.json --min 60
//!
//! # Validate a booking request before sending it
//! rehearsal validate -i request.json
//!
//! # Default end of the quick one-hour slot
//! rehearsal end-time 14:00
//!
//! # Against the backend (token from ENCENNA_TOKEN)
//! rehearsal remote board --date 2026-03-16 --at 14:00
//! rehearsal remote book -i request.json
//! ```

use std::io::{self, Read};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rehearsal_client::config::DEFAULT_BASE_URL;
use rehearsal_client::{BookingWorkflow, ClientConfig, RestClient, RoomCatalog, Session};
use rehearsal_engine::{
    default_end_time, filter_rooms, find_conflicts, format_time, free_windows, parse_date,
    parse_time, room_board, validate_booking_request, AvailabilityQuery, BookingPolicy,
    BookingRequest, DaySnapshot, Reservation, Role, Room, RoomAvailability, RoomId, TimeRange,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rehearsal",
    version,
    about = "Rehearsal-room board and booking for the Encenna console"
)]
struct Cli {
    /// More log output on stderr (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// A point in time or an interval.
#[derive(Args)]
struct SlotArgs {
    /// Point in time (HH:MM)
    #[arg(long, conflicts_with_all = ["from", "to"], required_unless_present = "from")]
    at: Option<String>,
    /// Interval start (HH:MM)
    #[arg(long, requires = "to")]
    from: Option<String>,
    /// Interval end (HH:MM)
    #[arg(long, requires = "from")]
    to: Option<String>,
}

impl SlotArgs {
    fn query(&self) -> Result<AvailabilityQuery> {
        match (&self.at, &self.from, &self.to) {
            (Some(at), _, _) => Ok(AvailabilityQuery::At(parse_time(at)?)),
            (None, Some(from), Some(to)) => Ok(AvailabilityQuery::Between(TimeRange::parse(from, to)?)),
            _ => anyhow::bail!("Give either --at or both --from and --to"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show which rooms are free for a slot
    Board {
        /// Date of the board (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        #[command(flatten)]
        slot: SlotArgs,
        /// JSON file with the room catalog
        #[arg(long)]
        rooms: String,
        /// JSON file with the day's reservations (all rooms show free if omitted)
        #[arg(short, long)]
        reservations: Option<String>,
        /// Only rooms whose name contains this text
        #[arg(long)]
        filter: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Check one room for a slot and list what blocks it
    Check {
        /// Room identifier
        #[arg(long)]
        room: String,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        #[command(flatten)]
        slot: SlotArgs,
        /// JSON file with the day's reservations (reads from stdin if omitted)
        #[arg(short, long)]
        reservations: Option<String>,
    },
    /// List free windows of a room within opening hours
    Free {
        /// Room identifier
        #[arg(long)]
        room: String,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// JSON file with the day's reservations (reads from stdin if omitted)
        #[arg(short, long)]
        reservations: Option<String>,
        /// Opening time (HH:MM)
        #[arg(long, default_value = "08:00")]
        open: String,
        /// Closing time (HH:MM)
        #[arg(long, default_value = "22:00")]
        close: String,
        /// Only windows of at least this many minutes
        #[arg(long)]
        min: Option<i64>,
    },
    /// Validate a booking request (JSON) without submitting it
    Validate {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Quick one-hour booking: no participant minimum, end time optional
        #[arg(long)]
        quick: bool,
    },
    /// Print the default end of a one-hour slot
    EndTime {
        /// Start time (HH:MM)
        start: String,
    },
    /// Talk to the school backend
    Remote {
        #[command(flatten)]
        conn: RemoteArgs,
        #[command(subcommand)]
        command: RemoteCommands,
    },
}

#[derive(Args)]
struct RemoteArgs {
    /// Backend base URL
    #[arg(long, env = "ENCENNA_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Bearer token of the logged-in user
    #[arg(long, env = "ENCENNA_TOKEN", hide_env_values = true)]
    token: String,
    /// Role of the logged-in user
    #[arg(long, value_enum, env = "ENCENNA_ROLE")]
    role: Option<RoleArg>,
    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
}

#[derive(Subcommand)]
enum RemoteCommands {
    /// Fetch rooms and reservations and show the board
    Board {
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        #[command(flatten)]
        slot: SlotArgs,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Validate, check and submit a booking request (JSON)
    Book {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Quick one-hour booking: no participant minimum, end time optional
        #[arg(long)]
        quick: bool,
    },
    /// List rooms
    Rooms,
    /// Create a room (administrators)
    AddRoom {
        /// Room name
        name: String,
    },
    /// Search users by name for the participant list
    Users {
        /// Part of the user's name
        name: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RoleArg {
    Administrator,
    Teacher,
    Student,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Administrator => Role::Administrator,
            RoleArg::Teacher => Role::Teacher,
            RoleArg::Student => Role::Student,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Board {
            date,
            slot,
            rooms,
            reservations,
            filter,
            json,
        } => {
            let date = parse_date(&date)?;
            let query = slot.query()?;
            let rooms: Vec<Room> = read_json(Some(&rooms)).context("Failed to read room catalog")?;
            let rooms: Vec<Room> = match filter.as_deref() {
                Some(needle) => filter_rooms(&rooms, needle).into_iter().cloned().collect(),
                None => rooms,
            };
            let snapshot = match reservations {
                Some(path) => DaySnapshot::loaded(date, read_reservations(Some(&path))?),
                None => {
                    tracing::warn!("no reservations given for {date}, showing all rooms free");
                    DaySnapshot::pending(date)
                }
            };
            print_board(&room_board(&rooms, &query, &snapshot), json)?;
        }
        Commands::Check {
            room,
            date,
            slot,
            reservations,
        } => {
            let snapshot = DaySnapshot::loaded(parse_date(&date)?, read_reservations(reservations.as_deref())?);
            let room = RoomId::new(room);
            let query = slot.query()?;

            if query.is_free(&room, snapshot.reservations()) {
                println!("{room}: available");
            } else {
                println!("{room}: occupied");
                match query {
                    AvailabilityQuery::At(t) => {
                        for r in snapshot
                            .reservations()
                            .iter()
                            .filter(|r| r.is_for_room(&room) && r.range().contains(t))
                        {
                            println!("  {}", describe(r));
                        }
                    }
                    AvailabilityQuery::Between(range) => {
                        for c in find_conflicts(&room, range, snapshot.reservations()) {
                            println!("  {} ({} min overlap)", describe(&c.reservation), c.overlap_minutes);
                        }
                    }
                }
            }
        }
        Commands::Free {
            room,
            date,
            reservations,
            open,
            close,
            min,
        } => {
            let snapshot = DaySnapshot::loaded(parse_date(&date)?, read_reservations(reservations.as_deref())?);
            let opening = TimeRange::parse(&open, &close).context("Invalid opening hours")?;
            let min = min.unwrap_or(0);
            let windows: Vec<_> = free_windows(&RoomId::new(room), snapshot.reservations(), opening)
                .into_iter()
                .filter(|w| w.duration_minutes >= min)
                .collect();
            if windows.is_empty() {
                println!("No free windows.");
            }
            for w in windows {
                println!(
                    "{}-{} ({} min)",
                    format_time(w.start),
                    format_time(w.end),
                    w.duration_minutes
                );
            }
        }
        Commands::Validate { input, quick } => {
            let request: BookingRequest =
                read_json(input.as_deref()).context("Failed to parse booking request")?;
            let booking = validate_booking_request(&request, &policy(quick))?;
            println!("valid");
            println!("{}", serde_json::to_string_pretty(&booking)?);
        }
        Commands::EndTime { start } => {
            let end = default_end_time(parse_time(&start)?)?;
            println!("{}", format_time(end));
        }
        Commands::Remote { conn, command } => run_remote(conn, command).await?,
    }

    Ok(())
}

async fn run_remote(conn: RemoteArgs, command: RemoteCommands) -> Result<()> {
    let config = ClientConfig::new(conn.base_url)?.with_timeout(Duration::from_secs(conn.timeout_secs));
    let client = RestClient::new(&config)?;
    let mut session = Session::new(conn.token);
    if let Some(role) = conn.role {
        session = session.with_role(role.into());
    }
    tracing::debug!("backend {}", client.base_url());
    let workflow = BookingWorkflow::new(client, session);

    match command {
        RemoteCommands::Board { date, slot, json } => {
            let view = workflow.load_day(parse_date(&date)?).await?;
            print_board(&view.board(&slot.query()?), json)?;
        }
        RemoteCommands::Book { input, quick } => {
            let request: BookingRequest =
                read_json(input.as_deref()).context("Failed to parse booking request")?;
            let date = request.date.context("Booking request has no date")?;
            let view = workflow.load_day(date).await?;
            let refreshed = workflow.book(&view, &request, &policy(quick)).await?;
            println!("Booked.");
            if let Some(start) = request.start {
                print_board(&refreshed.board(&AvailabilityQuery::At(start)), false)?;
            }
        }
        RemoteCommands::Rooms => {
            let rooms = workflow.backend().list_rooms(workflow.session()).await?;
            for room in &rooms {
                println!("{}\t{}", room.id, room.name);
            }
        }
        RemoteCommands::AddRoom { name } => {
            let rooms = workflow.add_room(&name).await?;
            println!("Room created. {} rooms registered.", rooms.len());
        }
        RemoteCommands::Users { name } => {
            for user in workflow.search_participants(&name).await? {
                println!("{}\t{}", user.id, user.name);
            }
        }
    }
    Ok(())
}

fn policy(quick: bool) -> BookingPolicy {
    if quick {
        BookingPolicy::quick()
    } else {
        BookingPolicy::ensemble()
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// `id HH:MM-HH:MM label`
fn describe(r: &Reservation) -> String {
    format!("{} {}-{} {}", r.id, format_time(r.start()), format_time(r.end()), r.label)
}

fn print_board(board: &[RoomAvailability], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(board)?);
        return Ok(());
    }
    if board.is_empty() {
        println!("No rooms registered.");
        return Ok(());
    }
    let width = board.iter().map(|e| e.room.name.chars().count()).max().unwrap_or(0);
    for entry in board {
        let status = if entry.free { "free" } else { "occupied" };
        println!("{:<w$}  {}", entry.room.name, status, w = width);
    }
    Ok(())
}

fn read_reservations(path: Option<&str>) -> Result<Vec<Reservation>> {
    read_json(path).context("Failed to read reservations")
}

fn read_json<T: serde::de::DeserializeOwned>(path: Option<&str>) -> Result<T> {
    let raw = read_input(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
