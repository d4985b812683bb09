//! CLI interface for moana.
//!
//! Non-interactive subcommands for the trip lifecycle — create, checklist
//! entry, depart, return — plus one interactive wizard (`guided`) that
//! walks the pre-departure checklist step by step. Trip references take a
//! full UUID or an unambiguous prefix.
//!
//! State is loaded once, the command runs to completion, and state is
//! saved only when the command succeeds.

mod format;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use jiff::Zoned;
use jiff::civil::Date;
use uuid::Uuid;

use crate::attachments::AttachmentStore;
use crate::config::Config;
use crate::gate::complete::{Answer, Confirmations};
use crate::gate::{GateError, Requirement, Topic, depart};
use crate::lifecycle::{LifecycleError, NewTrip, TripLog, TripPatch};
use crate::model::checklist::{self, CHECKLIST};
use crate::model::{
    CatchReport, IssueKind, IssueReport, PreDepartureRecord, ReturnDraft, Strike, Trip, TripKind,
    TripStatus, Vessel,
};
use crate::sequencer::{Field, Recorded, Sequencer, StepKind};
use crate::storage::{PersistedState, Storage};

/// moana — trip logging for a charter fleet.
#[derive(Debug, Parser)]
#[command(name = "moana", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r#"Workflow: one trip, start to finish
  1. moana trip new --vessel temu --kind fishing-charter --start 7 --captain Moana
     → prints a trip ID (e.g. a3b0fc12)
  2. moana check a3b --set lifejackets=ok --set bilge=working ... \
       --fuel 50 --time 7 --engine 120
     (or walk it one step at a time: moana guided a3b)
  3. moana depart a3b
  4. moana return a3b --fuel 30 --time 1230 --engine 125 \
       --confirm-no-issues --confirm-no-catch --confirm-no-strikes
  5. moana engines        # engine-hour ledger"#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage trips: create, list, inspect, edit.
    Trip {
        #[command(subcommand)]
        command: TripCommand,
    },

    /// Record checklist answers, notes, and photos on a scheduled trip.
    Check(CheckArgs),

    /// Walk the pre-departure checklist one step at a time.
    ///
    /// Progress is saved into the trip's draft, so quitting and resuming
    /// later continues where entry stopped. The wizard never departs the
    /// trip itself; submission still goes through `depart`.
    Guided {
        /// Trip ID: full UUID or unambiguous prefix.
        trip: String,
    },

    /// Validate the pre-departure checklist and put the trip underway.
    ///
    /// On success the checklist is locked and the core trip fields freeze.
    /// On failure every outstanding requirement is listed.
    Depart {
        /// Trip ID: full UUID or unambiguous prefix.
        trip: String,
    },

    /// Validate the return details and complete the trip.
    #[command(name = "return")]
    Return(ReturnArgs),

    /// Engine hours per vessel and engine, synced from trip returns.
    Engines,
}

#[derive(Debug, Subcommand)]
pub enum TripCommand {
    /// Create a new trip. Prints the trip ID.
    New(NewArgs),

    /// List trips for a date, grouped by status.
    List {
        /// Date to list (defaults to today).
        #[arg(long)]
        date: Option<String>,
    },

    /// Show one trip in full.
    Show {
        /// Trip ID: full UUID or unambiguous prefix.
        trip: String,
    },

    /// Edit trip fields. Refused once the trip has departed.
    Edit(EditArgs),
}

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Trip date (defaults to today).
    #[arg(long)]
    date: Option<String>,

    /// Start time (e.g. 7, 700, 7:00, 1:15pm).
    #[arg(long)]
    start: Option<String>,

    /// Preset start time: am = 07:00, pm = 13:00.
    #[arg(long, value_enum, conflicts_with = "start")]
    slot: Option<SlotArg>,

    /// Trip kind; sets the default duration.
    #[arg(long, value_enum)]
    kind: Option<KindArg>,

    #[arg(long, value_enum)]
    vessel: Option<VesselArg>,

    /// Planned duration in hours (defaults to the kind's duration).
    #[arg(long)]
    duration: Option<u32>,

    /// Defaults to `default-captain` from the config.
    #[arg(long)]
    captain: Option<String>,

    /// Defaults to `default-deckhand` from the config.
    #[arg(long)]
    deckhand: Option<String>,

    #[arg(long, default_value_t = 6)]
    capacity: u32,

    /// Booked passengers.
    #[arg(long, default_value_t = 0)]
    pax: u32,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Trip ID: full UUID or unambiguous prefix.
    trip: String,

    #[arg(long)]
    date: Option<String>,

    /// Start time (e.g. 7, 700, 7:00, 1:15pm).
    #[arg(long)]
    start: Option<String>,

    /// Trip kind; resets the duration to its default unless --duration is
    /// also given.
    #[arg(long, value_enum)]
    kind: Option<KindArg>,

    #[arg(long, value_enum)]
    vessel: Option<VesselArg>,

    /// Planned duration in hours.
    #[arg(long)]
    duration: Option<u32>,

    #[arg(long)]
    captain: Option<String>,

    #[arg(long)]
    deckhand: Option<String>,

    #[arg(long)]
    capacity: Option<u32>,

    /// Booked passengers.
    #[arg(long)]
    pax: Option<u32>,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Trip ID: full UUID or unambiguous prefix.
    trip: String,

    /// Checklist answer as item=value (e.g. lifejackets=ok,
    /// bilge=not-working). Can be given multiple times.
    #[arg(long = "set", value_name = "ITEM=VALUE")]
    set: Vec<String>,

    /// Explanation notes for an abnormal answer, as item=text.
    #[arg(long, value_name = "ITEM=TEXT")]
    note: Vec<String>,

    /// Attach a photo to an item, as item=path.
    #[arg(long, value_name = "ITEM=PATH")]
    photo: Vec<String>,

    /// Fuel at start, liters.
    #[arg(long)]
    fuel: Option<String>,

    /// Departure time (e.g. 7, 700, 7:00, 1:15pm).
    #[arg(long)]
    time: Option<String>,

    /// Engine hours before, one per engine in the vessel's order.
    #[arg(long)]
    engine: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ReturnArgs {
    /// Trip ID: full UUID or unambiguous prefix.
    trip: String,

    /// Fuel at end, liters.
    #[arg(long)]
    fuel: Option<String>,

    /// Return time (e.g. 12, 1230, 12:30, 12:15pm).
    #[arg(long)]
    time: Option<String>,

    /// Engine hours after, one per engine in the vessel's order.
    #[arg(long)]
    engine: Vec<String>,

    /// Report an issue: what kind it was.
    #[arg(long, value_enum)]
    issue_kind: Option<IssueKindArg>,

    /// Describe the issue.
    #[arg(long)]
    issue_notes: Option<String>,

    /// Photos of the issue.
    #[arg(long, value_name = "PATH")]
    issue_photo: Vec<PathBuf>,

    /// Species caught ("Tuna", "Mahimahi", "Marlin", "Wahoo", or other).
    #[arg(long)]
    species: Option<String>,

    /// Fish landed.
    #[arg(long)]
    quantity: Option<u32>,

    /// Total weight, kg.
    #[arg(long)]
    weight: Option<f64>,

    /// Photos of the catch.
    #[arg(long, value_name = "PATH")]
    catch_photo: Vec<PathBuf>,

    /// A strike (hook-up that didn't land) as "time|species|notes".
    #[arg(long, value_name = "TIME|SPECIES|NOTES")]
    strike: Vec<String>,

    /// Confirm there are truly no issues to report.
    #[arg(long)]
    confirm_no_issues: bool,

    /// Confirm no fish were caught.
    #[arg(long)]
    confirm_no_catch: bool,

    /// Confirm there were no strikes either.
    #[arg(long)]
    confirm_no_strikes: bool,
}

/// CLI-facing vessel choice, mapped to the domain `Vessel`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum VesselArg {
    Mahina,
    Temu,
    MissKat,
    Tearii,
}

impl VesselArg {
    fn to_domain(self) -> Vessel {
        match self {
            Self::Mahina => Vessel::Mahina,
            Self::Temu => Vessel::Temu,
            Self::MissKat => Vessel::MissKat,
            Self::Tearii => Vessel::Tearii,
        }
    }
}

/// CLI-facing trip kind, mapped to the domain `TripKind`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    /// Fishing Charter (5h default).
    FishingCharter,
    /// Whale Watch (2h default).
    WhaleWatch,
    /// Lagoon Cruise (3h default).
    LagoonCruise,
}

impl KindArg {
    fn to_domain(self) -> TripKind {
        match self {
            Self::FishingCharter => TripKind::FishingCharter,
            Self::WhaleWatch => TripKind::WhaleWatch,
            Self::LagoonCruise => TripKind::LagoonCruise,
        }
    }
}

/// Morning or afternoon start preset.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SlotArg {
    Am,
    Pm,
}

impl SlotArg {
    fn start_time(self) -> &'static str {
        match self {
            Self::Am => "07:00",
            Self::Pm => "13:00",
        }
    }
}

/// CLI-facing issue kind, mapped to the domain `IssueKind`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum IssueKindArg {
    FishingEquipment,
    Vessel,
    Other,
}

impl IssueKindArg {
    fn to_domain(self) -> IssueKind {
        match self {
            Self::FishingEquipment => IssueKind::FishingEquipment,
            Self::Vessel => IssueKind::Vessel,
            Self::Other => IssueKind::Other,
        }
    }
}

/// Run the CLI, returning an error message on failure.
pub fn run(config: &Config, storage: &Storage) -> Result<(), String> {
    let cli = Cli::parse();

    let state = storage
        .load()
        .map_err(|e| format!("failed to load state: {e}"))?
        .unwrap_or_default();
    let mut log = TripLog::new(state.trips, state.engine_hours);
    let attachments = AttachmentStore::new(storage.root())
        .map_err(|e| format!("failed to open attachment store: {e}"))?;

    match cli.command {
        Command::Trip { command } => match command {
            TripCommand::New(args) => cmd_trip_new(config, &mut log, args),
            TripCommand::List { date } => cmd_trip_list(&log, date.as_deref()),
            TripCommand::Show { trip } => cmd_trip_show(&log, &trip),
            TripCommand::Edit(args) => cmd_trip_edit(&mut log, args),
        },
        Command::Check(args) => cmd_check(&mut log, &attachments, args),
        Command::Guided { trip } => cmd_guided(&mut log, &attachments, &trip),
        Command::Depart { trip } => cmd_depart(&mut log, &trip),
        Command::Return(args) => cmd_return(&mut log, &attachments, args),
        Command::Engines => cmd_engines(&log),
    }?;

    let (trips, engine_hours) = log.into_parts();
    storage
        .save(&PersistedState { trips, engine_hours })
        .map_err(|e| format!("failed to save state: {e}"))
}

fn cmd_trip_new(config: &Config, log: &mut TripLog, args: NewArgs) -> Result<(), String> {
    let date = match args.date {
        Some(s) => parse_date(&s)?,
        None => today(),
    };
    let start = args
        .start
        .or_else(|| args.slot.map(|s| s.start_time().to_string()))
        .unwrap_or_else(|| "07:00".to_string());
    let captain = args
        .captain
        .or_else(|| config.default_captain.clone())
        .unwrap_or_default();
    let deckhand = args
        .deckhand
        .or_else(|| config.default_deckhand.clone())
        .unwrap_or_default();

    let trip = log.create_trip(NewTrip {
        date,
        start,
        planned_duration_hrs: args.duration,
        kind: args.kind.map_or(TripKind::FishingCharter, KindArg::to_domain),
        vessel: args.vessel.map_or(Vessel::Mahina, VesselArg::to_domain),
        captain,
        deckhand,
        capacity: args.capacity,
        pax: args.pax,
    });

    println!("{}", trip.id);
    Ok(())
}

fn cmd_trip_list(log: &TripLog, date: Option<&str>) -> Result<(), String> {
    let date = match date {
        Some(s) => parse_date(s)?,
        None => today(),
    };

    let on_date = |t: &&Trip| t.date == date;
    let scheduled: Vec<&Trip> = log
        .trips()
        .iter()
        .filter(on_date)
        .filter(|t| matches!(t.status, TripStatus::Scheduled { .. }))
        .collect();
    let underway: Vec<&Trip> = log
        .trips()
        .iter()
        .filter(on_date)
        .filter(|t| matches!(t.status, TripStatus::Underway { .. }))
        .collect();
    let completed: Vec<&Trip> = log
        .trips()
        .iter()
        .filter(on_date)
        .filter(|t| matches!(t.status, TripStatus::Completed { .. }))
        .collect();

    println!("To depart ({date})");
    if scheduled.is_empty() {
        println!("  No scheduled trips for this date.");
    }
    for t in &scheduled {
        println!("  {}", scheduled_row(t));
    }

    println!("Underway");
    if underway.is_empty() {
        println!("  No active trips.");
    }
    let now = now_minutes();
    for t in &underway {
        println!("  {}", underway_row(t, now));
    }

    println!("Completed");
    if completed.is_empty() {
        println!("  No completed trips yet.");
    }
    for t in &completed {
        println!("  {}", completed_row(t));
    }

    if let Ok(tomorrow) = date.tomorrow() {
        let upcoming: Vec<&Trip> = log
            .trips()
            .iter()
            .filter(|t| t.date == tomorrow)
            .filter(|t| matches!(t.status, TripStatus::Scheduled { .. }))
            .collect();
        if !upcoming.is_empty() {
            println!("Tomorrow");
            for t in &upcoming {
                println!("  {}", scheduled_row(t));
            }
        }
    }

    Ok(())
}

fn cmd_trip_show(log: &TripLog, trip_ref: &str) -> Result<(), String> {
    let id = resolve_trip(log, trip_ref)?;
    let trip = log.get(id).map_err(|e| e.to_string())?;

    println!("{}  {} — {}  [{}]", trip.short_id(), trip.kind, trip.vessel, trip.phase_label());
    println!(
        "  {} • planned {} • {}h • {}/{} pax",
        trip.date, trip.start, trip.planned_duration_hrs, trip.pax, trip.capacity
    );
    println!(
        "  captain {} • deckhand {}",
        or_dash(&trip.captain),
        or_dash(&trip.deckhand)
    );

    match &trip.status {
        TripStatus::Scheduled { draft } => match depart::validate(draft, trip.vessel) {
            Ok(_) => println!("  checklist complete — ready to depart"),
            Err(unmet) => {
                println!("  {} requirement(s) outstanding:", unmet.len());
                for r in &unmet {
                    println!("    - {r}");
                }
            }
        },
        TripStatus::Underway { pre } => {
            print_pre(pre, trip.vessel);
            let (elapsed, due) = format::elapsed_and_due(
                &pre.time_departure,
                trip.planned_duration_hrs,
                now_minutes(),
            );
            println!("  elapsed {} • {}", format::format_span(elapsed), due_phrase(due));
        }
        TripStatus::Completed { pre, ret } => {
            print_pre(pre, trip.vessel);
            println!("  returned {} • fuel {} L", ret.time_return, ret.fuel_end);
            for (name, reading) in trip.vessel.engines().iter().zip(&ret.engine_after) {
                println!("    {name}: {reading} h after");
            }
            println!("  {}", format::completed_summary(ret));
            for strike in &ret.strikes {
                println!(
                    "    strike {} {} — {}",
                    or_dash(&strike.time),
                    or_dash(&strike.species),
                    or_dash(&strike.notes)
                );
            }
        }
    }

    Ok(())
}

fn cmd_trip_edit(log: &mut TripLog, args: EditArgs) -> Result<(), String> {
    let id = resolve_trip(log, &args.trip)?;
    let patch = TripPatch {
        date: args.date.map(|s| parse_date(&s)).transpose()?,
        start: args.start,
        planned_duration_hrs: args.duration,
        kind: args.kind.map(KindArg::to_domain),
        vessel: args.vessel.map(VesselArg::to_domain),
        captain: args.captain,
        deckhand: args.deckhand,
        capacity: args.capacity,
        pax: args.pax,
    };

    let trip = log.edit_trip(id, patch).map_err(|e| e.to_string())?;
    println!("Trip {} updated.", trip.short_id());
    Ok(())
}

fn cmd_check(log: &mut TripLog, store: &AttachmentStore, args: CheckArgs) -> Result<(), String> {
    let id = resolve_trip(log, &args.trip)?;
    let trip = log.get(id).map_err(|e| e.to_string())?;
    let vessel = trip.vessel;
    let short = trip.short_id();

    if args.engine.len() > vessel.engines().len() {
        return Err(engine_count_error(vessel));
    }

    // Parse and stage everything before touching the draft, so a bad flag
    // leaves it untouched.
    let mut answers = Vec::new();
    for raw in &args.set {
        let (key, value) = split_kv(raw)?;
        let item = checklist::item(key).ok_or_else(|| unknown_item(key))?;
        let value = item.match_option(value).ok_or_else(|| {
            format!("{}: answer \"{}\" or \"{}\"", item.label, item.normal, item.abnormal)
        })?;
        answers.push((item.key, value));
    }
    let mut notes = Vec::new();
    for raw in &args.note {
        let (key, text) = split_kv(raw)?;
        let item = checklist::item(key).ok_or_else(|| unknown_item(key))?;
        notes.push((item.key, text.to_string()));
    }
    let mut photos = Vec::new();
    for raw in &args.photo {
        let (key, path) = split_kv(raw)?;
        let item = checklist::item(key).ok_or_else(|| unknown_item(key))?;
        let reference = store
            .put(Path::new(path))
            .map_err(|e| format!("failed to store photo {path}: {e}"))?;
        photos.push((item.key, reference));
    }

    let draft = log.draft_mut(id).map_err(|e| e.to_string())?;
    for (key, value) in answers {
        draft.checks.insert(key.to_string(), value.to_string());
    }
    for (key, text) in notes {
        draft.notes.insert(key.to_string(), text);
    }
    for (key, reference) in photos {
        draft.photos.entry(key.to_string()).or_default().push(reference);
    }
    if let Some(fuel) = args.fuel {
        draft.fuel_start = fuel;
    }
    if let Some(time) = args.time {
        draft.time_departure = time;
    }
    for (slot, value) in draft.engine_before.iter_mut().zip(&args.engine) {
        slot.clone_from(value);
    }

    match depart::validate(draft, vessel) {
        Ok(_) => println!("Checklist complete. Depart with: moana depart {short}"),
        Err(unmet) => {
            println!("Recorded. {} requirement(s) outstanding:", unmet.len());
            for r in &unmet {
                println!("  - {r}");
            }
        }
    }
    Ok(())
}

fn cmd_guided(log: &mut TripLog, store: &AttachmentStore, trip_ref: &str) -> Result<(), String> {
    let id = resolve_trip(log, trip_ref)?;
    let trip = log.get(id).map_err(|e| e.to_string())?;
    let vessel = trip.vessel;
    let short = trip.short_id();

    let mut seq = Sequencer::for_vessel(vessel);
    let draft = log.draft_mut(id).map_err(|e| e.to_string())?;

    println!("Guided checklist — {} steps.", seq.len());
    println!("Type an answer, Enter to keep and move on, 'b' for back, 'q' to stop.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let (kind, field, label) = {
            let step = seq.current_step();
            (step.kind, step.field, step.label.clone())
        };
        let hint = match kind {
            StepKind::Choice { normal, abnormal } => format!("{normal} / {abnormal}"),
            StepKind::Numeric => "number".to_string(),
            StepKind::Time => "e.g. 7, 700, 7:00, 1:15pm".to_string(),
        };
        print!("[{}/{}] {label} ({hint}): ", seq.cursor() + 1, seq.len());
        flush_stdout()?;

        let Some(line) = lines.next() else { break };
        let line = line.map_err(|e| format!("failed to read input: {e}"))?;
        let input = line.trim();

        match input {
            "q" | "quit" => break,
            "b" | "back" => {
                seq.back();
                continue;
            }
            "" => {
                if seq.cursor() + 1 == seq.len() {
                    break;
                }
                seq.next();
                continue;
            }
            _ => {}
        }

        let value = match (kind, field) {
            (StepKind::Choice { normal, abnormal }, Field::Check(key)) => {
                match checklist::item(key).and_then(|item| item.match_option(input)) {
                    Some(option) => option.to_string(),
                    None => {
                        println!("  answer \"{normal}\" or \"{abnormal}\"");
                        continue;
                    }
                }
            }
            _ => input.to_string(),
        };

        if seq.set_answer(seq.cursor(), draft, &value) == Some(Recorded::NeedsExplanation)
            && let Field::Check(key) = field
        {
            println!("  explain the issue: note text, photo:<path>, or Enter to defer");
            print!("  > ");
            flush_stdout()?;
            if let Some(line) = lines.next() {
                let line = line.map_err(|e| format!("failed to read input: {e}"))?;
                let input = line.trim();
                if let Some(path) = input.strip_prefix("photo:") {
                    match store.put(Path::new(path.trim())) {
                        Ok(reference) => {
                            draft.photos.entry(key.to_string()).or_default().push(reference);
                        }
                        Err(e) => println!("  could not store photo: {e}"),
                    }
                } else if !input.is_empty() {
                    draft.notes.insert(key.to_string(), input.to_string());
                }
            }
        }

        if seq.cursor() + 1 == seq.len() {
            break;
        }
        seq.next();
    }

    println!("Progress saved. Submit with: moana depart {short}");
    Ok(())
}

fn cmd_depart(log: &mut TripLog, trip_ref: &str) -> Result<(), String> {
    let id = resolve_trip(log, trip_ref)?;

    match log.submit_pre_departure(id) {
        Ok(trip) => {
            println!(
                "Trip {} is underway; departed {}. Pre-departure is locked.",
                trip.short_id(),
                trip.actual_start().unwrap_or("—")
            );
            Ok(())
        }
        Err(LifecycleError::Gate(GateError::Unmet(unmet))) => {
            let mut msg = format_unmet("cannot depart; complete:", &unmet);
            msg.push_str(&format!(
                "\nfinish step-by-step with: moana guided {trip_ref}"
            ));
            Err(msg)
        }
        Err(e) => Err(e.to_string()),
    }
}

fn cmd_return(log: &mut TripLog, store: &AttachmentStore, args: ReturnArgs) -> Result<(), String> {
    let id = resolve_trip(log, &args.trip)?;
    let trip = log.get(id).map_err(|e| e.to_string())?;
    let vessel = trip.vessel;
    let short = trip.short_id();

    if args.engine.len() > vessel.engines().len() {
        return Err(engine_count_error(vessel));
    }

    let mut draft = ReturnDraft::for_vessel(vessel);
    if let Some(fuel) = args.fuel {
        draft.fuel_end = fuel;
    }
    if let Some(time) = args.time {
        draft.time_return = time;
    }
    for (slot, value) in draft.engine_after.iter_mut().zip(&args.engine) {
        slot.clone_from(value);
    }

    let issue_photos = put_all(store, &args.issue_photo)?;
    if args.issue_kind.is_some() || args.issue_notes.is_some() || !issue_photos.is_empty() {
        draft.issues = Some(IssueReport {
            kind: args.issue_kind.map_or(IssueKind::Other, IssueKindArg::to_domain),
            notes: args.issue_notes.unwrap_or_default(),
            photos: issue_photos,
        });
    }

    let catch_photos = put_all(store, &args.catch_photo)?;
    if args.species.is_some()
        || args.quantity.is_some()
        || args.weight.is_some()
        || !catch_photos.is_empty()
    {
        draft.catch = Some(CatchReport {
            species: args.species.unwrap_or_default(),
            quantity: args.quantity,
            weight_kg: args.weight,
            photos: catch_photos,
        });
    }

    for raw in &args.strike {
        draft.strikes.push(parse_strike(raw));
    }

    let confirmations = Confirmations {
        issues: args.confirm_no_issues.then_some(Answer::No),
        catch: args.confirm_no_catch.then_some(Answer::No),
        strikes: args.confirm_no_strikes.then_some(Answer::No),
    };

    match log.submit_return(id, &draft, confirmations) {
        Ok(trip) => {
            let (returned, readings) = match &trip.status {
                TripStatus::Completed { ret, .. } => {
                    (ret.time_return.clone(), ret.engine_after.clone())
                }
                _ => (String::new(), Vec::new()),
            };
            println!("Trip {short} completed; returned {returned}.");
            for (engine, reading) in vessel.engines().iter().zip(readings) {
                println!("  {engine}: {reading} h recorded");
            }
            Ok(())
        }
        Err(LifecycleError::Gate(GateError::Unmet(unmet))) => {
            Err(format_unmet("cannot complete; please fill:", &unmet))
        }
        Err(LifecycleError::Gate(GateError::ConfirmationRequired(topic))) => {
            Err(confirmation_hint(topic))
        }
        Err(e) => Err(e.to_string()),
    }
}

fn cmd_engines(log: &TripLog) -> Result<(), String> {
    let ledger = log.ledger();
    if ledger.is_empty() {
        println!("No engine data yet. Complete a trip return to populate.");
        return Ok(());
    }

    println!("{:<10}  {:<26}  {}", "Vessel", "Engine", "Hours");
    for (vessel, engine, hours) in ledger.entries() {
        println!("{vessel:<10}  {engine:<26}  {hours}");
    }
    Ok(())
}

// ── Rows and phrasing ──

fn scheduled_row(t: &Trip) -> String {
    format!(
        "{}  {}  {} — {}  capt {}  {}/{} pax",
        t.short_id(),
        t.start,
        t.kind,
        t.vessel,
        or_dash(&t.captain),
        t.pax,
        t.capacity
    )
}

fn underway_row(t: &Trip, now: i64) -> String {
    let start = t.actual_start().unwrap_or(&t.start);
    let (elapsed, due) = format::elapsed_and_due(start, t.planned_duration_hrs, now);
    format!(
        "{}  {} — {}  started {start} • elapsed {} • {}",
        t.short_id(),
        t.kind,
        t.vessel,
        format::format_span(elapsed),
        due_phrase(due)
    )
}

fn completed_row(t: &Trip) -> String {
    let TripStatus::Completed { ret, .. } = &t.status else {
        return String::new();
    };
    format!(
        "{}  {} — {}  {} → {}  {}",
        t.short_id(),
        t.kind,
        t.vessel,
        t.actual_start().unwrap_or(&t.start),
        ret.time_return,
        format::completed_summary(ret)
    )
}

fn due_phrase(due: i64) -> String {
    if due <= 0 {
        format!("overdue by {}", format::format_span(due))
    } else {
        format!("due in {}", format::format_span(due))
    }
}

fn print_pre(pre: &PreDepartureRecord, vessel: Vessel) {
    println!("  departed {} • fuel {} L", pre.time_departure, pre.fuel_start);
    for (name, reading) in vessel.engines().iter().zip(&pre.engine_before) {
        println!("    {name}: {reading} h before");
    }
    for item in &CHECKLIST {
        if let Some(entry) = pre.checks.get(item.key)
            && entry.value == item.abnormal
        {
            let explanation = entry.notes.as_deref().unwrap_or("see photos");
            println!("    {}: {} — {explanation}", item.label, entry.value);
        }
    }
}

// ── Parsing and helpers ──

fn today() -> Date {
    Zoned::now().date()
}

fn now_minutes() -> i64 {
    let now = Zoned::now();
    i64::from(now.hour()) * 60 + i64::from(now.minute())
}

fn parse_date(s: &str) -> Result<Date, String> {
    s.parse::<Date>()
        .map_err(|e| format!("invalid date '{s}': {e}"))
}

/// Split an `item=value` flag.
fn split_kv(raw: &str) -> Result<(&str, &str), String> {
    raw.split_once('=')
        .ok_or_else(|| format!("expected item=value, got '{raw}'"))
}

/// Parse a `time|species|notes` strike flag; missing parts stay empty.
fn parse_strike(raw: &str) -> Strike {
    let mut parts = raw.splitn(3, '|');
    Strike {
        time: parts.next().unwrap_or_default().trim().to_string(),
        species: parts.next().unwrap_or_default().trim().to_string(),
        notes: parts.next().unwrap_or_default().trim().to_string(),
    }
}

fn put_all(
    store: &AttachmentStore,
    paths: &[PathBuf],
) -> Result<Vec<crate::model::PhotoRef>, String> {
    paths
        .iter()
        .map(|path| {
            store
                .put(path)
                .map_err(|e| format!("failed to store photo {}: {e}", path.display()))
        })
        .collect()
}

fn unknown_item(key: &str) -> String {
    let keys: Vec<&str> = CHECKLIST.iter().map(|i| i.key).collect();
    format!("unknown checklist item '{key}' (one of: {})", keys.join(", "))
}

fn engine_count_error(vessel: Vessel) -> String {
    let engines = vessel.engines();
    format!(
        "{} has {} engine(s): {}",
        vessel.name(),
        engines.len(),
        engines.join(", ")
    )
}

fn format_unmet(heading: &str, unmet: &[Requirement]) -> String {
    let mut msg = heading.to_string();
    for r in unmet {
        msg.push_str(&format!("\n  - {r}"));
    }
    msg
}

fn confirmation_hint(topic: Topic) -> String {
    let hint = match topic {
        Topic::Issues => "rerun with --confirm-no-issues, or report one with --issue-kind/--issue-notes",
        Topic::Catch => "rerun with --confirm-no-catch, or record it with --species/--quantity/--weight",
        Topic::Strikes => "rerun with --confirm-no-strikes, or add --strike entries",
    };
    format!("confirm before completing: {topic}?\n{hint}")
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() { "—" } else { s }
}

/// Resolve a trip reference (full UUID or unambiguous prefix) to an id.
fn resolve_trip(log: &TripLog, reference: &str) -> Result<Uuid, String> {
    // Try full UUID first.
    if let Ok(id) = reference.parse::<Uuid>() {
        return log.get(id).map(|t| t.id).map_err(|e| e.to_string());
    }

    // Try as a prefix match against all trips.
    let matches: Vec<&Trip> = log
        .trips()
        .iter()
        .filter(|t| t.id.to_string().starts_with(reference))
        .collect();

    match matches.len() {
        0 => Err(format!("no trip matching '{reference}'")),
        1 => Ok(matches[0].id),
        n => {
            let ids: Vec<String> = matches.iter().map(|t| t.short_id()).collect();
            Err(format!(
                "'{reference}' is ambiguous — matches {n} trips: {}",
                ids.join(", ")
            ))
        }
    }
}

fn flush_stdout() -> Result<(), String> {
    io::stdout()
        .flush()
        .map_err(|e| format!("failed to write prompt: {e}"))
}
