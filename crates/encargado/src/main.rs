//! `encargado` - CLI for the encargado incident tracker
//!
//! This binary provides the command-line interface for managing zones and
//! events, sharing summaries, and the administrator dashboard.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{bail, Context};
use clap::Parser;
use serde_json::json;
use tracing::{info, warn};

use encargado::cli::{
    AddEventCommand, AdminAction, AdminCommand, Cli, Command, ConfigCommand, EventCommand,
    ShareCommand, ShareFormat, ZoneCommand,
};
use encargado::environment::SystemEnvironment;
use encargado::model::Event;
use encargado::ops::Outcome;
use encargado::{init_logging, photo, query, report, validate};
use encargado::{Config, DocumentStore, Error, Storage, Tracker};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;

    // Execute the command
    match cli.command {
        Command::Zone(cmd) => handle_zone(&mut open_tracker(&config)?, cmd),
        Command::Event(cmd) => handle_event(&mut open_tracker(&config)?, &config, cmd),
        Command::Share(cmd) => handle_share(&open_tracker(&config)?, cmd),
        Command::Admin(cmd) => handle_admin(&mut open_tracker(&config)?, &config, cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_tracker(config: &Config) -> anyhow::Result<Tracker> {
    let path = config.database_path();
    let storage = Storage::open(&path)
        .with_context(|| format!("failed to open database at {}", path.display()))?;
    let store = DocumentStore::new(storage, config.storage.slot_key.clone());
    Ok(Tracker::open(store)?)
}

/// First eight characters of an id, enough to address it by prefix.
fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn handle_zone(tracker: &mut Tracker, cmd: ZoneCommand) -> anyhow::Result<()> {
    match cmd {
        ZoneCommand::Add { name } => {
            let name = validate::zone_name(&name)?;
            let zone = tracker.add_zone(name)?;
            println!("Created zone \"{}\" ({})", zone.name, zone.id);
        }
        ZoneCommand::List { json } => {
            let data = tracker.data();
            if json {
                let zones: Vec<_> = data
                    .zones
                    .iter()
                    .map(|z| {
                        json!({
                            "id": z.id,
                            "name": z.name,
                            "createdAt": z.created_at,
                            "pendingCount": query::pending_count(data, &z.id),
                        })
                    })
                    .collect();
                print_json(&zones)?;
            } else if data.zones.is_empty() {
                println!("No zones yet. Create one with `encargado zone add <NAME>`.");
            } else {
                for zone in &data.zones {
                    println!(
                        "{}  {:>3} pending  {}",
                        short_id(&zone.id),
                        query::pending_count(data, &zone.id),
                        zone.name
                    );
                }
            }
        }
        ZoneCommand::Show { id, json } => {
            let data = tracker.data();
            let zone = query::resolve_zone(data, &id)?;
            let (pending, completed) = query::split_by_status(data, &zone.id);
            if json {
                print_json(&json!({
                    "zone": zone,
                    "pendingCount": pending.len(),
                    "pending": pending,
                    "completed": completed,
                }))?;
            } else {
                println!("{}", zone.name);
                println!("{}", "=".repeat(zone.name.chars().count()));
                println!("Id:        {}", zone.id);
                println!("Created:   {}", report::format_timestamp(zone.created_at));
                println!("Pending:   {}", pending.len());
                println!("Completed: {}", completed.len());
                print_event_sections(&pending, &completed);
            }
        }
        ZoneCommand::Delete { id } => {
            let zone = query::resolve_zone(tracker.data(), &id)?.clone();
            match tracker.delete_zone(zone.id)? {
                Outcome::ZoneDeleted {
                    zone_name,
                    removed_events,
                } => println!(
                    "Deleted zone \"{}\" and {} event(s)",
                    zone_name.unwrap_or_default(),
                    removed_events
                ),
                other => bail!("unexpected outcome {other:?}"),
            }
        }
    }
    Ok(())
}

fn print_event_sections(pending: &[&Event], completed: &[&Event]) {
    if !pending.is_empty() {
        println!();
        println!("Pending ({})", pending.len());
        for event in pending {
            print_event_line(event);
        }
    }
    if !completed.is_empty() {
        println!();
        println!("Completed ({})", completed.len());
        for event in completed {
            print_event_line(event);
        }
    }
}

fn print_event_line(event: &Event) {
    let photos = match event.photos.len() {
        0 => String::new(),
        n => format!("  [{n} photo(s)]"),
    };
    println!(
        "  {}  {}  {}{}",
        short_id(&event.id),
        report::format_timestamp(event.completed_at.unwrap_or(event.created_at)),
        event.description,
        photos
    );
}

fn handle_event(tracker: &mut Tracker, config: &Config, cmd: EventCommand) -> anyhow::Result<()> {
    match cmd {
        EventCommand::Add(cmd) => add_event(tracker, config, cmd)?,
        EventCommand::List { zone_id, json } => {
            let data = tracker.data();
            let zone = query::resolve_zone(data, &zone_id)?;
            let (pending, completed) = query::split_by_status(data, &zone.id);
            if json {
                print_json(&json!({ "pending": pending, "completed": completed }))?;
            } else if pending.is_empty() && completed.is_empty() {
                println!("No events in \"{}\"", zone.name);
            } else {
                print_event_sections(&pending, &completed);
            }
        }
        EventCommand::Toggle { event_id } => {
            let id = query::resolve_event(tracker.data(), &event_id)?.id.clone();
            match tracker.toggle_event_complete(id)? {
                Outcome::EventToggled(event) if event.is_completed => {
                    println!("Completed: {}", event.description);
                }
                Outcome::EventToggled(event) => println!("Pending again: {}", event.description),
                other => bail!("unexpected outcome {other:?}"),
            }
        }
        EventCommand::Delete { event_id } => {
            let id = query::resolve_event(tracker.data(), &event_id)?.id.clone();
            match tracker.delete_event(id)? {
                Outcome::EventDeleted(event) => println!("Deleted: {}", event.description),
                other => bail!("unexpected outcome {other:?}"),
            }
        }
    }
    Ok(())
}

fn add_event(tracker: &mut Tracker, config: &Config, cmd: AddEventCommand) -> anyhow::Result<()> {
    let zone_id = query::resolve_zone(tracker.data(), &cmd.zone_id)?.id.clone();
    let description = validate::event_description(&cmd.description)?;
    validate::photo_count(cmd.photos.len())?;

    let mut env = SystemEnvironment;
    let photos = cmd
        .photos
        .iter()
        .map(|path| {
            photo::prepare_file(path, &config.photos, &mut env)
                .with_context(|| format!("failed to prepare photo {}", path.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let event = tracker.add_event(zone_id, description, photos)?;
    println!("Recorded event {} ({} photo(s))", event.id, event.photos.len());
    Ok(())
}

fn handle_share(tracker: &Tracker, cmd: ShareCommand) -> anyhow::Result<()> {
    let data = tracker.data();
    let output = match cmd {
        ShareCommand::Event { event_id, format } => {
            let event = query::resolve_event(data, &event_id)?;
            let zone_name = data.zone_name(&event.zone_id).unwrap_or_default();
            match format {
                ShareFormat::Text => report::event_text(event, &zone_name),
                ShareFormat::Plain => report::plain(&report::event_text(event, &zone_name)),
                ShareFormat::Html => report::event_html(event, &zone_name),
            }
        }
        ShareCommand::Zone { zone_id, format } => {
            let zone = query::resolve_zone(data, &zone_id)?;
            let events = query::zone_events(data, &zone.id);
            match format {
                ShareFormat::Text => report::zone_summary_text(&events, &zone.name),
                ShareFormat::Plain => {
                    report::plain(&report::zone_summary_text(&events, &zone.name))
                }
                ShareFormat::Html => report::zone_summary_html(&events, &zone.name),
            }
        }
    };
    println!("{output}");
    Ok(())
}

fn handle_admin(tracker: &mut Tracker, config: &Config, cmd: AdminCommand) -> anyhow::Result<()> {
    if !tracker.verify_admin_password(&cmd.password) {
        warn!("Rejected administrator password");
        return Err(Error::AccessDenied.into());
    }
    info!("Administrator access granted");

    match cmd.action {
        AdminAction::Stats { json } => {
            let stats = query::admin_stats(tracker.data());
            let storage = tracker.store().storage();
            let storage_stats = storage.stats()?;
            let last_saved = storage.slot_updated_at(tracker.store().key())?;
            if json {
                print_json(&json!({
                    "zones": stats.zones,
                    "pending": stats.pending,
                    "completed": stats.completed,
                    "logEntries": stats.log_entries,
                    "databasePath": storage.path(),
                    "databaseSizeBytes": storage_stats.db_size_bytes,
                    "lastSaved": last_saved.map(|t| t.to_rfc3339()),
                }))?;
            } else {
                println!("Administrator dashboard");
                println!("-----------------------");
                println!("Zones:       {}", stats.zones);
                println!("Pending:     {}", stats.pending);
                println!("Completed:   {}", stats.completed);
                println!("Log entries: {}", stats.log_entries);
                println!();
                println!("Database:    {}", storage.path().display());
                println!("Size:        {} bytes", storage_stats.db_size_bytes);
                if let Some(saved) = last_saved {
                    println!("Last saved:  {}", report::format_timestamp(saved.timestamp_millis()));
                }
            }
        }
        AdminAction::Logs { limit, json } => {
            let logs = &tracker.data().admin_logs;
            let shown = &logs[..limit.unwrap_or(logs.len()).min(logs.len())];
            if json {
                print_json(&shown)?;
            } else if shown.is_empty() {
                println!("No activity recorded yet.");
            } else {
                for log in shown {
                    println!("{}", report::log_line(log));
                }
            }
        }
        AdminAction::SetPassword { new, confirm } => {
            validate::new_password(&new, &confirm, config.admin.min_password_length)?;
            tracker.update_admin_password(new)?;
            println!("Administrator password updated.");
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                print_json(config)?;
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:       {}", config.database_path().display());
                println!("  Slot key:            {}", config.storage.slot_key);
                println!();
                println!("[Admin]");
                println!(
                    "  Min password length: {}",
                    config.admin.min_password_length
                );
                println!();
                println!("[Photos]");
                println!("  Max dimension:       {}", config.photos.max_dimension);
                println!("  JPEG quality:        {}", config.photos.jpeg_quality);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path)).context("configuration is invalid")?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
