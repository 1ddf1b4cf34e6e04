//! Command-line interface for encargado.
//!
//! This module provides the CLI structure for the `encargado` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddEventCommand, AdminAction, AdminCommand, ConfigCommand, EventCommand, ShareCommand,
    ShareFormat, ZoneCommand,
};

/// encargado - Track incidents across your work zones
///
/// Create zones, record incidents with photos, mark them done, and share
/// summaries. Everything is kept in a local database.
#[derive(Debug, Parser)]
#[command(name = "encargado")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage zones
    #[command(subcommand)]
    Zone(ZoneCommand),

    /// Manage events
    #[command(subcommand)]
    Event(EventCommand),

    /// Format events for sharing or printing
    #[command(subcommand)]
    Share(ShareCommand),

    /// Administrator dashboard
    Admin(AdminCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
