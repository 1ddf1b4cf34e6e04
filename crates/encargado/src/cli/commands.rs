//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Zone commands.
#[derive(Debug, Subcommand)]
pub enum ZoneCommand {
    /// Create a new zone
    Add {
        /// Zone name
        name: String,
    },

    /// List all zones with their pending counts
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show a zone and its events
    Show {
        /// Zone id or unique prefix
        id: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Delete a zone and every event in it
    Delete {
        /// Zone id or unique prefix
        id: String,
    },
}

/// Event commands.
#[derive(Debug, Subcommand)]
pub enum EventCommand {
    /// Record a new event in a zone
    Add(AddEventCommand),

    /// List a zone's events, pending first
    List {
        /// Zone id or unique prefix
        zone_id: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Mark an event completed, or pending again
    Toggle {
        /// Event id or unique prefix
        event_id: String,
    },

    /// Delete an event
    Delete {
        /// Event id or unique prefix
        event_id: String,
    },
}

/// Arguments for `event add`.
#[derive(Debug, Args)]
pub struct AddEventCommand {
    /// Zone id or unique prefix
    pub zone_id: String,

    /// What happened
    pub description: String,

    /// Attach a photo (at most two)
    #[arg(short, long = "photo", value_name = "FILE")]
    pub photos: Vec<PathBuf>,
}

/// Share commands.
#[derive(Debug, Subcommand)]
pub enum ShareCommand {
    /// Share a single event
    Event {
        /// Event id or unique prefix
        event_id: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: ShareFormat,
    },

    /// Share a summary of every event in a zone
    Zone {
        /// Zone id or unique prefix
        zone_id: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: ShareFormat,
    },
}

/// Administrator command arguments.
#[derive(Debug, Args)]
pub struct AdminCommand {
    /// Administrator password
    #[arg(short, long)]
    pub password: String,

    /// The administrator action
    #[command(subcommand)]
    pub action: AdminAction,
}

/// Administrator actions.
#[derive(Debug, Subcommand)]
pub enum AdminAction {
    /// Show zone and event counts
    Stats {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the activity log, newest first
    Logs {
        /// Maximum number of entries
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Change the administrator password
    SetPassword {
        /// New password
        new: String,

        /// New password again
        confirm: String,
    },
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for share commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ShareFormat {
    /// Message text with `*` emphasis, for chat apps
    #[default]
    Text,
    /// Message text without emphasis, for e-mail
    Plain,
    /// Printable HTML page
    Html,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_format_default() {
        assert_eq!(ShareFormat::default(), ShareFormat::Text);
    }

    #[test]
    fn test_share_format_value_names() {
        let names: Vec<_> = ShareFormat::value_variants()
            .iter()
            .filter_map(|v| v.to_possible_value())
            .map(|v| v.get_name().to_string())
            .collect();
        assert_eq!(names, ["text", "plain", "html"]);
    }

    #[test]
    fn test_zone_command_debug() {
        let cmd = ZoneCommand::Show {
            id: "abc".to_string(),
            json: true,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
        assert!(debug_str.contains("abc"));
    }

    #[test]
    fn test_add_event_command_debug() {
        let cmd = AddEventCommand {
            zone_id: "z1".to_string(),
            description: "Leak".to_string(),
            photos: vec![PathBuf::from("leak.jpg")],
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Leak"));
        assert!(debug_str.contains("leak.jpg"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
