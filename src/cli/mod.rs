//! CLI module for the transit assistant
//!
//! Provides command-line interface parsing and handling for the transit-agent binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod chat;
pub mod commands;
pub mod init;
pub mod output;

use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Alexandria Transit Assistant
///
/// Answers public transport questions about Alexandria in English and Arabic,
/// planning trips with OpenTripPlanner.
#[derive(Parser, Debug)]
#[command(
    name = "transit-agent",
    version,
    about = "Alexandria transit assistant (English / العربية)",
    long_about = "Answers public transport questions about Alexandria, Egypt, written in\n\
                  English, Modern Standard Arabic or Egyptian Arabic.\n\n\
                  Run without arguments to start an interactive chat.",
    after_help = "EXAMPLES:\n    \
                  transit-agent                                   # Interactive chat\n    \
                  transit-agent ask \"from Victoria to Sidi Gaber\"  # One question\n    \
                  transit-agent serve --port 5000                 # Web interface\n    \
                  transit-agent init                              # Write .env and transit.toml"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "transit.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive chat (default)
    Chat,

    /// Start the web interface and HTTP API
    Serve {
        /// Address to bind (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Do not reload transit.toml when it changes
        #[arg(long)]
        no_watch: bool,
    },

    /// Ask a single question and exit
    Ask {
        /// The question, e.g. "from Raml Station to Smouha"
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Print the structured reply as JSON
        #[arg(long)]
        json: bool,

        /// Departure time (HH:MM); defaults to now
        #[arg(long, value_name = "HH:MM", value_parser = crate::otp::parse_departure_time)]
        depart: Option<NaiveTime>,

        /// Travel date (YYYY-MM-DD); defaults to today
        #[arg(long, value_name = "YYYY-MM-DD", value_parser = crate::otp::parse_departure_date)]
        date: Option<NaiveDate>,
    },

    /// Show OTP connectivity and component status
    Status,

    /// Resolve a place name to a stop
    Geocode {
        /// Place name in English or Arabic
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Search the stop catalog
    Stops {
        /// Text to search for; lists the catalog when omitted
        query: Option<String>,

        /// Maximum number of stops
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Inspect and edit the user memory file
    #[command(subcommand)]
    Memory(MemoryCommands),

    /// Write .env and transit.toml
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Show configuration information
    Config {
        /// Validate the configuration and exit non-zero on errors
        #[arg(long)]
        validate: bool,
    },
}

/// Memory subcommands
#[derive(Subcommand, Debug)]
pub enum MemoryCommands {
    /// Recently used places
    Recent {
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Saved favorites
    Favorites,

    /// Past searches
    History {
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Show preferences
    Prefs,

    /// Change preferences
    SetPrefs {
        /// Comma-separated OTP modes, e.g. TRANSIT,BUS
        #[arg(long, value_delimiter = ',')]
        modes: Option<Vec<String>>,

        /// Maximum walking distance in meters
        #[arg(long)]
        max_walk: Option<u32>,

        /// Maximum number of transfers
        #[arg(long)]
        max_transfers: Option<u32>,

        /// Reply language when a query has no letters (en or ar)
        #[arg(long)]
        language: Option<String>,

        /// Request wheelchair-accessible trips
        #[arg(long)]
        wheelchair: Option<bool>,
    },

    /// Save a favorite place
    AddFavorite {
        name: String,
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lon: f64,
    },

    /// Remove a favorite by name
    RemoveFavorite { name: String },

    /// Drop recent places and searches older than the retention period
    ClearOld {
        /// Age in days (defaults to memory.retention_days)
        #[arg(long)]
        days: Option<i64>,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
