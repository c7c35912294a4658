//! band2influx extractor
//!
//! Reads Mi Band activity samples from a Gadgetbridge SQLite export and
//! ships them to InfluxDB.
//!
//! # Overview
//!
//! - **Push**: send every sample to a band2influx collector over HTTP with
//!   Basic authentication (`band2influx push`)
//! - **Import**: write the samples straight into InfluxDB, no collector
//!   involved (`band2influx import`)
//!
//! Both commands read the whole table, then submit it as one request. A run
//! either delivers everything or fails; nothing is retried.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod progress;
pub mod source;

// Re-export commonly used types
pub use error::{CliError, Result};
pub use source::{SourceOrder, SourceReader};

use std::path::PathBuf;

use band2influx_common::sink::DEFAULT_INFLUX_ENDPOINT;
use clap::{Args, Parser, Subcommand};

use crate::config::{DEFAULT_COLLECTOR_URL, DEFAULT_DATABASE, DEFAULT_TIMEOUT_SECS};

/// band2influx - Mi Band activity to InfluxDB
#[derive(Parser, Debug)]
#[command(name = "band2influx")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Request timeout in seconds
    #[arg(long, env = "B2I_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout_secs: u64,
}

/// Which database file to read and in what order
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Gadgetbridge database file
    pub db_file: PathBuf,

    /// Sample order by timestamp
    #[arg(long, value_enum, default_value_t = SourceOrder::Ascending)]
    pub order: SourceOrder,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send the samples to a band2influx collector
    Push {
        #[command(flatten)]
        source: SourceArgs,

        /// Collector base URL
        #[arg(long, env = "B2I_HOST", default_value = DEFAULT_COLLECTOR_URL)]
        host: String,

        /// Username for the collector
        #[arg(long, env = "B2I_USER")]
        user: String,

        /// Password for the collector
        #[arg(long, env = "B2I_PASS", hide_env_values = true)]
        pass: String,
    },

    /// Write the samples directly into InfluxDB
    Import {
        #[command(flatten)]
        source: SourceArgs,

        /// InfluxDB base URL
        #[arg(long, env = "B2I_INFLUX_ENDPOINT", default_value = DEFAULT_INFLUX_ENDPOINT)]
        influx_endpoint: String,

        /// InfluxDB database
        #[arg(long, env = "B2I_DB", default_value = DEFAULT_DATABASE)]
        db: String,

        /// InfluxDB user
        #[arg(long, env = "B2I_INFLUX_USER")]
        influx_user: Option<String>,

        /// InfluxDB password
        #[arg(long, env = "B2I_INFLUX_PASS", hide_env_values = true)]
        influx_pass: Option<String>,
    },
}

impl Commands {
    /// Header printed before the command runs
    pub fn banner(&self) -> &'static str {
        match self {
            Commands::Push { .. } => "band2influx push: sending activity samples to a collector",
            Commands::Import { .. } => "Mi Band Gadgetbridge database importer",
        }
    }
}
