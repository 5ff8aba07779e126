use std::path::PathBuf;

use clap::Parser;

use crate::data::categorical::DEFAULT_CATEGORY_CAP;

/// File opened at startup when no path is given.
pub const DEFAULT_DATA_FILE: &str = "Shipwreck Database.csv";

/// Explore historical shipwreck records.
#[derive(Debug, Parser)]
#[command(name = "shipwreck-explorer", version, about)]
pub struct Cli {
    /// Dataset to open at startup (.csv, .json or .parquet).
    #[arg(default_value = DEFAULT_DATA_FILE)]
    pub data: PathBuf,

    /// Categories shown per bar chart before the rest are grouped as "Other".
    #[arg(long, default_value_t = DEFAULT_CATEGORY_CAP)]
    pub top_n: usize,
}

/// Viewer settings, fixed for the lifetime of the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub data_path: PathBuf,
    pub top_n: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            top_n: DEFAULT_CATEGORY_CAP,
        }
    }
}

impl From<Cli> for ViewerConfig {
    fn from(cli: Cli) -> Self {
        Self {
            data_path: cli.data,
            top_n: cli.top_n,
        }
    }
}
