use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use restful_objects_client::scenario::lifecycle::DEFAULT_SAMPLE_ID;
use restful_objects_client::{DEFAULT_BASE_URL, LogLevel};
use serde::Deserialize;

const SETTINGS_FILE: &str = "objects-demo.json";
const DEFAULT_EXCEL_FILE: &str = "Data for POST.xlsx";

/// Where the products to create are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// First sheet of a spreadsheet file.
    #[default]
    Excel,
    /// One line of JSON pasted on stdin.
    Paste,
    /// The built-in demo product.
    Literal,
}

/// Exercise the objects REST API: create, read, update, patch and delete.
#[derive(Debug, Default, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Input source for the products to create.
    #[arg(long, value_enum)]
    pub source: Option<SourceKind>,
    /// Spreadsheet to read when the source is `excel`.
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Collection URL of the objects resource.
    #[arg(long)]
    pub base_url: Option<String>,
    /// Object fetched before anything is created.
    #[arg(long)]
    pub sample_id: Option<String>,
    /// Only update, patch and delete the first created product with this name.
    #[arg(long = "select")]
    pub select_name: Option<String>,
    /// Settings file; defaults to ./objects-demo.json, then the user config dir.
    #[arg(long)]
    pub settings: Option<PathBuf>,
    /// Log every request.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Optional settings file contents.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: Option<String>,
    pub sample_id: Option<String>,
    pub source: Option<SourceKind>,
    pub excel_file: Option<PathBuf>,
    pub select_name: Option<String>,
    pub log_level: Option<LogLevel>,
}

/// Effective configuration: CLI over settings file over defaults.
#[derive(Debug)]
pub struct RunConfig {
    pub base_url: String,
    pub sample_id: String,
    pub source: SourceKind,
    pub excel_file: PathBuf,
    pub select_name: Option<String>,
    pub log_level: LogLevel,
}

impl RunConfig {
    pub fn resolve(cli: Cli, settings: Settings) -> Self {
        let log_level = if cli.verbose {
            LogLevel::Debug
        } else {
            settings.log_level.unwrap_or_default()
        };

        Self {
            base_url: cli
                .base_url
                .or(settings.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            sample_id: cli
                .sample_id
                .or(settings.sample_id)
                .unwrap_or_else(|| DEFAULT_SAMPLE_ID.to_string()),
            source: cli.source.or(settings.source).unwrap_or_default(),
            excel_file: cli
                .file
                .or(settings.excel_file)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_EXCEL_FILE)),
            select_name: cli.select_name.or(settings.select_name),
            log_level,
        }
    }
}

/// Load settings from `explicit`, or from the first default location that exists.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings, String> {
    if let Some(path) = explicit {
        return read_settings(path);
    }

    let mut candidates = vec![];
    if let Ok(mut cwd) = std::env::current_dir() {
        cwd.push(SETTINGS_FILE);
        candidates.push(cwd);
    }
    if let Some(mut config_dir) = dirs::config_dir() {
        config_dir.push("objects-demo");
        config_dir.push("settings.json");
        candidates.push(config_dir);
    }

    match candidates.into_iter().find(|path| path.is_file()) {
        Some(path) => read_settings(&path),
        None => Ok(Settings::default()),
    }
}

fn read_settings(path: &Path) -> Result<Settings, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&contents).map_err(|e| format!("Invalid {}: {e}", path.display()))
}
