// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Application configuration.
//!
//! This module manages the application configuration file and the log
//! output, the terminal belongs to the user interface so log records go to a
//! file.

use std::fs::OpenOptions;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::export::ExportMode;

const CONFIG_NAME: &str = "draaiboek";

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub version: u32,

    /// Identity of the signed-in user, memberships and invites hang off it.
    pub user_id: String,

    /// Name given to the program created on first start.
    pub program_name: String,

    pub database_file: String,
    pub log_file: String,

    pub export_dir: String,
    pub default_export_mode: ExportMode,

    /// Directories scanned for the track lookup library.
    pub media_dirs: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            user_id: std::env::var("USER").unwrap_or_else(|_| "presentator".to_string()),
            program_name: "Mijn programma".to_string(),
            database_file: "draaiboek.db".to_string(),
            log_file: "draaiboek.log".to_string(),
            export_dir: ".".to_string(),
            default_export_mode: ExportMode::Full,
            media_dirs: vec![],
        }
    }
}

/// Loads the configuration file, writing the defaults on first start.
pub fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}

/// Sends log records to the configured log file.
///
/// The level defaults to `info` and can be changed with `RUST_LOG`.
pub fn init_logging(cfg: &AppConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&cfg.log_file)
        .with_context(|| format!("Failed to open log file {}", cfg.log_file))?;

    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("Failed to initialise logging")?;

    Ok(())
}
