//! Settings resolution for ssp-puller
//!
//! **Priority:** CLI / ENV → TOML → compiled defaults
//!
//! Also validates the year and start date inputs, which are fatal at
//! startup when malformed.

use crate::models::CalendarDay;
use crate::services::{ApiEndpoint, ClientSettings};
use ssp_common::config::{resolve_data_root, CompiledDefaults, TomlConfig, DATA_ROOT_ENV};
use ssp_common::{DaysInMonth, Error, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Values supplied on the command line; `None` defers to the TOML file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub data_root: Option<PathBuf>,
    pub schema: Option<String>,
    pub host: Option<String>,
    pub max_errors: Option<usize>,
    pub max_parallelism: Option<usize>,
    pub timeout_secs: Option<u64>,
    /// `--verify-tls` only ever turns verification on
    pub verify_tls: bool,
    pub force: bool,
}

/// Fully resolved settings for one process run
#[derive(Debug, Clone)]
pub struct PullerSettings {
    pub data_root: PathBuf,
    pub endpoint: ApiEndpoint,
    pub max_errors: usize,
    pub max_parallelism: usize,
    pub client: ClientSettings,
    pub force: bool,
    pub log_level: String,
}

impl PullerSettings {
    pub fn resolve(cli: &CliOverrides, toml_config: &TomlConfig) -> Self {
        let defaults = CompiledDefaults::default();

        let schema = cli
            .schema
            .clone()
            .or_else(|| toml_config.schema.clone())
            .unwrap_or_else(|| defaults.schema.to_string());
        let host = cli
            .host
            .clone()
            .or_else(|| toml_config.host.clone())
            .unwrap_or_else(|| defaults.host.to_string());

        let timeout_secs = cli
            .timeout_secs
            .or(toml_config.timeout_secs)
            .unwrap_or(defaults.timeout_secs);
        let verify_tls = cli.verify_tls || toml_config.verify_tls.unwrap_or(defaults.verify_tls);

        Self {
            data_root: resolve_data_root(cli.data_root.as_deref(), DATA_ROOT_ENV, toml_config),
            endpoint: ApiEndpoint::new(schema, host),
            max_errors: cli
                .max_errors
                .or(toml_config.max_errors)
                .unwrap_or(defaults.max_errors),
            max_parallelism: cli
                .max_parallelism
                .or(toml_config.max_parallelism)
                .unwrap_or(defaults.max_parallelism)
                .max(1),
            client: ClientSettings {
                timeout: Duration::from_secs(timeout_secs),
                verify_tls,
            },
            force: cli.force,
            log_level: toml_config.logging.level.clone(),
        }
    }
}

/// Accept a four-digit year starting with `20`
pub fn validate_year(year: &str) -> Result<String> {
    let well_formed =
        year.len() == 4 && year.starts_with("20") && year.bytes().all(|b| b.is_ascii_digit());
    if well_formed {
        Ok(year.to_string())
    } else {
        Err(Error::InvalidInput(format!(
            "you need to pass a valid year (from 2000 - 2099), got {:?}",
            year
        )))
    }
}

/// Parse `YYYY-MM-DD` into a start date valid for the calendar table
pub fn parse_start_date(value: &str, table: &DaysInMonth) -> Result<CalendarDay> {
    let invalid = || Error::InvalidInput(format!("invalid start date {:?}, expected YYYY-MM-DD", value));

    let mut parts = value.splitn(3, '-');
    let (Some(y), Some(m), Some(d)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };
    let year: i32 = y.parse().map_err(|_| invalid())?;
    let month: u32 = m.parse().map_err(|_| invalid())?;
    let day: u32 = d.parse().map_err(|_| invalid())?;

    if y.len() != 4 || day == 0 || day > table.days(month) {
        return Err(invalid());
    }
    Ok(CalendarDay::new(year, month, day))
}
