//! Configuration resolution and validation.
//!
//! Each resolver prefers a CLI override, falls back to the config file and
//! fails with a named section/key when neither is present. `validate_config`
//! runs them all with no overrides.

use crate::domain::error::IndexError;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;
use std::path::PathBuf;

pub fn resolve_prices_path(
    config: &dyn ConfigPort,
    override_path: Option<&PathBuf>,
) -> Result<PathBuf, IndexError> {
    if let Some(p) = override_path {
        return Ok(p.clone());
    }
    match config.get_string("data", "prices_csv") {
        Some(s) if !s.trim().is_empty() => Ok(PathBuf::from(s.trim())),
        Some(_) => Err(IndexError::ConfigInvalid {
            section: "data".into(),
            key: "prices_csv".into(),
            reason: "prices_csv must not be empty".into(),
        }),
        None => Err(IndexError::ConfigMissing {
            section: "data".into(),
            key: "prices_csv".into(),
        }),
    }
}

pub fn resolve_output_path(
    config: &dyn ConfigPort,
    override_path: Option<&PathBuf>,
) -> Result<PathBuf, IndexError> {
    if let Some(p) = override_path {
        return Ok(p.clone());
    }
    match config.get_string("index", "output_csv") {
        Some(s) if !s.trim().is_empty() => Ok(PathBuf::from(s.trim())),
        Some(_) => Err(IndexError::ConfigInvalid {
            section: "index".into(),
            key: "output_csv".into(),
            reason: "output_csv must not be empty".into(),
        }),
        None => Err(IndexError::ConfigMissing {
            section: "index".into(),
            key: "output_csv".into(),
        }),
    }
}

pub fn resolve_dates(
    config: &dyn ConfigPort,
    start_override: Option<NaiveDate>,
    end_override: Option<NaiveDate>,
) -> Result<(NaiveDate, NaiveDate), IndexError> {
    let start = match start_override {
        Some(d) => d,
        None => parse_config_date(config, "start_date")?,
    };
    let end = match end_override {
        Some(d) => d,
        None => parse_config_date(config, "end_date")?,
    };

    if start > end {
        return Err(IndexError::ConfigInvalid {
            section: "index".into(),
            key: "start_date".into(),
            reason: "start_date must not be after end_date".into(),
        });
    }
    Ok((start, end))
}

fn parse_config_date(config: &dyn ConfigPort, key: &str) -> Result<NaiveDate, IndexError> {
    match config.get_string("index", key) {
        None => Err(IndexError::ConfigMissing {
            section: "index".into(),
            key: key.to_string(),
        }),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            IndexError::ConfigInvalid {
                section: "index".into(),
                key: key.to_string(),
                reason: "invalid date format (expected YYYY-MM-DD)".into(),
            }
        }),
    }
}

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), IndexError> {
    resolve_prices_path(config, None)?;
    resolve_dates(config, None, None)?;
    resolve_output_path(config, None)?;
    Ok(())
}
