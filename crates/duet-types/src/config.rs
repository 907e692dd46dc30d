//! Load-once couple configuration.
//!
//! Parsed from the environment exactly once at startup into an immutable
//! struct. A missing or unparsable relationship-start date or reunion offset
//! is fatal: the server must refuse to start rather than tick down to a
//! wrong instant.

use chrono::NaiveDate;
use thiserror::Error;

const DEFAULT_APP_TITLE: &str = "Our Love Story";

#[derive(Debug, Clone)]
pub struct CoupleConfig {
    /// Display names for the two participants.
    pub partner1: String,
    pub partner2: String,
    pub app_title: String,
    /// Calendar date the relationship started, ISO `YYYY-MM-DD`.
    pub relationship_start: NaiveDate,
    /// Days past the start date the reunion countdown targets.
    pub reunion_offset_days: u32,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{var} is not an ISO calendar date (YYYY-MM-DD): {value:?}")]
    InvalidDate { var: &'static str, value: String },

    #[error("{var} must be a positive whole number of days: {value:?}")]
    InvalidOffset { var: &'static str, value: String },
}

impl CoupleConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source. Split out from `from_env` so tests
    /// can supply values without touching process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let start_raw = lookup("DUET_RELATIONSHIP_START")
            .ok_or(ConfigError::Missing("DUET_RELATIONSHIP_START"))?;
        let relationship_start =
            NaiveDate::parse_from_str(start_raw.trim(), "%Y-%m-%d").map_err(|_| {
                ConfigError::InvalidDate {
                    var: "DUET_RELATIONSHIP_START",
                    value: start_raw.clone(),
                }
            })?;

        let offset_raw =
            lookup("DUET_REUNION_DAYS").ok_or(ConfigError::Missing("DUET_REUNION_DAYS"))?;
        let reunion_offset_days: u32 = offset_raw
            .trim()
            .parse()
            .ok()
            .filter(|days| *days > 0)
            .ok_or(ConfigError::InvalidOffset {
                var: "DUET_REUNION_DAYS",
                value: offset_raw,
            })?;

        Ok(CoupleConfig {
            partner1: lookup("DUET_PARTNER1").unwrap_or_else(|| "Partner 1".into()),
            partner2: lookup("DUET_PARTNER2").unwrap_or_else(|| "Partner 2".into()),
            app_title: lookup("DUET_APP_TITLE").unwrap_or_else(|| DEFAULT_APP_TITLE.into()),
            relationship_start,
            reunion_offset_days,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a [(&'static str, &'a str)]) -> impl Fn(&'static str) -> Option<String> + 'a {
        let map: HashMap<&'static str, String> =
            vars.iter().map(|(k, v)| (*k, v.to_string())).collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn parses_a_full_configuration() {
        let cfg = CoupleConfig::from_lookup(lookup(&[
            ("DUET_RELATIONSHIP_START", "2025-09-07"),
            ("DUET_REUNION_DAYS", "150"),
            ("DUET_PARTNER1", "Abdulmuheez"),
            ("DUET_PARTNER2", "Khadeejah"),
        ]))
        .unwrap();

        assert_eq!(
            cfg.relationship_start,
            NaiveDate::from_ymd_opt(2025, 9, 7).unwrap()
        );
        assert_eq!(cfg.reunion_offset_days, 150);
        assert_eq!(cfg.partner1, "Abdulmuheez");
        assert_eq!(cfg.app_title, DEFAULT_APP_TITLE);
    }

    #[test]
    fn missing_start_date_is_fatal() {
        let err = CoupleConfig::from_lookup(lookup(&[("DUET_REUNION_DAYS", "50")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DUET_RELATIONSHIP_START")));
    }

    #[test]
    fn unparsable_date_is_fatal_not_defaulted() {
        let err = CoupleConfig::from_lookup(lookup(&[
            ("DUET_RELATIONSHIP_START", "07/09/2025"),
            ("DUET_REUNION_DAYS", "50"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDate { .. }));
    }

    #[test]
    fn zero_or_garbage_offset_is_rejected() {
        for bad in ["0", "-3", "fifty"] {
            let err = CoupleConfig::from_lookup(lookup(&[
                ("DUET_RELATIONSHIP_START", "2025-09-07"),
                ("DUET_REUNION_DAYS", bad),
            ]))
            .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidOffset { .. }), "{bad}");
        }
    }
}
