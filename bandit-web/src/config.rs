use std::{str::FromStr, time::Duration};

use serde::Deserialize;
use serde_with::serde_as;
use strum::{Display, EnumString};
use thiserror::Error;
use time::{macros::format_description, UtcOffset};

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub backend: BackendSettings,
    #[serde(default)]
    pub timer: TimerSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    #[serde(default)]
    pub secure_cookies: bool,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct BackendSettings {
    pub base_url: String,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub timeout_secs: u64,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct TimerSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub tick_millis: u64,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug, Default)]
pub struct DisplaySettings {
    /// Offset used to decide which day an event belongs to, as `+05:30` or
    /// `Z`. Unset means the host's local offset at startup.
    #[serde_as(as = "Option<serde_with::DisplayFromStr>")]
    #[serde(default)]
    pub utc_offset: Option<DisplayOffset>,
}

/// A fixed UTC offset between -14:00 and +14:00.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayOffset(UtcOffset);

#[derive(Error, Debug, PartialEq)]
pub enum OffsetError {
    #[error("expected an offset like +05:30 or Z, got {0:?}")]
    Unparsable(String),
    #[error("offset {0} is outside -14:00..=+14:00")]
    OutOfRange(String),
}

const MAX_OFFSET_SECONDS: i32 = 14 * 3600;

impl FromStr for DisplayOffset {
    type Err = OffsetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("z") || value.eq_ignore_ascii_case("utc") {
            return Ok(Self(UtcOffset::UTC));
        }

        let offset = UtcOffset::parse(
            value,
            format_description!("[offset_hour sign:mandatory]:[offset_minute]"),
        )
        .map_err(|_| OffsetError::Unparsable(value.to_string()))?;

        if offset.whole_seconds().abs() > MAX_OFFSET_SECONDS {
            return Err(OffsetError::OutOfRange(value.to_string()));
        }

        Ok(Self(offset))
    }
}

impl std::fmt::Display for DisplayOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (hours, minutes, _) = self.0.as_hms();
        let sign = if self.0.is_negative() { '-' } else { '+' };
        write!(f, "{}{:02}:{:02}", sign, hours.abs(), minutes.abs())
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self { tick_millis: 1000 }
    }
}

impl BackendSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl TimerSettings {
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.tick_millis.max(1))
    }
}

impl DisplaySettings {
    pub fn offset(&self) -> UtcOffset {
        match self.utc_offset {
            Some(DisplayOffset(offset)) => offset,
            None => UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC),
        }
    }
}

pub fn read_config() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("no working directory: {}", e)))?;
    let config_directory = base_path.join("config");

    let environment = Environment::from_str(
        std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .as_str(),
    )
    .map_err(|e| config::ConfigError::Message(format!("invalid APP_ENVIRONMENT: {}", e)))?;
    let environment_filename = format!("{}.yaml", environment);

    let settings = config::Config::builder()
        .add_source(config::File::from(config_directory.join("base.yaml")))
        .add_source(config::File::from(
            config_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("BANDIT")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[derive(Display, Debug, EnumString, PartialEq)]
pub enum Environment {
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
}
