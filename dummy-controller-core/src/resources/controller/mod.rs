use std::{env::var, time::Duration};

use regex::Regex;
use thiserror::Error;

pub const DEFAULT_REQUEUE_COOLDOWN_SECS: u64 = 60 * 5;
pub const DEFAULT_RETRY_DELAY_MILLIS: u64 = 1000;
pub const DEFAULT_CONTAINER_NAME: &str = "dummy-object-bound-container";
pub const DEFAULT_CONTAINER_IMAGE: &str = "nginx:latest";

pub const REQUEUE_COOLDOWN_ENV: &str = "DUMMY_CONTROLLER_REQUEUE_COOLDOWN_SECS";
pub const RETRY_DELAY_ENV: &str = "DUMMY_CONTROLLER_RETRY_DELAY_MILLIS";
pub const CONTAINER_NAME_ENV: &str = "DUMMY_CONTROLLER_CONTAINER_NAME";
pub const CONTAINER_IMAGE_ENV: &str = "DUMMY_CONTROLLER_CONTAINER_IMAGE";
pub const NAMESPACE_ENV: &str = "DUMMY_CONTROLLER_NAMESPACE";

// RFC 1123 label, the format required for container names
const CONTAINER_NAME_PATTERN: &str = "^[a-z0-9]([-a-z0-9]*[a-z0-9])?$";
const CONTAINER_NAME_MAX_LENGTH: usize = 63;

/// Immutable controller configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// delay before the next pass after a successful one
    pub requeue_cooldown: Duration,
    /// delay used whenever a pass asks to be retried right away
    pub retry_delay: Duration,
    pub container_name: String,
    pub container_image: String,
    /// watch a single namespace instead of the whole cluster
    pub namespace: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("'{}' is not a valid number of {} ({})!", .value, .unit, .var)]
    InvalidNumber {
        var: &'static str,
        value: String,
        unit: &'static str,
    },
    #[error("'{}' is not a valid container name, expected a lowercase RFC 1123 label!", .0)]
    InvalidContainerName(String),
    #[error("Container image can't be empty!")]
    EmptyContainerImage,
    #[error("Couldn't compile the validation pattern! {}", .0)]
    Pattern(regex::Error),
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            requeue_cooldown: Duration::from_secs(DEFAULT_REQUEUE_COOLDOWN_SECS),
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MILLIS),
            container_name: DEFAULT_CONTAINER_NAME.to_owned(),
            container_image: DEFAULT_CONTAINER_IMAGE.to_owned(),
            namespace: None,
        }
    }
}

impl ControllerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| var(key).ok())
    }

    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let config = Self {
            requeue_cooldown: match lookup(REQUEUE_COOLDOWN_ENV) {
                Some(value) => {
                    Duration::from_secs(parse_number(REQUEUE_COOLDOWN_ENV, value, "seconds")?)
                }
                None => defaults.requeue_cooldown,
            },
            retry_delay: match lookup(RETRY_DELAY_ENV) {
                Some(value) => {
                    Duration::from_millis(parse_number(RETRY_DELAY_ENV, value, "milliseconds")?)
                }
                None => defaults.retry_delay,
            },
            container_name: lookup(CONTAINER_NAME_ENV).unwrap_or(defaults.container_name),
            container_image: lookup(CONTAINER_IMAGE_ENV).unwrap_or(defaults.container_image),
            namespace: lookup(NAMESPACE_ENV).filter(|namespace| !namespace.is_empty()),
        };

        config.validated()
    }

    pub fn validated(self) -> Result<Self, ConfigError> {
        let pattern = Regex::new(CONTAINER_NAME_PATTERN).map_err(ConfigError::Pattern)?;

        if self.container_name.len() > CONTAINER_NAME_MAX_LENGTH
            || !pattern.is_match(&self.container_name)
        {
            return Err(ConfigError::InvalidContainerName(self.container_name));
        }

        if self.container_image.trim().is_empty() {
            return Err(ConfigError::EmptyContainerImage);
        }

        Ok(self)
    }
}

fn parse_number(var: &'static str, value: String, unit: &'static str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { var, value, unit })
}
