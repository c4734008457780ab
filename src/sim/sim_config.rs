use super::autopilot::ApMode;
use crate::tcas::TcasMode;
use std::{env, str::FromStr, time::Duration};
use strum_macros::Display;

/// A configuration variable that is set but unusable.
#[derive(Debug, Display, PartialEq, Eq)]
pub enum ConfigError {
    /// Variable name and raw value.
    Unparseable(&'static str, String),
    /// Variable name and raw value.
    OutOfRange(&'static str, String),
}

impl std::error::Error for ConfigError {}

/// Runtime configuration of the headless simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub time_scale: f64,
    pub max_intruders: usize,
    pub threat_prob: f64,
    pub tcas_mode: TcasMode,
    pub ap_mode: ApMode,
    pub tick: Duration,
    pub run_for: Duration,
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.5,
            max_intruders: 10,
            threat_prob: 0.30,
            tcas_mode: TcasMode::TaRa,
            ap_mode: ApMode::AltitudeHold,
            tick: Duration::from_millis(33),
            run_for: Duration::from_secs(60),
            seed: None,
        }
    }
}

impl SimConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> { Self::from_lookup(|key| env::var(key).ok()) }

    /// Builds the configuration from `lookup`, falling back to the defaults for unset keys.
    ///
    /// # Arguments
    /// - `lookup`: Returns the raw value of a variable, `None` if it is unset.
    ///
    /// # Returns
    /// - The configuration, or the first unusable variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let def = Self::default();
        let time_scale = parse_or(&lookup, "TCAS_TIME_SCALE", def.time_scale)?;
        if !(time_scale.is_finite() && time_scale > 0.0) {
            return Err(ConfigError::OutOfRange("TCAS_TIME_SCALE", time_scale.to_string()));
        }
        let threat_prob = parse_or(&lookup, "TCAS_THREAT_PROB", def.threat_prob)?;
        if !(0.0..=1.0).contains(&threat_prob) {
            return Err(ConfigError::OutOfRange("TCAS_THREAT_PROB", threat_prob.to_string()));
        }
        let tick_ms: u64 = parse_or(&lookup, "TCAS_TICK_MS", 33)?;
        if tick_ms == 0 {
            return Err(ConfigError::OutOfRange("TCAS_TICK_MS", tick_ms.to_string()));
        }
        let seed = match lookup("TCAS_SEED") {
            Some(raw) => Some(parse_raw("TCAS_SEED", &raw)?),
            None => None,
        };

        Ok(Self {
            time_scale,
            max_intruders: parse_or(&lookup, "TCAS_MAX_INTRUDERS", def.max_intruders)?,
            threat_prob,
            tcas_mode: parse_or(&lookup, "TCAS_MODE", def.tcas_mode)?,
            ap_mode: parse_or(&lookup, "TCAS_AP_MODE", def.ap_mode)?,
            tick: Duration::from_millis(tick_ms),
            run_for: Duration::from_secs(parse_or(&lookup, "TCAS_RUN_SECS", def.run_for.as_secs())?),
            seed,
        })
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str, default: T) -> Result<T, ConfigError> {
    lookup(key).map_or(Ok(default), |raw| parse_raw(key, &raw))
}

fn parse_raw<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Unparseable(key, raw.to_string()))
}
