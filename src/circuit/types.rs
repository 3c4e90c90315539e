//! Core types for circuit configuration.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{BulbLabError, Result};

use super::validate::validate_battery_count;

/// How the cells are wired together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ConnectionType {
    /// Cells chained end to end; voltages add.
    #[default]
    Series,
    /// Cells side by side between two bus bars; voltage stays at one cell.
    Parallel,
}

impl ConnectionType {
    /// Lowercase identifier used on the wire and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionType::Series => "series",
            ConnectionType::Parallel => "parallel",
        }
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConnectionType {
    type Err = BulbLabError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "series" => Ok(ConnectionType::Series),
            "parallel" => Ok(ConnectionType::Parallel),
            _ => Err(BulbLabError::UnknownConnectionType {
                name: s.to_string(),
            }),
        }
    }
}

/// A complete description of the experiment setup.
///
/// Fields are private so that every value in circulation has passed
/// validation; the model and layout engine rely on
/// `1 <= battery_count <= MAX_BATTERY_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CircuitConfiguration {
    battery_count: u32,
    connection: ConnectionType,
    switch_closed: bool,
}

impl CircuitConfiguration {
    /// Create a validated configuration.
    pub fn new(
        battery_count: u32,
        connection: ConnectionType,
        switch_closed: bool,
    ) -> Result<Self> {
        validate_battery_count(battery_count)?;
        Ok(Self {
            battery_count,
            connection,
            switch_closed,
        })
    }

    /// Number of identical cells.
    pub fn battery_count(&self) -> u32 {
        self.battery_count
    }

    /// Wiring of the cells.
    pub fn connection(&self) -> ConnectionType {
        self.connection
    }

    /// Whether the switch completes the loop.
    pub fn switch_closed(&self) -> bool {
        self.switch_closed
    }

    /// Copy with a different battery count.
    pub fn with_battery_count(self, battery_count: u32) -> Result<Self> {
        Self::new(battery_count, self.connection, self.switch_closed)
    }

    /// Copy with a different connection type.
    pub fn with_connection(self, connection: ConnectionType) -> Self {
        Self { connection, ..self }
    }

    /// Copy with the switch set to `closed`.
    pub fn with_switch(self, switch_closed: bool) -> Self {
        Self {
            switch_closed,
            ..self
        }
    }
}

impl Default for CircuitConfiguration {
    /// One cell, series, switch open.
    fn default() -> Self {
        Self {
            battery_count: 1,
            connection: ConnectionType::Series,
            switch_closed: false,
        }
    }
}

impl fmt::Display for CircuitConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} x cell, {}, switch {}",
            self.battery_count,
            self.connection,
            if self.switch_closed { "closed" } else { "open" }
        )
    }
}
