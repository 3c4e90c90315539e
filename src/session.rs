//! Interactive lab session.
//!
//! A [`LabSession`] owns the current configuration and the explanation shown
//! next to it. Everything else is derived on demand.
//!
//! ## Explanation lifecycle
//!
//! ```text
//!              begin_explanation            resolve_explanation(ticket)
//!   Idle ---------------------------> Pending ---------------------------> Ready
//!    ^                                   |                                   |
//!    +------------- any command ---------+------------ any command ----------+
//! ```
//!
//! Every applied command bumps the session generation and drops whatever
//! explanation was shown or pending. Tickets carry the generation they were
//! issued at, so an answer that arrives after the configuration changed is
//! discarded instead of being shown against the wrong circuit.

use log::debug;
use serde::Serialize;

use crate::circuit::{CircuitConfiguration, ConnectionType};
use crate::error::{BulbLabError, Result};
use crate::explain::{Explainer, Explanation};
use crate::layout::{layout, GeometryDescription};
use crate::model::{evaluate, ElectricalState};

/// A user action on the experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabCommand {
    ToggleSwitch,
    SetSwitch(bool),
    SetBatteryCount(u32),
    SetConnection(ConnectionType),
    /// Back to one cell, series, switch open.
    Reset,
}

/// Explanation display state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ExplanationStatus {
    Idle,
    Pending,
    Ready(Explanation),
}

impl ExplanationStatus {
    /// The explanation text, if one is ready.
    pub fn text(&self) -> Option<&str> {
        match self {
            ExplanationStatus::Ready(explanation) => Some(&explanation.text),
            _ => None,
        }
    }
}

/// Proof that an explanation was requested for a specific configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplanationTicket {
    id: u64,
    configuration: CircuitConfiguration,
}

impl ExplanationTicket {
    /// Identifier to hand back to [`LabSession::resolve_explanation`].
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The configuration the explanation should describe.
    pub fn configuration(&self) -> &CircuitConfiguration {
        &self.configuration
    }
}

/// Everything a frontend needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabFrame {
    pub configuration: CircuitConfiguration,
    pub electrical: ElectricalState,
    pub voltage_label: String,
    pub current_label: String,
    pub geometry: GeometryDescription,
    pub explanation: ExplanationStatus,
}

/// The state of one running experiment.
#[derive(Debug, Clone, Default)]
pub struct LabSession {
    configuration: CircuitConfiguration,
    generation: u64,
    pending: Option<u64>,
    explanation: Option<Explanation>,
}

impl LabSession {
    /// Start a session from a configuration.
    pub fn new(configuration: CircuitConfiguration) -> Self {
        Self {
            configuration,
            ..Self::default()
        }
    }

    /// Current configuration.
    pub fn configuration(&self) -> &CircuitConfiguration {
        &self.configuration
    }

    /// Apply a command.
    ///
    /// A rejected command leaves the session untouched, explanation included.
    pub fn apply(&mut self, command: LabCommand) -> Result<()> {
        let current = self.configuration;
        let next = match command {
            LabCommand::ToggleSwitch => current.with_switch(!current.switch_closed()),
            LabCommand::SetSwitch(closed) => current.with_switch(closed),
            LabCommand::SetBatteryCount(count) => current.with_battery_count(count)?,
            LabCommand::SetConnection(connection) => current.with_connection(connection),
            LabCommand::Reset => CircuitConfiguration::default(),
        };

        debug!("{command:?}: {current} -> {next}");

        self.configuration = next;
        self.invalidate_explanation();
        Ok(())
    }

    fn invalidate_explanation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.pending = None;
        self.explanation = None;
    }

    /// Electrical state of the current configuration.
    pub fn electrical(&self) -> ElectricalState {
        evaluate(&self.configuration)
    }

    /// Geometry of the current configuration.
    pub fn geometry(&self) -> GeometryDescription {
        layout(&self.configuration, &self.electrical())
    }

    /// Explanation display state.
    pub fn explanation_status(&self) -> ExplanationStatus {
        match (&self.explanation, self.pending) {
            (Some(explanation), _) => ExplanationStatus::Ready(explanation.clone()),
            (None, Some(_)) => ExplanationStatus::Pending,
            (None, None) => ExplanationStatus::Idle,
        }
    }

    /// Start an explanation request.
    ///
    /// Clears the shown explanation and supersedes any earlier ticket.
    pub fn begin_explanation(&mut self) -> ExplanationTicket {
        self.generation = self.generation.wrapping_add(1);
        self.pending = Some(self.generation);
        self.explanation = None;

        ExplanationTicket {
            id: self.generation,
            configuration: self.configuration,
        }
    }

    /// Deliver the answer for a ticket.
    ///
    /// Returns `false` (and shows nothing) if the ticket is stale.
    pub fn resolve_explanation(&mut self, ticket_id: u64, explanation: Explanation) -> bool {
        if self.pending != Some(ticket_id) {
            debug!("discarding stale explanation for ticket {ticket_id}");
            return false;
        }
        self.pending = None;
        self.explanation = Some(explanation);
        true
    }

    /// Request and resolve an explanation synchronously.
    pub fn explain_with(&mut self, explainer: &Explainer) -> Explanation {
        let ticket = self.begin_explanation();
        let explanation = explainer.explain(ticket.configuration());
        self.resolve_explanation(ticket.id(), explanation.clone());
        explanation
    }

    /// Derive a complete frame.
    pub fn frame(&self) -> LabFrame {
        let electrical = self.electrical();
        LabFrame {
            configuration: self.configuration,
            electrical,
            voltage_label: electrical.voltage_label(),
            current_label: electrical.current_label(),
            geometry: layout(&self.configuration, &electrical),
            explanation: self.explanation_status(),
        }
    }

    /// Serialize a frame for a frontend.
    pub fn frame_json(&self) -> Result<String> {
        serde_json::to_string(&self.frame()).map_err(|e| BulbLabError::serialization("frame", e))
    }
}
