//! WASM bindings for Bulb Lab Core.
//!
//! The browser owns the network, so explanation requests are split in two:
//! the lab hands out a prompt with a ticket, the page performs the fetch and
//! reports back with the same ticket. Answers for outdated tickets are
//! dropped.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmCircuitLab } from 'bulb_lab_core';
//!
//! await init();
//!
//! const lab = new WasmCircuitLab();
//! lab.set_battery_count(2);
//! lab.toggle_switch();
//! draw(JSON.parse(lab.geometry_json()));
//!
//! const step = JSON.parse(lab.request_explanation());
//! if (step.kind === 'request') {
//!   try {
//!     const text = await askService(step.request);
//!     lab.complete_explanation(step.ticket, text);
//!   } catch (e) {
//!     lab.fail_explanation(step.ticket, String(e), false);
//!   }
//! }
//! ```

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::circuit::battery_count_from_f64;
use crate::config::{API_KEY_VAR, DEFAULT_TEMPERATURE};
use crate::error::BulbLabError;
use crate::explain::{plan_explanation, Explanation, ExplanationPlan, PromptRequest};
use crate::session::{LabCommand, LabSession};
use crate::ConnectionType;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(e: BulbLabError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Tickets cross the boundary as JS numbers.
fn ticket_id(ticket: f64) -> Result<u64, BulbLabError> {
    if !ticket.is_finite() || ticket < 0.0 || ticket.fract() != 0.0 {
        return Err(BulbLabError::WasmError {
            message: format!("invalid explanation ticket {ticket}"),
        });
    }
    Ok(ticket as u64)
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum ExplanationStep {
    /// Already answered locally; nothing to fetch.
    Immediate { explanation: Explanation },
    /// The page must call the service and report back.
    Request { ticket: f64, request: PromptRequest },
}

/// WASM-compatible lab session.
#[wasm_bindgen]
pub struct WasmCircuitLab {
    session: LabSession,
}

#[wasm_bindgen]
impl WasmCircuitLab {
    /// Create a lab with one cell in series and the switch open.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmCircuitLab {
        WasmCircuitLab {
            session: LabSession::default(),
        }
    }

    #[wasm_bindgen]
    pub fn toggle_switch(&mut self) -> Result<(), JsValue> {
        self.session.apply(LabCommand::ToggleSwitch).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn set_switch(&mut self, closed: bool) -> Result<(), JsValue> {
        self.session.apply(LabCommand::SetSwitch(closed)).map_err(to_js)
    }

    /// Set the number of cells.
    ///
    /// Rejects zero, negative, fractional and non-finite numbers.
    #[wasm_bindgen]
    pub fn set_battery_count(&mut self, count: f64) -> Result<(), JsValue> {
        let count = battery_count_from_f64(count).map_err(to_js)?;
        self.session.apply(LabCommand::SetBatteryCount(count)).map_err(to_js)
    }

    /// Set the wiring, `"series"` or `"parallel"`.
    #[wasm_bindgen]
    pub fn set_connection(&mut self, connection: &str) -> Result<(), JsValue> {
        let connection: ConnectionType = connection.parse().map_err(to_js)?;
        self.session.apply(LabCommand::SetConnection(connection)).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.session.apply(LabCommand::Reset).map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn battery_count(&self) -> u32 {
        self.session.configuration().battery_count()
    }

    #[wasm_bindgen(getter)]
    pub fn connection(&self) -> String {
        self.session.configuration().connection().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn switch_closed(&self) -> bool {
        self.session.configuration().switch_closed()
    }

    #[wasm_bindgen(getter)]
    pub fn voltage(&self) -> f64 {
        self.session.electrical().voltage
    }

    #[wasm_bindgen(getter)]
    pub fn current(&self) -> f64 {
        self.session.electrical().current
    }

    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> f64 {
        self.session.electrical().brightness
    }

    /// Voltage readout, e.g. `"3.0 V"`.
    #[wasm_bindgen]
    pub fn voltage_label(&self) -> String {
        self.session.electrical().voltage_label()
    }

    /// Current readout, e.g. `"0.30 A"`.
    #[wasm_bindgen]
    pub fn current_label(&self) -> String {
        self.session.electrical().current_label()
    }

    /// Diagram geometry as JSON.
    #[wasm_bindgen]
    pub fn geometry_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.geometry())
            .map_err(|e| to_js(BulbLabError::serialization("geometry", e)))
    }

    /// Configuration, readouts, geometry and explanation state as JSON.
    #[wasm_bindgen]
    pub fn frame_json(&self) -> Result<String, JsValue> {
        self.session.frame_json().map_err(to_js)
    }

    /// Start an explanation request.
    ///
    /// Returns JSON: `{"kind":"immediate","explanation":{...}}` when the
    /// answer is known locally (switch open), otherwise
    /// `{"kind":"request","ticket":n,"request":{...}}`.
    #[wasm_bindgen]
    pub fn request_explanation(&mut self) -> Result<String, JsValue> {
        let ticket = self.session.begin_explanation();

        let step = match plan_explanation(ticket.configuration(), DEFAULT_TEMPERATURE) {
            ExplanationPlan::Immediate(explanation) => {
                self.session.resolve_explanation(ticket.id(), explanation.clone());
                ExplanationStep::Immediate { explanation }
            }
            ExplanationPlan::Request(request) => ExplanationStep::Request {
                ticket: ticket.id() as f64,
                request,
            },
        };

        serde_json::to_string(&step)
            .map_err(|e| to_js(BulbLabError::serialization("explanation step", e)))
    }

    /// Deliver service text for a ticket. Returns `false` if it was stale.
    #[wasm_bindgen]
    pub fn complete_explanation(&mut self, ticket: f64, text: &str) -> Result<bool, JsValue> {
        let id = ticket_id(ticket).map_err(to_js)?;
        let explanation = Explanation::from_outcome(Ok(text.to_string()));
        Ok(self.session.resolve_explanation(id, explanation))
    }

    /// Report a failed service call for a ticket. Returns `false` if it was stale.
    #[wasm_bindgen]
    pub fn fail_explanation(
        &mut self,
        ticket: f64,
        message: &str,
        missing_credential: bool,
    ) -> Result<bool, JsValue> {
        let id = ticket_id(ticket).map_err(to_js)?;
        let error = if missing_credential {
            BulbLabError::MissingCredential {
                variable: API_KEY_VAR.to_string(),
            }
        } else {
            BulbLabError::transport(message)
        };
        let explanation = Explanation::from_outcome(Err(error));
        Ok(self.session.resolve_explanation(id, explanation))
    }

    /// Text currently shown, if any.
    #[wasm_bindgen]
    pub fn explanation(&self) -> Option<String> {
        self.session.explanation_status().text().map(str::to_string)
    }
}

impl Default for WasmCircuitLab {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::explain::{
        ExplanationSource, MISSING_CREDENTIAL_TEXT, SWITCH_OPEN_TEXT, TRANSIENT_FAILURE_TEXT,
    };

    fn request(lab: &mut WasmCircuitLab) -> Value {
        serde_json::from_str(&lab.request_explanation().unwrap()).unwrap()
    }

    fn closed_lab() -> WasmCircuitLab {
        let mut lab = WasmCircuitLab::new();
        lab.set_switch(true).unwrap();
        lab
    }

    #[test]
    fn test_open_switch_answers_immediately() {
        let mut lab = WasmCircuitLab::new();
        let step = request(&mut lab);
        assert_eq!(step["kind"], "immediate");
        assert_eq!(step["explanation"]["text"], SWITCH_OPEN_TEXT);
        assert_eq!(lab.explanation().as_deref(), Some(SWITCH_OPEN_TEXT));
    }

    #[test]
    fn test_request_then_complete() {
        let mut lab = closed_lab();
        let step = request(&mut lab);
        assert_eq!(step["kind"], "request");
        assert!(step["request"]["prompt"].is_string());
        assert_eq!(lab.explanation(), None);

        let ticket = step["ticket"].as_f64().unwrap();
        assert!(lab.complete_explanation(ticket, "전구가 켜졌어요.").unwrap());
        assert_eq!(lab.explanation().as_deref(), Some("전구가 켜졌어요."));
    }

    #[test]
    fn test_stale_ticket_after_command() {
        let mut lab = closed_lab();
        let ticket = request(&mut lab)["ticket"].as_f64().unwrap();

        lab.set_battery_count(2.0).unwrap();
        assert!(!lab.complete_explanation(ticket, "늦은 답변").unwrap());
        assert_eq!(lab.explanation(), None);
    }

    #[test]
    fn test_newer_request_supersedes() {
        let mut lab = closed_lab();
        let first = request(&mut lab)["ticket"].as_f64().unwrap();
        let second = request(&mut lab)["ticket"].as_f64().unwrap();

        assert!(!lab.complete_explanation(first, "old").unwrap());
        assert!(lab.complete_explanation(second, "new").unwrap());
        assert_eq!(lab.explanation().as_deref(), Some("new"));
        // Resolved tickets cannot be answered twice
        assert!(!lab.fail_explanation(second, "late", false).unwrap());
    }

    #[test]
    fn test_fail_explanation_fallbacks() {
        let mut lab = closed_lab();
        let ticket = request(&mut lab)["ticket"].as_f64().unwrap();
        assert!(lab.fail_explanation(ticket, "timeout", false).unwrap());
        assert_eq!(lab.explanation().as_deref(), Some(TRANSIENT_FAILURE_TEXT));

        let ticket = request(&mut lab)["ticket"].as_f64().unwrap();
        assert!(lab.fail_explanation(ticket, "", true).unwrap());
        assert_eq!(lab.explanation().as_deref(), Some(MISSING_CREDENTIAL_TEXT));
    }

    #[test]
    fn test_frame_reports_ready_source() {
        let mut lab = closed_lab();
        let ticket = request(&mut lab)["ticket"].as_f64().unwrap();
        lab.complete_explanation(ticket, "ok").unwrap();
        let frame: Value = serde_json::from_str(&lab.frame_json().unwrap()).unwrap();
        assert_eq!(frame["explanation"]["status"], "ready");
        assert_eq!(
            serde_json::to_value(ExplanationSource::Generated).unwrap(),
            frame["explanation"]["source"]
        );
    }

    #[test]
    fn test_ticket_id_rejects_malformed_numbers() {
        assert_eq!(ticket_id(3.0).unwrap(), 3);
        for bad in [-1.0, 1.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(ticket_id(bad), Err(BulbLabError::WasmError { .. })));
        }
    }
}
