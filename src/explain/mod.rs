//! Natural-language explanations of the current circuit.
//!
//! The text itself comes from an external generative service behind the
//! [`TextGenerator`] trait. This module decides *whether* to ask, and turns
//! every failure into one of a few fixed messages so callers never see an
//! error:
//!
//! | Situation | Source | Network call |
//! |-----------|--------|--------------|
//! | Switch open | [`ExplanationSource::SwitchOpen`] | no |
//! | No credential | [`ExplanationSource::MissingCredential`] | no |
//! | Service returned text | [`ExplanationSource::Generated`] | yes |
//! | Service returned nothing | [`ExplanationSource::EmptyResponse`] | yes |
//! | Transport or decoding failure | [`ExplanationSource::TransientFailure`] | yes |
//!
//! Failed requests are not retried; the transient message asks the user to
//! try again.

#[cfg(feature = "gemini")]
mod gemini;
mod prompt;

#[cfg(feature = "gemini")]
pub use gemini::GeminiClient;
pub use prompt::{build_prompt, connection_name, PromptRequest, SYSTEM_INSTRUCTION};

use log::{error, warn};
use serde::Serialize;

use crate::circuit::CircuitConfiguration;
use crate::config::{ExplainerConfig, API_KEY_VAR, DEFAULT_TEMPERATURE};
use crate::error::{BulbLabError, Result};

/// Shown when the switch is open; no request is made.
pub const SWITCH_OPEN_TEXT: &str = "스위치가 열려 있어 전류가 흐르지 않습니다. \
스위치를 닫아 전구에 불을 켜보세요! 전구가 켜져야 밝기를 관찰할 수 있습니다.";

/// Shown when no credential is configured.
pub const MISSING_CREDENTIAL_TEXT: &str =
    "API 키가 설정되지 않았습니다. 환경 변수(API_KEY) 설정을 확인해주세요.";

/// Shown when the service answered without any text.
pub const EMPTY_RESPONSE_TEXT: &str = "설명을 불러올 수 없습니다.";

/// Shown when the request failed; the user is asked to retry.
pub const TRANSIENT_FAILURE_TEXT: &str =
    "AI 선생님과 연결하는데 문제가 생겼어요. 잠시 후 다시 시도해주세요.";

/// A backend capable of producing text for a prompt.
pub trait TextGenerator {
    /// Produce text for the request.
    fn generate(&self, request: &PromptRequest) -> Result<String>;
}

impl<F> TextGenerator for F
where
    F: Fn(&PromptRequest) -> Result<String>,
{
    fn generate(&self, request: &PromptRequest) -> Result<String> {
        self(request)
    }
}

/// Where an explanation's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplanationSource {
    Generated,
    SwitchOpen,
    MissingCredential,
    EmptyResponse,
    TransientFailure,
}

/// Text ready to show to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    pub text: String,
    pub source: ExplanationSource,
}

impl Explanation {
    fn fallback(source: ExplanationSource, text: &str) -> Self {
        Self {
            text: text.to_string(),
            source,
        }
    }

    /// The fixed open-switch message.
    pub fn switch_open() -> Self {
        Self::fallback(ExplanationSource::SwitchOpen, SWITCH_OPEN_TEXT)
    }

    /// The fixed missing-credential message.
    pub fn missing_credential() -> Self {
        Self::fallback(ExplanationSource::MissingCredential, MISSING_CREDENTIAL_TEXT)
    }

    /// Map the outcome of a service call onto user-facing text.
    ///
    /// Errors are logged here and go no further.
    pub fn from_outcome(outcome: Result<String>) -> Self {
        match outcome {
            Ok(text) if text.trim().is_empty() => {
                warn!("explanation service returned no text");
                Self::fallback(ExplanationSource::EmptyResponse, EMPTY_RESPONSE_TEXT)
            }
            Ok(text) => Self {
                text: text.trim().to_string(),
                source: ExplanationSource::Generated,
            },
            Err(BulbLabError::MissingCredential { variable }) => {
                warn!("{variable} is missing from the environment");
                Self::missing_credential()
            }
            Err(e) => {
                error!("explanation request failed: {e}");
                Self::fallback(ExplanationSource::TransientFailure, TRANSIENT_FAILURE_TEXT)
            }
        }
    }

    /// Whether this is one of the fixed messages.
    pub fn is_fallback(&self) -> bool {
        self.source != ExplanationSource::Generated
    }
}

/// What to do about an explanation request.
#[derive(Debug, Clone, PartialEq)]
pub enum ExplanationPlan {
    /// The answer is known locally.
    Immediate(Explanation),
    /// The service has to be asked.
    Request(PromptRequest),
}

/// Decide how to answer for a configuration.
///
/// An open switch always short-circuits, whatever the credential situation.
pub fn plan_explanation(config: &CircuitConfiguration, temperature: f32) -> ExplanationPlan {
    if !config.switch_closed() {
        return ExplanationPlan::Immediate(Explanation::switch_open());
    }
    ExplanationPlan::Request(build_prompt(config, temperature))
}

#[cfg(feature = "gemini")]
fn default_backend(config: &ExplainerConfig) -> Option<Box<dyn TextGenerator>> {
    match GeminiClient::new(config) {
        Ok(client) => Some(Box::new(client)),
        Err(e) => {
            warn!("could not create explanation client: {e}");
            None
        }
    }
}

#[cfg(not(feature = "gemini"))]
fn default_backend(_config: &ExplainerConfig) -> Option<Box<dyn TextGenerator>> {
    warn!("built without an explanation backend; explanations will use fallback text");
    None
}

/// Produces explanations, falling back to fixed text on any failure.
pub struct Explainer {
    generator: Option<Box<dyn TextGenerator>>,
    temperature: f32,
}

impl Explainer {
    /// Explainer backed by the given generator.
    pub fn new(generator: Box<dyn TextGenerator>, temperature: f32) -> Self {
        Self {
            generator: Some(generator),
            temperature,
        }
    }

    /// Explainer with no backend; closed-switch requests report a missing credential.
    pub fn unconfigured() -> Self {
        Self {
            generator: None,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Build the default backend from configuration.
    pub fn from_config(config: &ExplainerConfig) -> Self {
        if !config.has_credential() {
            warn!("{API_KEY_VAR} is not set; explanations will use fallback text");
            return Self::unconfigured();
        }

        match default_backend(config) {
            Some(generator) => Self::new(generator, config.temperature),
            None => Self::unconfigured(),
        }
    }

    /// Whether a backend is available.
    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    /// Explain a configuration. Never fails.
    pub fn explain(&self, config: &CircuitConfiguration) -> Explanation {
        let request = match plan_explanation(config, self.temperature) {
            ExplanationPlan::Immediate(explanation) => return explanation,
            ExplanationPlan::Request(request) => request,
        };

        let outcome = match &self.generator {
            Some(generator) => generator.generate(&request),
            None => Err(BulbLabError::MissingCredential {
                variable: API_KEY_VAR.to_string(),
            }),
        };

        Explanation::from_outcome(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::circuit::ConnectionType;

    fn closed(n: u32, connection: ConnectionType) -> CircuitConfiguration {
        CircuitConfiguration::new(n, connection, true).unwrap()
    }

    fn counting_explainer(reply: Result<String>) -> (Explainer, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let reply = std::cell::RefCell::new(Some(reply));
        let generator = move |_: &PromptRequest| {
            seen.set(seen.get() + 1);
            reply
                .borrow_mut()
                .take()
                .unwrap_or_else(|| Ok("again".to_string()))
        };
        (Explainer::new(Box::new(generator), 0.7), calls)
    }

    #[test]
    fn test_open_switch_skips_service() {
        let (explainer, calls) = counting_explainer(Ok("unused".to_string()));
        let config = CircuitConfiguration::new(3, ConnectionType::Parallel, false).unwrap();

        let explanation = explainer.explain(&config);
        assert_eq!(explanation, Explanation::switch_open());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_open_switch_wins_over_missing_credential() {
        let config = CircuitConfiguration::default();
        let explanation = Explainer::unconfigured().explain(&config);
        assert_eq!(explanation.source, ExplanationSource::SwitchOpen);
    }

    #[test]
    fn test_missing_credential() {
        let explanation = Explainer::unconfigured().explain(&closed(1, ConnectionType::Series));
        assert_eq!(explanation.source, ExplanationSource::MissingCredential);
        assert_eq!(explanation.text, MISSING_CREDENTIAL_TEXT);
    }

    #[test]
    fn test_from_config_without_key_is_unconfigured() {
        let explainer = Explainer::from_config(&ExplainerConfig::new());
        assert!(!explainer.is_configured());
    }

    #[test]
    fn test_generated_text_is_trimmed() {
        let (explainer, calls) = counting_explainer(Ok("  전구가 더 밝아져요!\n".to_string()));
        let explanation = explainer.explain(&closed(2, ConnectionType::Series));
        assert_eq!(explanation.source, ExplanationSource::Generated);
        assert_eq!(explanation.text, "전구가 더 밝아져요!");
        assert!(!explanation.is_fallback());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_empty_response_falls_back() {
        let (explainer, _) = counting_explainer(Ok("   ".to_string()));
        let explanation = explainer.explain(&closed(1, ConnectionType::Parallel));
        assert_eq!(explanation.source, ExplanationSource::EmptyResponse);
        assert_eq!(explanation.text, EMPTY_RESPONSE_TEXT);
    }

    #[test]
    fn test_transport_failure_falls_back_without_retry() {
        let (explainer, calls) =
            counting_explainer(Err(BulbLabError::transport("connection refused")));
        let explanation = explainer.explain(&closed(3, ConnectionType::Series));
        assert_eq!(explanation.source, ExplanationSource::TransientFailure);
        assert_eq!(explanation.text, TRANSIENT_FAILURE_TEXT);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_malformed_response_is_transient() {
        let explanation =
            Explanation::from_outcome(Err(BulbLabError::malformed_response("not json")));
        assert_eq!(explanation.source, ExplanationSource::TransientFailure);
    }

    #[test]
    fn test_generator_receives_prompt() {
        let generator = |request: &PromptRequest| -> Result<String> {
            assert!(request.prompt.contains("2개"));
            assert!(request.prompt.contains("직렬"));
            Ok(format!("temperature {}", request.temperature))
        };
        let explainer = Explainer::new(Box::new(generator), 0.25);
        let explanation = explainer.explain(&closed(2, ConnectionType::Series));
        assert_eq!(explanation.text, "temperature 0.25");
    }

    #[test]
    fn test_plan() {
        assert_eq!(
            plan_explanation(&CircuitConfiguration::default(), 0.7),
            ExplanationPlan::Immediate(Explanation::switch_open())
        );
        assert!(matches!(
            plan_explanation(&closed(1, ConnectionType::Series), 0.7),
            ExplanationPlan::Request(_)
        ));
    }
}
