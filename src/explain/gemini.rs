//! Blocking client for the Gemini `generateContent` API.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::{ExplainerConfig, API_KEY_VAR};
use crate::error::{BulbLabError, Result};

use super::{PromptRequest, TextGenerator};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

impl<'a> From<&'a PromptRequest> for GenerateContentRequest<'a> {
    fn from(request: &'a PromptRequest) -> Self {
        Self {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: &request.system_instruction,
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate; empty if there is none.
    fn text(&self) -> String {
        self.candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Gemini text generation over HTTPS.
pub struct GeminiClient {
    agent: ureq::Agent,
    url: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a client. Fails if no credential is configured.
    pub fn new(config: &ExplainerConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| BulbLabError::MissingCredential {
                variable: API_KEY_VAR.to_string(),
            })?;

        let agent = ureq::AgentBuilder::new().timeout(config.timeout).build();
        let url = format!(
            "{}/models/{}:generateContent",
            config.endpoint.trim_end_matches('/'),
            config.model
        );

        Ok(Self {
            agent,
            url,
            api_key,
        })
    }

    /// Full request URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, request: &PromptRequest) -> Result<String> {
        debug!("requesting explanation from {}", self.url);

        let body = GenerateContentRequest::from(request);
        let response = self
            .agent
            .post(&self.url)
            .set("x-goog-api-key", &self.api_key)
            .send_json(&body)
            .map_err(|e| match e {
                ureq::Error::Status(code, response) => {
                    BulbLabError::transport(format!("HTTP {code} {}", response.status_text()))
                }
                ureq::Error::Transport(transport) => BulbLabError::transport(transport.to_string()),
            })?;

        let parsed: GenerateContentResponse = response
            .into_json()
            .map_err(|e| BulbLabError::malformed_response(e.to_string()))?;

        Ok(parsed.text())
    }
}
