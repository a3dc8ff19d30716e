//! [`OpenAiAnalyst`] — the reqwest client for the chat-completions API.

use std::{path::PathBuf, time::Duration};

use felt_core::analysis::{AnalysisError, HandAnalyst};
use serde::{Deserialize, Serialize};

use crate::prompt::PromptTemplate;

const MAX_TOKENS: u32 = 800;
const TEMPERATURE: f32 = 0.3;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Connection settings for the analysis provider.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
  /// Bearer credential; without one every call fails as not-configured.
  pub api_key:     Option<String>,
  pub base_url:    String,
  pub model:       String,
  /// Optional prompt template file; the built-in template is the fallback.
  pub prompt_path: Option<PathBuf>,
}

impl Default for OpenAiConfig {
  fn default() -> Self {
    Self {
      api_key:     None,
      base_url:    "https://api.openai.com".into(),
      model:       "gpt-4o-mini".into(),
      prompt_path: None,
    }
  }
}

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ChatRequest<'a> {
  model:       &'a str,
  messages:    Vec<ChatMessage<'a>>,
  max_tokens:  u32,
  temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
  role:    &'a str,
  content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
  #[serde(default)]
  choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
  message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
  content: String,
}

// ─── Analyst ─────────────────────────────────────────────────────────────────

/// Hand-analysis client for the OpenAI chat-completions API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct OpenAiAnalyst {
  client: reqwest::Client,
  config: OpenAiConfig,
  prompt: PromptTemplate,
}

impl OpenAiAnalyst {
  /// Build the client. The analyst constructs even without a credential, so
  /// the server can boot with analysis disabled; the missing key surfaces
  /// per call as [`AnalysisError::NotConfigured`].
  pub fn new(config: OpenAiConfig) -> Result<Self, reqwest::Error> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;

    let prompt = match &config.prompt_path {
      Some(path) => PromptTemplate::load(path).unwrap_or_else(|e| {
        tracing::warn!(
          path = %path.display(),
          error = %e,
          "falling back to the built-in analysis prompt"
        );
        PromptTemplate::default()
      }),
      None => PromptTemplate::default(),
    };

    Ok(Self {
      client,
      config,
      prompt,
    })
  }

  fn url(&self) -> String {
    format!(
      "{}/v1/chat/completions",
      self.config.base_url.trim_end_matches('/')
    )
  }
}

impl HandAnalyst for OpenAiAnalyst {
  async fn analyze(
    &self,
    details: &str,
    result: i64,
  ) -> Result<String, AnalysisError> {
    let api_key = self
      .config
      .api_key
      .as_deref()
      .ok_or(AnalysisError::NotConfigured)?;

    let content = self.prompt.render(details, result);
    let request = ChatRequest {
      model:       &self.config.model,
      messages:    vec![ChatMessage {
        role:    "user",
        content: &content,
      }],
      max_tokens:  MAX_TOKENS,
      temperature: TEMPERATURE,
    };

    let response = self
      .client
      .post(self.url())
      .bearer_auth(api_key)
      .json(&request)
      .send()
      .await
      .map_err(|e| AnalysisError::Upstream(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Err(AnalysisError::Upstream(format!("{status}: {body}")));
    }

    let reply: ChatResponse = response
      .json()
      .await
      .map_err(|e| AnalysisError::Upstream(e.to_string()))?;

    reply
      .choices
      .into_iter()
      .next()
      .map(|choice| choice.message.content)
      .ok_or_else(|| AnalysisError::Upstream("no choices in response".into()))
  }
}
