use crate::errors::AppError;
use crate::models::Classification;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Instructions sent with every classification request. The reply contract
/// (strict JSON, fixed fields) is what `Classification` deserializes.
const SYSTEM_PROMPT: &str = r#"
    You will be given an action performed by the user. Respond with a valid JSON in the following format:

    {
      "action": "string",
      "subactions": [
        {"action": "string", "severity": int}
      ],
      "keywords": ["string"],
      "severity": int,
      "factor": int
    }

    • The “action” should be a concise summary of the action (preferably 4-5 words or less, maximum 10 words).
    • “subactions” are all the underlying actions and implications for people, the planet, ecology, customs, etc. Each sub-action should have a severity rating.
    • Severity rating: 0 = positive, 5 = neutral, 10 = very serious.
    • “keywords” should be a list of 10 words or proper nouns related to the action.
    • “severity” is the overall seriousness of the action (0 to 10).
    • “factor” is a metric to assess the impact of the action (1 = everyday task, 1000 = significant impact).

    If the language is not English, translate the action and respond in English.

    Example:

    Action: Eating a hamburger

    Response:

    {
      "action": "eating a hamburger",
      "subactions": [
        {"action": "tastes good", "severity": 2},
        {"action": "bad for health", "severity": 6},
        {"action": "supports intensive farming", "severity": 7},
        {"action": "promotes fast food industry", "severity": 5}
      ],
      "keywords": ["food", "health", "meat", "farming", "fast food", "nutrition", "ecology", "diet", "restaurant", "environment"],
      "severity": 6,
      "factor": 50
    }

    Remember to think about all the implications of the action in the subactions.
    Do not include any Markdown or other formatting in the response. Only provide the JSON output.
    "#;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Deserialize)]
struct ChatReplyMessage {
    content: Option<String>,
}

/// Chat-completions client that turns free-text actions into classifications.
#[derive(Clone)]
pub struct LlmClient {
    http: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl LlmClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// `OPENAI_API_KEY` is required; `OPENAI_MODEL` and `OPENAI_BASE_URL`
    /// fall back to the hosted defaults.
    pub fn from_env() -> Result<Self, String> {
        let api_key =
            env::var("OPENAI_API_KEY").map_err(|_| "OPENAI_API_KEY is not set".to_string())?;
        let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url = env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Ok(Self::new(api_key, model, base_url))
    }

    /// Classify one user-described action. Any failure along the way — the
    /// call itself, an empty reply, JSON that does not parse, out-of-range
    /// values — surfaces as an internal error.
    pub async fn classify(&self, message: &str) -> Result<Classification, AppError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: message,
                },
            ],
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let reply: ChatResponse = response.json().await?;
        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::internal("LLM reply carried no content"))?;

        parse_classification(&content)
    }
}

fn parse_classification(content: &str) -> Result<Classification, AppError> {
    let classification: Classification = serde_json::from_str(content)?;
    if !(0..=10).contains(&classification.severity) {
        return Err(AppError::internal(format!(
            "severity {} outside 0..=10",
            classification.severity
        )));
    }
    if !(1..=1000).contains(&classification.factor) {
        return Err(AppError::internal(format!(
            "factor {} outside 1..=1000",
            classification.factor
        )));
    }
    Ok(classification)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    const HAMBURGER_REPLY: &str = r#"{
      "action": "eating a hamburger",
      "subactions": [
        {"action": "tastes good", "severity": 2},
        {"action": "bad for health", "severity": 6}
      ],
      "keywords": ["food", "health", "meat", "farming", "fast food", "nutrition", "ecology", "diet", "restaurant", "environment"],
      "severity": 6,
      "factor": 50
    }"#;

    #[test]
    fn parses_a_well_formed_reply() {
        let classification = parse_classification(HAMBURGER_REPLY).unwrap();
        assert_eq!(classification.action, "eating a hamburger");
        assert_eq!(classification.subactions.len(), 2);
        assert_eq!(classification.keywords.len(), 10);
        assert_eq!(classification.severity, 6);
        assert_eq!(classification.factor, 50);
    }

    #[test]
    fn rejects_non_json_replies() {
        let err = parse_classification("Sure! Here is the JSON you asked for:").unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let high_severity = HAMBURGER_REPLY.replace(r#""severity": 6"#, r#""severity": 11"#);
        assert!(parse_classification(&high_severity).is_err());

        let zero_factor = HAMBURGER_REPLY.replace(r#""factor": 50"#, r#""factor": 0"#);
        assert!(parse_classification(&zero_factor).is_err());

        let huge_factor = HAMBURGER_REPLY.replace(r#""factor": 50"#, r#""factor": 1001"#);
        assert!(parse_classification(&huge_factor).is_err());
    }

    #[test]
    fn prompt_keeps_the_classification_contract() {
        assert!(SYSTEM_PROMPT.contains("Respond with a valid JSON"));
        assert!(SYSTEM_PROMPT.contains("0 = positive, 5 = neutral, 10 = very serious"));
        assert!(SYSTEM_PROMPT.contains("1 = everyday task, 1000 = significant impact"));
        assert!(SYSTEM_PROMPT.contains("Only provide the JSON output."));
    }
}
