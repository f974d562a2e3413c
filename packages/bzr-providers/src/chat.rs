use std::time::Duration;

use reqwest::{Client, header::HeaderMap};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};
use bzr_config::LlmProviderConfig;

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	System,
	User,
	Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
	pub role: Role,
	pub content: String,
}
impl ChatMessage {
	pub fn system(content: impl Into<String>) -> Self {
		Self { role: Role::System, content: content.into() }
	}

	pub fn user(content: impl Into<String>) -> Self {
		Self { role: Role::User, content: content.into() }
	}
}

/// Wire format spoken by the configured provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFlavor {
	/// `POST /v1/chat/completions` style, bearer auth.
	OpenAi,
	/// `POST /v1/messages` style, `x-api-key` auth, system prompt outside the message list.
	Anthropic,
}
impl ApiFlavor {
	pub fn for_provider(provider_id: &str) -> Self {
		if provider_id.trim().eq_ignore_ascii_case("anthropic") {
			Self::Anthropic
		} else {
			Self::OpenAi
		}
	}
}

pub async fn complete(cfg: &LlmProviderConfig, messages: &[ChatMessage]) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let flavor = ApiFlavor::for_provider(&cfg.provider_id);
	let body = build_request_body(cfg, flavor, messages);
	let res = client.post(&url).headers(request_headers(cfg, flavor)?).json(&body).send().await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_completion(flavor, &json)
}

fn request_headers(cfg: &LlmProviderConfig, flavor: ApiFlavor) -> Result<HeaderMap> {
	match flavor {
		ApiFlavor::OpenAi => crate::auth_headers(&cfg.api_key, &cfg.default_headers),
		ApiFlavor::Anthropic => {
			let mut headers = crate::api_key_headers(&cfg.api_key, &cfg.default_headers)?;

			if !headers.contains_key("anthropic-version") {
				headers.insert("anthropic-version", ANTHROPIC_VERSION.parse()?);
			}

			Ok(headers)
		},
	}
}

pub fn build_request_body(
	cfg: &LlmProviderConfig,
	flavor: ApiFlavor,
	messages: &[ChatMessage],
) -> Value {
	match flavor {
		ApiFlavor::OpenAi => serde_json::json!({
			"model": cfg.model,
			"temperature": cfg.temperature,
			"max_tokens": cfg.max_tokens,
			"messages": messages,
		}),
		ApiFlavor::Anthropic => {
			let system = messages
				.iter()
				.filter(|message| message.role == Role::System)
				.map(|message| message.content.as_str())
				.collect::<Vec<_>>()
				.join("\n\n");
			let turns: Vec<&ChatMessage> =
				messages.iter().filter(|message| message.role != Role::System).collect();

			serde_json::json!({
				"model": cfg.model,
				"temperature": cfg.temperature,
				"max_tokens": cfg.max_tokens,
				"system": system,
				"messages": turns,
			})
		},
	}
}

pub fn parse_completion(flavor: ApiFlavor, json: &Value) -> Result<String> {
	let content = match flavor {
		ApiFlavor::OpenAi => json
			.get("choices")
			.and_then(|v| v.as_array())
			.and_then(|arr| arr.first())
			.and_then(|choice| choice.get("message"))
			.and_then(|msg| msg.get("content"))
			.and_then(|c| c.as_str()),
		ApiFlavor::Anthropic => json
			.get("content")
			.and_then(|v| v.as_array())
			.and_then(|blocks| {
				blocks
					.iter()
					.find(|block| block.get("type").and_then(|t| t.as_str()) == Some("text"))
			})
			.and_then(|block| block.get("text"))
			.and_then(|t| t.as_str()),
	};
	let Some(content) = content else {
		return Err(Error::InvalidResponse {
			message: "Completion response is missing message content.".to_string(),
		});
	};
	let trimmed = content.trim();

	if trimmed.is_empty() {
		return Err(Error::InvalidResponse {
			message: "Completion response content is empty.".to_string(),
		});
	}

	Ok(trimmed.to_string())
}
