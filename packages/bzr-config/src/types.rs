use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	#[serde(default)]
	pub relevance: Relevance,
	#[serde(default)]
	pub agent: Agent,
	pub security: Security,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub llm: LlmProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	#[serde(default = "default_max_tokens")]
	pub max_tokens: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

/// Thresholds for deciding whether existing articles already answer a question.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Relevance {
	/// First-pass minimum score.
	pub primary_min_score: f32,
	/// Second-pass minimum score, tried only when the first pass finds fewer than
	/// `min_results` posts.
	pub relaxed_min_score: f32,
	pub min_results: u32,
}
impl Default for Relevance {
	fn default() -> Self {
		Self { primary_min_score: 0.5, relaxed_min_score: 0.3, min_results: 3 }
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Agent {
	pub enabled: bool,
	pub max_question_chars: u32,
	pub max_related_posts: u32,
	/// Store the generated answer as a pending article when too few relevant posts exist.
	pub auto_create_articles: bool,
	pub article_category: String,
	pub system_prompt: Option<String>,
}
impl Default for Agent {
	fn default() -> Self {
		Self {
			enabled: true,
			max_question_chars: 2_000,
			max_related_posts: 5,
			auto_create_articles: true,
			article_category: "AI odgovori".to_string(),
			system_prompt: None,
		}
	}
}

#[derive(Debug, Deserialize)]
pub struct Security {
	pub bind_localhost_only: bool,
	pub api_auth_token: Option<String>,
}

fn default_max_tokens() -> u32 {
	1_200
}
