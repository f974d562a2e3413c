mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Agent, Config, LlmProviderConfig, Postgres, Providers, Relevance, Security, Service, Storage,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::validation("service.http_bind", "must be non-empty."));
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::validation("storage.postgres.dsn", "must be non-empty."));
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::validation(
			"storage.postgres.pool_max_conns",
			"must be greater than zero.",
		));
	}

	validate_llm(&cfg.providers.llm)?;
	validate_relevance(&cfg.relevance)?;

	if cfg.agent.max_question_chars == 0 {
		return Err(Error::validation("agent.max_question_chars", "must be greater than zero."));
	}
	if cfg.agent.auto_create_articles && cfg.agent.article_category.trim().is_empty() {
		return Err(Error::validation(
			"agent.article_category",
			"must be non-empty when agent.auto_create_articles is true.",
		));
	}

	Ok(())
}

fn validate_llm(llm: &LlmProviderConfig) -> Result<()> {
	for (field, value) in [
		("providers.llm.api_base", &llm.api_base),
		("providers.llm.api_key", &llm.api_key),
		("providers.llm.model", &llm.model),
	] {
		if value.trim().is_empty() {
			return Err(Error::validation(field, "must be non-empty."));
		}
	}

	if !llm.temperature.is_finite() {
		return Err(Error::validation("providers.llm.temperature", "must be a finite number."));
	}
	if !(0.0..=2.0).contains(&llm.temperature) {
		return Err(Error::validation("providers.llm.temperature", "must be in the range 0.0-2.0."));
	}
	if llm.max_tokens == 0 {
		return Err(Error::validation("providers.llm.max_tokens", "must be greater than zero."));
	}
	if llm.timeout_ms == 0 {
		return Err(Error::validation("providers.llm.timeout_ms", "must be greater than zero."));
	}

	Ok(())
}

fn validate_relevance(relevance: &Relevance) -> Result<()> {
	for (field, value) in [
		("relevance.primary_min_score", relevance.primary_min_score),
		("relevance.relaxed_min_score", relevance.relaxed_min_score),
	] {
		if !value.is_finite() {
			return Err(Error::validation(field, "must be a finite number."));
		}
		if !(0.0..=1.0).contains(&value) {
			return Err(Error::validation(field, "must be in the range 0.0-1.0."));
		}
	}

	if relevance.relaxed_min_score > relevance.primary_min_score {
		return Err(Error::validation(
			"relevance.relaxed_min_score",
			"must not exceed relevance.primary_min_score.",
		));
	}
	if relevance.min_results == 0 {
		return Err(Error::validation("relevance.min_results", "must be greater than zero."));
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.security.api_auth_token.as_deref().map(|token| token.trim().is_empty()).unwrap_or(false)
	{
		cfg.security.api_auth_token = None;
	}
	if cfg.agent.system_prompt.as_deref().map(|prompt| prompt.trim().is_empty()).unwrap_or(false) {
		cfg.agent.system_prompt = None;
	}

	cfg.providers.llm.api_base =
		cfg.providers.llm.api_base.trim().trim_end_matches('/').to_string();
}
