use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{BzrService, Error, Result, relevance::RelevantSelection};
use bzr_domain::{NewBlogPost, PostStatus, keywords, slug};
use bzr_providers::{chat::ChatMessage, fallback};

const DEFAULT_SYSTEM_PROMPT: &str =
	"Ti si stručni asistent za bezbednost i zdravlje na radu (BZR) u Republici Srbiji. Odgovaraj \
	 na srpskom jeziku, latinicom, jasno i praktično, i pozivaj se na važeće propise kada je to \
	 moguće. Ako pitanje nije iz oblasti BZR, ljubazno to naglasi.";
const MAX_TITLE_CHARS: usize = 120;
const MAX_EXCERPT_CHARS: usize = 200;
const MAX_CONTEXT_CHARS: usize = 300;
const FALLBACK_SLUG: &str = "ai-odgovor";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
	pub question: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
	Llm,
	Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedPost {
	pub post_id: Uuid,
	pub title: String,
	pub slug: String,
	pub excerpt: Option<String>,
	pub category: String,
	pub score: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
	pub answer: String,
	pub source: AnswerSource,
	pub fallback_topic: Option<String>,
	pub related_posts: Vec<RelatedPost>,
	pub min_score: f32,
	pub enough_existing: bool,
	pub created_post_id: Option<Uuid>,
}

impl BzrService {
	pub async fn ask(&self, req: AskRequest) -> Result<AskResponse> {
		let agent = &self.cfg.agent;

		if !agent.enabled {
			return Err(Error::InvalidRequest { message: "The AI agent is disabled.".to_string() });
		}

		let question = req.question.trim();

		if question.is_empty() {
			return Err(Error::InvalidRequest { message: "question must be non-empty.".to_string() });
		}
		if question.chars().count() > agent.max_question_chars as usize {
			return Err(Error::InvalidRequest {
				message: format!(
					"question must be at most {} characters.",
					agent.max_question_chars
				),
			});
		}

		let selection = self.select_for_answer(question).await;
		let related = related_posts(&selection, agent.max_related_posts as usize);
		let messages = build_messages(agent.system_prompt.as_deref(), &related, question);
		let (answer, source, fallback_topic) =
			match self.providers.llm.complete(&self.cfg.providers.llm, &messages).await {
				Ok(answer) => (answer, AnswerSource::Llm, None),
				Err(err) => {
					let canned = fallback::canned_answer(question);

					tracing::warn!(
						error = %err,
						topic = canned.topic,
						"LLM completion failed. Serving canned answer."
					);

					(canned.answer.to_string(), AnswerSource::Fallback, Some(canned.topic.to_string()))
				},
			};
		let created_post_id = if source == AnswerSource::Llm
			&& !selection.enough_existing
			&& agent.auto_create_articles
		{
			self.create_article(question, &answer).await
		} else {
			None
		};

		tracing::info!(
			source = ?source,
			related = related.len(),
			enough_existing = selection.enough_existing,
			created = created_post_id.is_some(),
			"Question answered."
		);

		Ok(AskResponse {
			answer,
			source,
			fallback_topic,
			related_posts: related,
			min_score: selection.min_score,
			enough_existing: selection.enough_existing,
			created_post_id,
		})
	}

	async fn create_article(&self, question: &str, answer: &str) -> Option<Uuid> {
		let post = draft_article(question, answer, &self.cfg.agent.article_category);

		match self.store.create_post(&post).await {
			Ok(created) => {
				tracing::info!(post_id = %created.id, slug = %created.slug, "Pending article created.");

				Some(created.id)
			},
			Err(err) => {
				tracing::warn!(error = %err, "Failed to create pending article from answer.");

				None
			},
		}
	}
}

fn related_posts(selection: &RelevantSelection, limit: usize) -> Vec<RelatedPost> {
	selection
		.posts
		.iter()
		.take(limit)
		.map(|item| RelatedPost {
			post_id: item.post.id,
			title: item.post.title.clone(),
			slug: item.post.slug.clone(),
			excerpt: item.post.excerpt.clone(),
			category: item.post.category.clone(),
			score: item.score,
		})
		.collect()
}

pub fn build_messages(
	system_prompt: Option<&str>,
	related: &[RelatedPost],
	question: &str,
) -> Vec<ChatMessage> {
	let mut messages = vec![ChatMessage::system(system_prompt.unwrap_or(DEFAULT_SYSTEM_PROMPT))];

	if !related.is_empty() {
		let mut context = String::from("Povezani članci objavljeni na portalu:");

		for post in related {
			context.push_str("\n- ");
			context.push_str(&post.title);

			if let Some(excerpt) = post.excerpt.as_deref().filter(|text| !text.trim().is_empty()) {
				context.push_str(": ");
				context.push_str(&truncate_chars(excerpt.trim(), MAX_CONTEXT_CHARS));
			}
		}

		messages.push(ChatMessage::system(context));
	}

	messages.push(ChatMessage::user(question));

	messages
}

/// Builds the pending article stored for an answered question.
pub fn draft_article(question: &str, answer: &str, category: &str) -> NewBlogPost {
	let title = truncate_chars(question.trim(), MAX_TITLE_CHARS);
	let base_slug = slug::slugify(&title);
	let base_slug = if base_slug.is_empty() { FALLBACK_SLUG.to_string() } else { base_slug };
	let suffix = Uuid::new_v4().simple().to_string();
	let mut tags: Vec<String> = keywords::extract_keywords(question).into_iter().collect();

	tags.sort();

	NewBlogPost {
		slug: format!("{base_slug}-{}", &suffix[..8]),
		title,
		body: answer.to_string(),
		excerpt: Some(truncate_chars(answer.trim(), MAX_EXCERPT_CHARS)),
		category: category.to_string(),
		tags,
		status: PostStatus::Pending,
	}
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
	match text.char_indices().nth(max_chars) {
		Some((idx, _)) => format!("{}…", text[..idx].trim_end()),
		None => text.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn truncates_on_char_boundaries() {
		assert_eq!(truncate_chars("čćžšđ", 3), "čćž…");
		assert_eq!(truncate_chars("kratko", 10), "kratko");
	}

	#[test]
	fn draft_article_is_pending_with_sorted_keyword_tags() {
		let post = draft_article("Kada je obavezna procena rizika?", "Odgovor.", "AI odgovori");

		assert_eq!(post.status, PostStatus::Pending);
		assert_eq!(post.tags, vec!["obavezna".to_string(), "procena".to_string(), "rizika".to_string()]);
		assert!(post.slug.starts_with("kada-je-obavezna-procena-rizika-"));
		assert_eq!(post.excerpt.as_deref(), Some("Odgovor."));
	}

	#[test]
	fn punctuation_only_question_gets_fallback_slug() {
		let post = draft_article("???", "Odgovor.", "AI odgovori");

		assert!(post.slug.starts_with("ai-odgovor-"));
	}

	#[test]
	fn related_context_is_added_as_system_message() {
		let related = vec![RelatedPost {
			post_id: Uuid::new_v4(),
			title: "Obuka zaposlenih".to_string(),
			slug: "obuka-zaposlenih".to_string(),
			excerpt: Some("Kada i kako se sprovodi obuka.".to_string()),
			category: "Obuke".to_string(),
			score: 0.6,
		}];
		let messages = build_messages(None, &related, "Kada se radi obuka?");

		assert_eq!(messages.len(), 3);
		assert!(messages[1].content.contains("Obuka zaposlenih: Kada i kako se sprovodi obuka."));
		assert_eq!(messages[2].content, "Kada se radi obuka?");
	}
}
