//! Heuristic relevance of a blog post to a free-text question.
//!
//! The score adds fixed field weights for phrase and keyword substring hits and divides by a
//! nominal maximum. Title hits weigh more than tag and category hits, which weigh more than body
//! hits.
//!
//! The nominal maximum counts every bonus once, but several keyword bonuses can fire for the same
//! field, so it is a loose bound and real scores rarely come close to 1.0.

use std::collections::HashSet;

use crate::content::BlogPost;

pub const TITLE_PHRASE_WEIGHT: f32 = 0.7;
pub const BODY_PHRASE_WEIGHT: f32 = 0.5;
pub const EXCERPT_PHRASE_WEIGHT: f32 = 0.6;
pub const TITLE_KEYWORD_WEIGHT: f32 = 0.3;
pub const TAG_KEYWORD_WEIGHT: f32 = 0.2;
pub const CATEGORY_KEYWORD_WEIGHT: f32 = 0.2;
pub const BODY_KEYWORD_WEIGHT: f32 = 0.1;

const PHRASE_WEIGHTS: f32 = TITLE_PHRASE_WEIGHT + BODY_PHRASE_WEIGHT + EXCERPT_PHRASE_WEIGHT;
const KEYWORD_WEIGHTS: f32 =
	TITLE_KEYWORD_WEIGHT + TAG_KEYWORD_WEIGHT + CATEGORY_KEYWORD_WEIGHT + BODY_KEYWORD_WEIGHT;

/// The fields of a post that take part in scoring.
#[derive(Debug, Clone, Copy)]
pub struct ScoringFields<'a> {
	pub title: &'a str,
	pub body: &'a str,
	pub excerpt: Option<&'a str>,
	pub category: &'a str,
	pub tags: &'a [String],
}
impl<'a> From<&'a BlogPost> for ScoringFields<'a> {
	fn from(post: &'a BlogPost) -> Self {
		Self {
			title: &post.title,
			body: &post.body,
			excerpt: post.excerpt.as_deref(),
			category: &post.category,
			tags: &post.tags,
		}
	}
}

pub fn max_possible_score(keyword_count: usize) -> f32 {
	PHRASE_WEIGHTS + keyword_count as f32 * KEYWORD_WEIGHTS
}

/// Sum of the field bonuses before normalization.
pub fn raw_score(fields: ScoringFields<'_>, keywords: &HashSet<String>, raw_query: &str) -> f32 {
	let title = fields.title.to_lowercase();
	let body = fields.body.to_lowercase();
	let excerpt = fields.excerpt.map(str::to_lowercase);
	let category = fields.category.to_lowercase();
	let tags: Vec<String> = fields.tags.iter().map(|tag| tag.to_lowercase()).collect();
	// The raw query is matched as is, so an empty query is a substring of every field.
	let phrase = raw_query.to_lowercase();
	let mut score = 0.0_f32;

	if title.contains(&phrase) {
		score += TITLE_PHRASE_WEIGHT;
	}
	if body.contains(&phrase) {
		score += BODY_PHRASE_WEIGHT;
	}
	if excerpt.as_deref().is_some_and(|excerpt| excerpt.contains(&phrase)) {
		score += EXCERPT_PHRASE_WEIGHT;
	}

	for keyword in keywords {
		let keyword = keyword.as_str();

		if title.contains(keyword) {
			score += TITLE_KEYWORD_WEIGHT;
		}
		if tags.iter().any(|tag| tag.contains(keyword)) {
			score += TAG_KEYWORD_WEIGHT;
		}
		if category.contains(keyword) {
			score += CATEGORY_KEYWORD_WEIGHT;
		}
		if body.contains(keyword) {
			score += BODY_KEYWORD_WEIGHT;
		}
	}

	score
}

/// Normalized score in `[0, 1]`.
pub fn score(fields: ScoringFields<'_>, keywords: &HashSet<String>, raw_query: &str) -> f32 {
	let raw = raw_score(fields, keywords, raw_query);
	let max_possible = max_possible_score(keywords.len()).max(1.0);

	(raw / max_possible).min(1.0)
}

pub fn score_post(post: &BlogPost, keywords: &HashSet<String>, raw_query: &str) -> f32 {
	score(ScoringFields::from(post), keywords, raw_query)
}
