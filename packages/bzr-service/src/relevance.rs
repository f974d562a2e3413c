use serde::Serialize;

use crate::BzrService;
use bzr_domain::{BlogPost, keywords, relevance};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPost {
	pub post: BlogPost,
	pub score: f32,
}

/// Outcome of the two-pass threshold policy used before answering a question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelevantSelection {
	pub posts: Vec<ScoredPost>,
	/// Threshold the returned posts were filtered with.
	pub min_score: f32,
	pub relaxed: bool,
	/// Whether at least `relevance.min_results` posts qualified.
	pub enough_existing: bool,
}

/// Scores every post against `query`, unfiltered and in input order.
pub fn score_posts(posts: Vec<BlogPost>, query: &str) -> Vec<ScoredPost> {
	let keywords = keywords::extract_keywords(query);

	posts
		.into_iter()
		.map(|post| {
			let score = relevance::score_post(&post, &keywords, query);

			ScoredPost { post, score }
		})
		.collect()
}

/// Keeps posts scoring at least `min_score`, best first.
pub fn filter_ranked(scored: &[ScoredPost], min_score: f32) -> Vec<ScoredPost> {
	let mut out: Vec<ScoredPost> =
		scored.iter().filter(|item| item.score >= min_score).cloned().collect();

	out.sort_by(|a, b| b.score.total_cmp(&a.score));

	out
}

/// Applies the primary threshold, then the relaxed one when the primary pass is short.
///
/// The relaxed set replaces the primary set only when it reaches `min_results` itself.
pub fn select_two_pass(
	scored: &[ScoredPost],
	primary_min_score: f32,
	relaxed_min_score: f32,
	min_results: usize,
) -> RelevantSelection {
	let primary = filter_ranked(scored, primary_min_score);

	if primary.len() >= min_results {
		return RelevantSelection {
			posts: primary,
			min_score: primary_min_score,
			relaxed: false,
			enough_existing: true,
		};
	}

	let relaxed = filter_ranked(scored, relaxed_min_score);

	if relaxed.len() >= min_results {
		return RelevantSelection {
			posts: relaxed,
			min_score: relaxed_min_score,
			relaxed: true,
			enough_existing: true,
		};
	}

	RelevantSelection {
		posts: primary,
		min_score: primary_min_score,
		relaxed: false,
		enough_existing: false,
	}
}

impl BzrService {
	/// Published posts scoring at least `min_relevance_score`, best first.
	///
	/// Store failures are logged and yield an empty list.
	pub async fn find_relevant_blog_posts(
		&self,
		query: &str,
		min_relevance_score: f32,
	) -> Vec<ScoredPost> {
		let scored = self.score_published(query).await;

		filter_ranked(&scored, min_relevance_score)
	}

	pub async fn select_for_answer(&self, query: &str) -> RelevantSelection {
		let cfg = &self.cfg.relevance;
		let scored = self.score_published(query).await;
		let selection = select_two_pass(
			&scored,
			cfg.primary_min_score,
			cfg.relaxed_min_score,
			cfg.min_results as usize,
		);

		tracing::debug!(
			candidates = scored.len(),
			selected = selection.posts.len(),
			min_score = selection.min_score,
			relaxed = selection.relaxed,
			enough_existing = selection.enough_existing,
			"Relevant posts selected."
		);

		selection
	}

	async fn score_published(&self, query: &str) -> Vec<ScoredPost> {
		match self.store.published_posts().await {
			Ok(posts) => score_posts(posts, query),
			Err(err) => {
				tracing::warn!(error = %err, "Failed to load published posts for relevance search.");

				Vec::new()
			},
		}
	}
}
