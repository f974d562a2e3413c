pub mod agent;
pub mod relevance;

mod error;

pub use agent::{AnswerSource, AskRequest, AskResponse, RelatedPost};
pub use error::{Error, Result};
pub use relevance::{RelevantSelection, ScoredPost};

use std::{future::Future, pin::Pin, sync::Arc};

use time::OffsetDateTime;

use bzr_config::{Config, LlmProviderConfig};
use bzr_domain::{BlogPost, NewBlogPost, PostStatus};
use bzr_providers::chat::{self, ChatMessage};
use bzr_storage::{db::Db, queries};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Source of blog posts for relevance search and sink for generated articles.
pub trait ContentStore
where
	Self: Send + Sync,
{
	fn published_posts<'a>(&'a self) -> BoxFuture<'a, Result<Vec<BlogPost>>>;

	fn create_post<'a>(&'a self, post: &'a NewBlogPost) -> BoxFuture<'a, Result<BlogPost>>;
}

pub trait LlmProvider
where
	Self: Send + Sync,
{
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [ChatMessage],
	) -> BoxFuture<'a, Result<String>>;
}

#[derive(Clone)]
pub struct Providers {
	pub llm: Arc<dyn LlmProvider>,
}
impl Providers {
	pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
		Self { llm }
	}
}
impl Default for Providers {
	fn default() -> Self {
		Self { llm: Arc::new(DefaultProviders) }
	}
}

pub struct BzrService {
	pub cfg: Config,
	pub store: Arc<dyn ContentStore>,
	pub providers: Providers,
}
impl BzrService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, store: Arc::new(db), providers: Providers::default() }
	}

	pub fn with_parts(cfg: Config, store: Arc<dyn ContentStore>, providers: Providers) -> Self {
		Self { cfg, store, providers }
	}
}

struct DefaultProviders;

impl LlmProvider for DefaultProviders {
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [ChatMessage],
	) -> BoxFuture<'a, Result<String>> {
		Box::pin(async move { Ok(chat::complete(cfg, messages).await?) })
	}
}

impl ContentStore for Db {
	fn published_posts<'a>(&'a self) -> BoxFuture<'a, Result<Vec<BlogPost>>> {
		Box::pin(async move {
			Ok(queries::list_posts_by_status(self, PostStatus::Published).await?)
		})
	}

	fn create_post<'a>(&'a self, post: &'a NewBlogPost) -> BoxFuture<'a, Result<BlogPost>> {
		Box::pin(async move {
			Ok(queries::insert_post(self, post, OffsetDateTime::now_utc()).await?)
		})
	}
}
