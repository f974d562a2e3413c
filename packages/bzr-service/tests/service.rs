use std::sync::{
	Arc, Mutex,
	atomic::{AtomicUsize, Ordering},
};

use serde_json::Map;
use time::{OffsetDateTime, macros::datetime};
use uuid::Uuid;

use bzr_config::{
	Agent, Config, LlmProviderConfig, Postgres, Providers as ProviderSection, Relevance, Security,
	Service, Storage,
};
use bzr_domain::{BlogPost, NewBlogPost, PostStatus};
use bzr_providers::chat::{ChatMessage, Role};
use bzr_service::{
	AnswerSource, AskRequest, BoxFuture, BzrService, ContentStore, Error, LlmProvider, Providers,
	Result,
};

const QUERY: &str = "procena rizika";

fn test_config() -> Config {
	Config {
		service: Service { http_bind: "127.0.0.1:0".to_string(), log_level: "info".to_string() },
		storage: Storage {
			postgres: Postgres { dsn: "postgres://unused".to_string(), pool_max_conns: 1 },
		},
		providers: ProviderSection {
			llm: LlmProviderConfig {
				provider_id: "test".to_string(),
				api_base: "http://127.0.0.1:1".to_string(),
				api_key: "test-key".to_string(),
				path: "/v1/chat/completions".to_string(),
				model: "test".to_string(),
				temperature: 0.2,
				max_tokens: 256,
				timeout_ms: 1_000,
				default_headers: Map::new(),
			},
		},
		relevance: Relevance::default(),
		agent: Agent::default(),
		security: Security { bind_localhost_only: true, api_auth_token: None },
	}
}

fn published(title: &str, body: &str) -> BlogPost {
	BlogPost {
		id: Uuid::new_v4(),
		title: title.to_string(),
		slug: bzr_domain::slug::slugify(title),
		body: body.to_string(),
		excerpt: None,
		category: "Propisi".to_string(),
		tags: Vec::new(),
		status: PostStatus::Published,
		created_at: datetime!(2024-03-01 08:00 UTC),
		updated_at: datetime!(2024-03-01 08:00 UTC),
		published_at: Some(datetime!(2024-03-01 08:00 UTC)),
	}
}

// Scores about 0.59 for `QUERY`.
fn strong_match(idx: usize) -> BlogPost {
	published(
		&format!("Procena rizika na radnom mestu {idx}"),
		"Procena rizika se sprovodi za svako radno mesto.",
	)
}

// Scores about 0.38 for `QUERY`.
fn weak_match(idx: usize) -> BlogPost {
	published(&format!("Procena rizika u praksi {idx}"), "Kratak pregled.")
}

fn unrelated(idx: usize) -> BlogPost {
	published(&format!("Obuka zaposlenih {idx}"), "Osposobljavanje za bezbedan rad.")
}

#[derive(Default)]
struct MemoryStore {
	posts: Vec<BlogPost>,
	created: Mutex<Vec<BlogPost>>,
	fetches: AtomicUsize,
	fail_create: bool,
}
impl MemoryStore {
	fn with_posts(posts: Vec<BlogPost>) -> Self {
		Self { posts, ..Self::default() }
	}

	fn created(&self) -> Vec<BlogPost> {
		self.created.lock().expect("Store lock poisoned.").clone()
	}
}

impl ContentStore for MemoryStore {
	fn published_posts<'a>(&'a self) -> BoxFuture<'a, Result<Vec<BlogPost>>> {
		Box::pin(async move {
			self.fetches.fetch_add(1, Ordering::SeqCst);

			Ok(self.posts.clone())
		})
	}

	fn create_post<'a>(&'a self, post: &'a NewBlogPost) -> BoxFuture<'a, Result<BlogPost>> {
		Box::pin(async move {
			if self.fail_create {
				return Err(Error::Storage { message: "insert failed".to_string() });
			}

			let now = OffsetDateTime::now_utc();
			let created = BlogPost {
				id: Uuid::new_v4(),
				title: post.title.clone(),
				slug: post.slug.clone(),
				body: post.body.clone(),
				excerpt: post.excerpt.clone(),
				category: post.category.clone(),
				tags: post.tags.clone(),
				status: post.status,
				created_at: now,
				updated_at: now,
				published_at: None,
			};

			self.created.lock().expect("Store lock poisoned.").push(created.clone());

			Ok(created)
		})
	}
}

struct BrokenStore;

impl ContentStore for BrokenStore {
	fn published_posts<'a>(&'a self) -> BoxFuture<'a, Result<Vec<BlogPost>>> {
		Box::pin(async { Err(Error::Storage { message: "connection refused".to_string() }) })
	}

	fn create_post<'a>(&'a self, _: &'a NewBlogPost) -> BoxFuture<'a, Result<BlogPost>> {
		Box::pin(async { Err(Error::Storage { message: "connection refused".to_string() }) })
	}
}

#[derive(Default)]
struct SpyLlm {
	calls: Mutex<Vec<Vec<ChatMessage>>>,
}
impl SpyLlm {
	fn calls(&self) -> Vec<Vec<ChatMessage>> {
		self.calls.lock().expect("Spy lock poisoned.").clone()
	}
}

impl LlmProvider for SpyLlm {
	fn complete<'a>(
		&'a self,
		_: &'a LlmProviderConfig,
		messages: &'a [ChatMessage],
	) -> BoxFuture<'a, Result<String>> {
		Box::pin(async move {
			self.calls.lock().expect("Spy lock poisoned.").push(messages.to_vec());

			Ok("Procena rizika se radi pre početka rada.".to_string())
		})
	}
}

struct DownLlm;

impl LlmProvider for DownLlm {
	fn complete<'a>(
		&'a self,
		_: &'a LlmProviderConfig,
		_: &'a [ChatMessage],
	) -> BoxFuture<'a, Result<String>> {
		Box::pin(async { Err(Error::Provider { message: "503 Service Unavailable".to_string() }) })
	}
}

fn service(store: Arc<dyn ContentStore>, llm: Arc<dyn LlmProvider>) -> BzrService {
	BzrService::with_parts(test_config(), store, Providers::new(llm))
}

#[tokio::test]
async fn relevant_posts_are_filtered_and_sorted() {
	let store = Arc::new(MemoryStore::with_posts(vec![
		weak_match(1),
		unrelated(2),
		strong_match(3),
		weak_match(4),
	]));
	let svc = service(store, Arc::new(SpyLlm::default()));
	let posts = svc.find_relevant_blog_posts(QUERY, 0.3).await;

	assert_eq!(posts.len(), 3);
	assert!(posts.iter().all(|item| item.score >= 0.3));
	assert!(posts.windows(2).all(|pair| pair[0].score >= pair[1].score));
	assert!(posts[0].post.title.starts_with("Procena rizika na radnom mestu"));
}

#[tokio::test]
async fn store_failure_yields_empty_results() {
	let svc = service(Arc::new(BrokenStore), Arc::new(SpyLlm::default()));

	assert!(svc.find_relevant_blog_posts(QUERY, 0.0).await.is_empty());

	let selection = svc.select_for_answer(QUERY).await;

	assert!(selection.posts.is_empty());
	assert!(!selection.enough_existing);
}

#[tokio::test]
async fn empty_query_phrase_matches_every_post() {
	let store = Arc::new(MemoryStore::with_posts(vec![strong_match(1), unrelated(2)]));
	let svc = service(store.clone(), Arc::new(SpyLlm::default()));
	let posts = svc.find_relevant_blog_posts("", 0.5).await;

	// Title and body phrase bonuses over the empty-keyword maximum of 1.8.
	assert_eq!(posts.len(), 2);
	assert!(posts.iter().all(|item| (item.score - 1.2 / 1.8).abs() < 1e-6));
	assert_eq!(store.fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn padded_query_keeps_its_whitespace() {
	let store = Arc::new(MemoryStore::with_posts(vec![published("rizika na radu", "")]));
	let svc = service(store, Arc::new(SpyLlm::default()));
	let posts = svc.find_relevant_blog_posts(" rizika", 0.0).await;

	assert_eq!(posts.len(), 1);
	// Title keyword bonus only: the padded phrase does not occur in the title.
	assert!((posts[0].score - 0.3 / 2.6).abs() < 1e-6);
}

#[tokio::test]
async fn relaxed_set_replaces_a_short_primary_set() {
	let store = Arc::new(MemoryStore::with_posts(vec![
		strong_match(1),
		weak_match(2),
		strong_match(3),
		weak_match(4),
		weak_match(5),
		unrelated(6),
	]));
	let svc = service(store.clone(), Arc::new(SpyLlm::default()));
	let selection = svc.select_for_answer(QUERY).await;

	assert!(selection.relaxed);
	assert!(selection.enough_existing);
	assert_eq!(selection.min_score, 0.3);
	assert_eq!(selection.posts.len(), 5);
	assert_eq!(store.fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn short_selection_creates_one_pending_article() {
	let store = Arc::new(MemoryStore::with_posts(vec![strong_match(1), unrelated(2)]));
	let llm = Arc::new(SpyLlm::default());
	let svc = service(store.clone(), llm.clone());
	let response = svc
		.ask(AskRequest { question: "Kada je obavezna procena rizika?".to_string() })
		.await
		.expect("Ask failed.");
	let created = store.created();

	assert_eq!(response.source, AnswerSource::Llm);
	assert!(!response.enough_existing);
	assert_eq!(created.len(), 1);
	assert_eq!(response.created_post_id, Some(created[0].id));
	assert_eq!(created[0].status, PostStatus::Pending);
	assert_eq!(created[0].category, "AI odgovori");
	assert_eq!(created[0].body, response.answer);

	let calls = llm.calls();

	assert_eq!(calls.len(), 1);
	assert_eq!(calls[0].last().map(|message| message.role), Some(Role::User));
}

#[tokio::test]
async fn enough_existing_posts_create_no_article() {
	let store = Arc::new(MemoryStore::with_posts(vec![
		strong_match(1),
		strong_match(2),
		strong_match(3),
	]));
	let svc = service(store.clone(), Arc::new(SpyLlm::default()));
	let response =
		svc.ask(AskRequest { question: QUERY.to_string() }).await.expect("Ask failed.");

	assert!(response.enough_existing);
	assert_eq!(response.related_posts.len(), 3);
	assert!(response.created_post_id.is_none());
	assert!(store.created().is_empty());
}

#[tokio::test]
async fn provider_failure_serves_canned_answer_without_article() {
	let store = Arc::new(MemoryStore::default());
	let svc = service(store.clone(), Arc::new(DownLlm));
	let response = svc
		.ask(AskRequest { question: "Šta je procena rizika?".to_string() })
		.await
		.expect("Ask failed.");

	assert_eq!(response.source, AnswerSource::Fallback);
	assert_eq!(response.fallback_topic.as_deref(), Some("risk_assessment"));
	assert!(!response.answer.is_empty());
	assert!(response.created_post_id.is_none());
	assert!(store.created().is_empty());
}

#[tokio::test]
async fn article_creation_failure_still_returns_the_answer() {
	let store = Arc::new(MemoryStore { fail_create: true, ..MemoryStore::default() });
	let svc = service(store, Arc::new(SpyLlm::default()));
	let response = svc
		.ask(AskRequest { question: "Kada je obavezna procena rizika?".to_string() })
		.await
		.expect("Ask failed.");

	assert_eq!(response.source, AnswerSource::Llm);
	assert!(response.created_post_id.is_none());
}

#[tokio::test]
async fn rejects_invalid_questions() {
	let svc = service(Arc::new(MemoryStore::default()), Arc::new(SpyLlm::default()));
	let blank = svc.ask(AskRequest { question: "  ".to_string() }).await;

	assert!(matches!(blank, Err(Error::InvalidRequest { .. })));

	let long = svc.ask(AskRequest { question: "pitanje ".repeat(400) }).await;

	assert!(matches!(long, Err(Error::InvalidRequest { .. })));
}

#[tokio::test]
async fn disabled_agent_rejects_questions() {
	let mut cfg = test_config();

	cfg.agent.enabled = false;

	let svc = BzrService::with_parts(
		cfg,
		Arc::new(MemoryStore::default()),
		Providers::new(Arc::new(SpyLlm::default())),
	);
	let result = svc.ask(AskRequest { question: QUERY.to_string() }).await;

	assert!(matches!(result, Err(Error::InvalidRequest { .. })));
}
