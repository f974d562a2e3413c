use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, Result, db::Db, models::BlogPostRow};
use bzr_domain::{BlogPost, NewBlogPost, PostStatus};

const UNIQUE_VIOLATION: &str = "23505";

pub async fn list_posts_by_status(db: &Db, status: PostStatus) -> Result<Vec<BlogPost>> {
	let rows: Vec<BlogPostRow> = sqlx::query_as(
		"\
SELECT
	post_id,
	title,
	slug,
	body,
	excerpt,
	category,
	tags,
	status,
	created_at,
	updated_at,
	published_at
FROM blog_posts
WHERE status = $1
ORDER BY published_at DESC NULLS LAST, created_at DESC",
	)
	.bind(status.as_str())
	.fetch_all(&db.pool)
	.await?;

	rows.into_iter().map(|row| BlogPost::try_from(row).map_err(Error::from)).collect()
}

pub async fn get_post(db: &Db, post_id: Uuid) -> Result<BlogPost> {
	let row: Option<BlogPostRow> = sqlx::query_as(
		"\
SELECT
	post_id,
	title,
	slug,
	body,
	excerpt,
	category,
	tags,
	status,
	created_at,
	updated_at,
	published_at
FROM blog_posts
WHERE post_id = $1",
	)
	.bind(post_id)
	.fetch_optional(&db.pool)
	.await?;
	let Some(row) = row else {
		return Err(Error::NotFound(format!("Blog post {post_id} does not exist.")));
	};

	Ok(BlogPost::try_from(row)?)
}

pub async fn insert_post(db: &Db, post: &NewBlogPost, now: OffsetDateTime) -> Result<BlogPost> {
	if post.title.trim().is_empty() {
		return Err(Error::InvalidArgument("Blog post title must be non-empty.".to_string()));
	}
	if post.slug.trim().is_empty() {
		return Err(Error::InvalidArgument("Blog post slug must be non-empty.".to_string()));
	}

	let post_id = Uuid::new_v4();
	let published_at = (post.status == PostStatus::Published).then_some(now);
	let result = sqlx::query(
		"\
INSERT INTO blog_posts (
	post_id,
	title,
	slug,
	body,
	excerpt,
	category,
	tags,
	status,
	created_at,
	updated_at,
	published_at
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9, $10)",
	)
	.bind(post_id)
	.bind(post.title.as_str())
	.bind(post.slug.as_str())
	.bind(post.body.as_str())
	.bind(post.excerpt.as_deref())
	.bind(post.category.as_str())
	.bind(&post.tags)
	.bind(post.status.as_str())
	.bind(now)
	.bind(published_at)
	.execute(&db.pool)
	.await;

	if let Err(err) = result {
		if err.as_database_error().and_then(|db_err| db_err.code()).as_deref()
			== Some(UNIQUE_VIOLATION)
		{
			return Err(Error::Conflict(format!("Blog post slug {} already exists.", post.slug)));
		}

		return Err(err.into());
	}

	Ok(BlogPost {
		id: post_id,
		title: post.title.clone(),
		slug: post.slug.clone(),
		body: post.body.clone(),
		excerpt: post.excerpt.clone(),
		category: post.category.clone(),
		tags: post.tags.clone(),
		status: post.status,
		created_at: now,
		updated_at: now,
		published_at,
	})
}
