use time::OffsetDateTime;
use uuid::Uuid;

use bzr_domain::BlogPost;

#[derive(Debug, sqlx::FromRow)]
pub struct BlogPostRow {
	pub post_id: Uuid,
	pub title: String,
	pub slug: String,
	pub body: String,
	pub excerpt: Option<String>,
	pub category: String,
	pub tags: Vec<String>,
	pub status: String,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
	pub published_at: Option<OffsetDateTime>,
}
impl TryFrom<BlogPostRow> for BlogPost {
	type Error = bzr_domain::Error;

	fn try_from(row: BlogPostRow) -> Result<Self, Self::Error> {
		Ok(Self {
			id: row.post_id,
			title: row.title,
			slug: row.slug,
			body: row.body,
			excerpt: row.excerpt,
			category: row.category,
			tags: row.tags,
			status: row.status.parse()?,
			created_at: row.created_at,
			updated_at: row.updated_at,
			published_at: row.published_at,
		})
	}
}
