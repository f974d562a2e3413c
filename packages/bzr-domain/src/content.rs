use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::Error;

/// Editorial workflow state of a blog post. Only `Published` posts are visible to readers and to
/// relevance search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
	Draft,
	Pending,
	Approved,
	Published,
	Rejected,
}
impl PostStatus {
	pub const ALL: [Self; 5] =
		[Self::Draft, Self::Pending, Self::Approved, Self::Published, Self::Rejected];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Draft => "draft",
			Self::Pending => "pending",
			Self::Approved => "approved",
			Self::Published => "published",
			Self::Rejected => "rejected",
		}
	}
}
impl fmt::Display for PostStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
impl FromStr for PostStatus {
	type Err = Error;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|status| status.as_str() == raw)
			.ok_or_else(|| Error::UnknownStatus(raw.to_string()))
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
	pub id: Uuid,
	pub title: String,
	pub slug: String,
	pub body: String,
	pub excerpt: Option<String>,
	pub category: String,
	#[serde(default)]
	pub tags: Vec<String>,
	pub status: PostStatus,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
	#[serde(with = "time::serde::rfc3339")]
	pub updated_at: OffsetDateTime,
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub published_at: Option<OffsetDateTime>,
}
impl BlogPost {
	pub fn is_published(&self) -> bool {
		self.status == PostStatus::Published
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBlogPost {
	pub title: String,
	pub slug: String,
	pub body: String,
	pub excerpt: Option<String>,
	pub category: String,
	pub tags: Vec<String>,
	pub status: PostStatus,
}
