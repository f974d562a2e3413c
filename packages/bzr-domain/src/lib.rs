pub mod content;
pub mod keywords;
pub mod relevance;
pub mod slug;

mod error;

pub use content::{BlogPost, NewBlogPost, PostStatus};
pub use error::{Error, Result};
