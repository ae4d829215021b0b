//! Domain entities - the core business objects.

mod comment;
mod post;
mod slug;
mod tag;

pub use comment::{Comment, EMAIL_MAX_LEN, NewComment};
pub use post::{NewPost, Post, TITLE_MAX_LEN};
pub use slug::{is_valid_slug, slugify};
pub use tag::{NewTag, TAG_NAME_MAX_LEN, TAG_SLUG_MAX_LEN, Tag};
