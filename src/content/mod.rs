//! Content module - posts, their headers, and the collection that holds them

mod collection;
mod frontmatter;
pub mod loader;
pub mod markdown;
mod post;

pub use collection::PostCollection;
pub use frontmatter::{FrontMatter, HeaderFormat};
pub use loader::{ContentLoader, LoadFailure, LoadReport};
pub use post::Post;
