//! Article index and navigation for Folio.
//!
//! This crate provides:
//! - [`ArticleStore`]: loads one metadata record per content folder, filters
//!   it by route and orders it newest first
//! - [`navigation::resolve`]: ring navigation to previous/next articles
//! - [`ArticleRouter`]: maps index and article requests to view contexts
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use std::sync::Arc;
//! use folio_articles::{ArticleRouter, ArticleStore, Page, StoreOptions};
//!
//! let store = ArticleStore::load(Path::new("views"), &StoreOptions::default())?;
//! let router = ArticleRouter::new(Arc::new(store));
//!
//! if let Page::Article(ctx) = router.article("hello-world") {
//!     assert_eq!(ctx.content_view, "hello-world/view");
//! }
//! # Ok(())
//! # }
//! ```

mod meta;
pub mod navigation;
mod router;
mod store;

pub use meta::{ArticleMeta, MetaFormat};
pub use navigation::{NavigationError, Neighbors};
pub use router::{ArticleContext, ArticleRouter, IndexContext, NotFoundContext, Page};
pub use store::{ArticleStore, FilterPolicy, StoreError, StoreOptions};
