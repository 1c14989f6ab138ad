//! Request-level page selection.
//!
//! [`ArticleRouter`] turns a request (index or article route) into a [`Page`]
//! carrying the context a view needs. It never fails: per-request problems
//! are logged and become [`Page::NotFound`].

use std::sync::Arc;

use serde::Serialize;

use crate::meta::ArticleMeta;
use crate::navigation;
use crate::store::ArticleStore;

/// Context for the index view.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexContext {
    /// Display date of the most recent article.
    pub last_published_date: String,
    /// Published articles, newest first.
    pub articles: Vec<ArticleMeta>,
}

/// Context for a single article view.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleContext {
    /// Display date of the most recent article.
    pub last_published_date: String,
    /// Older neighbour.
    pub previous: ArticleMeta,
    /// Newer neighbour.
    pub next: ArticleMeta,
    /// Display date of this article.
    pub date: String,
    /// Title of this article.
    pub title: String,
    /// Article body location, `<route>/view`.
    pub content_view: String,
}

/// Context for the not-found view.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFoundContext {
    /// Display date of the most recent article, if any is published.
    pub last_published_date: Option<String>,
}

/// Page selected for a request.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum Page {
    Index(IndexContext),
    Article(ArticleContext),
    NotFound(NotFoundContext),
}

/// Maps requests onto the article store.
#[derive(Clone, Debug)]
pub struct ArticleRouter {
    store: Arc<ArticleStore>,
}

impl ArticleRouter {
    #[must_use]
    pub fn new(store: Arc<ArticleStore>) -> Self {
        Self { store }
    }

    /// Underlying article store.
    #[must_use]
    pub fn store(&self) -> &ArticleStore {
        &self.store
    }

    /// Index page. With no published articles this is the not-found page.
    #[must_use]
    pub fn index(&self) -> Page {
        match self.store.last_published_date() {
            Some(date) => Page::Index(IndexContext {
                last_published_date: date.to_owned(),
                articles: self.store.all().to_vec(),
            }),
            None => {
                tracing::warn!("Index requested with no published articles");
                self.not_found()
            }
        }
    }

    /// Article page for `route`.
    ///
    /// The folder's metadata is read fresh and matched by title against the
    /// published list, so unpublished folders resolve to not-found.
    #[must_use]
    pub fn article(&self, route: &str) -> Page {
        let meta = match self.store.read_meta(route) {
            Ok(meta) => meta,
            Err(e) => {
                tracing::warn!(route, error = %e, "Article metadata unavailable");
                return self.not_found();
            }
        };

        let Some(index) = self.store.position_of_title(&meta.title) else {
            tracing::warn!(route, title = %meta.title, "Article is not published");
            return self.not_found();
        };

        let neighbors = match navigation::resolve(self.store.all(), index) {
            Ok(neighbors) => neighbors,
            Err(e) => {
                tracing::warn!(route, error = %e, "Article navigation failed");
                return self.not_found();
            }
        };

        let Some(last_published_date) = self.store.last_published_date() else {
            return self.not_found();
        };

        Page::Article(ArticleContext {
            last_published_date: last_published_date.to_owned(),
            previous: neighbors.previous.clone(),
            next: neighbors.next.clone(),
            date: meta.date,
            title: meta.title,
            content_view: format!("{route}/view"),
        })
    }

    /// Not-found page.
    #[must_use]
    pub fn not_found(&self) -> Page {
        Page::NotFound(self.not_found_context())
    }

    /// Context for the not-found view.
    #[must_use]
    pub fn not_found_context(&self) -> NotFoundContext {
        NotFoundContext {
            last_published_date: self.store.last_published_date().map(str::to_owned),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::store::{FilterPolicy, StoreOptions};

    fn write_article(root: &Path, route: &str, title: &str, date: &str, date_int: i64) {
        let dir = root.join(route);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("meta.json"),
            format!(r#"{{"title": "{title}", "date": "{date}", "dateInt": {date_int}}}"#),
        )
        .unwrap();
    }

    fn router_with(dir: &tempfile::TempDir, options: &StoreOptions) -> ArticleRouter {
        let store = ArticleStore::load(dir.path(), options).unwrap();
        ArticleRouter::new(Arc::new(store))
    }

    fn sample_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        write_article(dir.path(), "jan", "January", "Jan 1, 2023", 20_230_101);
        write_article(dir.path(), "feb", "February", "Feb 1, 2023", 20_230_201);
        write_article(dir.path(), "mar", "March", "Mar 1, 2023", 20_230_301);
        dir
    }

    #[test]
    fn test_index_lists_articles_newest_first() {
        let dir = sample_dir();
        let router = router_with(&dir, &StoreOptions::default());

        let Page::Index(ctx) = router.index() else {
            panic!("expected index page");
        };

        assert_eq!(ctx.last_published_date, "Mar 1, 2023");
        let routes: Vec<_> = ctx.articles.iter().map(|a| a.route.as_str()).collect();
        assert_eq!(routes, vec!["mar", "feb", "jan"]);
    }

    #[test]
    fn test_index_with_no_articles_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let router = router_with(&dir, &StoreOptions::default());

        assert_eq!(
            router.index(),
            Page::NotFound(NotFoundContext {
                last_published_date: None
            })
        );
    }

    #[test]
    fn test_article_context() {
        let dir = sample_dir();
        let router = router_with(&dir, &StoreOptions::default());

        let Page::Article(ctx) = router.article("feb") else {
            panic!("expected article page");
        };

        assert_eq!(ctx.title, "February");
        assert_eq!(ctx.date, "Feb 1, 2023");
        assert_eq!(ctx.last_published_date, "Mar 1, 2023");
        assert_eq!(ctx.previous.route, "jan");
        assert_eq!(ctx.next.route, "mar");
        assert_eq!(ctx.content_view, "feb/view");
    }

    #[test]
    fn test_article_single_published_points_to_itself() {
        let dir = tempfile::tempdir().unwrap();
        write_article(dir.path(), "only", "Only", "Today", 1);
        let router = router_with(&dir, &StoreOptions::default());

        let Page::Article(ctx) = router.article("only") else {
            panic!("expected article page");
        };

        assert_eq!(ctx.previous.route, "only");
        assert_eq!(ctx.next.route, "only");
    }

    #[test]
    fn test_article_missing_route_is_not_found() {
        let dir = sample_dir();
        let router = router_with(&dir, &StoreOptions::default());

        assert_eq!(
            router.article("does-not-exist"),
            Page::NotFound(NotFoundContext {
                last_published_date: Some("Mar 1, 2023".to_owned())
            })
        );
    }

    #[test]
    fn test_article_excluded_route_is_not_found() {
        let dir = sample_dir();
        let options = StoreOptions {
            filter: FilterPolicy::Exclude(["feb".to_owned()].into()),
            ..Default::default()
        };
        let router = router_with(&dir, &options);

        assert!(matches!(router.article("feb"), Page::NotFound(_)));
    }

    #[test]
    fn test_article_lookup_is_by_title() {
        let dir = sample_dir();
        // Unpublished copy sharing a published article's title
        write_article(dir.path(), "mar-draft", "March", "draft", 0);
        let options = StoreOptions {
            filter: FilterPolicy::Exclude(["mar-draft".to_owned()].into()),
            ..Default::default()
        };
        let router = router_with(&dir, &options);

        let Page::Article(ctx) = router.article("mar-draft") else {
            panic!("expected article page");
        };

        assert_eq!(ctx.date, "draft");
        assert_eq!(ctx.next.route, "jan");
        assert_eq!(ctx.previous.route, "feb");
        assert_eq!(ctx.content_view, "mar-draft/view");
    }

    #[test]
    fn test_article_path_traversal_is_not_found() {
        let dir = sample_dir();
        let router = router_with(&dir, &StoreOptions::default());

        assert!(matches!(router.article("../feb"), Page::NotFound(_)));
    }

    #[test]
    fn test_page_serializes_with_view_tag() {
        let dir = sample_dir();
        let router = router_with(&dir, &StoreOptions::default());

        let value = serde_json::to_value(router.article("jan")).unwrap();

        assert_eq!(value["view"], "article");
        assert_eq!(value["lastPublishedDate"], "Mar 1, 2023");
        assert_eq!(value["contentView"], "jan/view");
        assert_eq!(value["previous"]["route"], "mar");
    }
}
