//! Article loading, filtering and ordering.
//!
//! [`ArticleStore`] is built once at startup from a content root that holds
//! one folder per article. The resulting list is immutable: sorted by
//! `dateInt` descending, ties kept in folder-name order.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use std::time::Instant;

use crate::meta::{ArticleMeta, MetaFormat};

/// Which routes survive the startup filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterPolicy {
    /// Drop the listed routes.
    Exclude(BTreeSet<String>),
    /// Keep only the listed routes.
    Include(BTreeSet<String>),
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self::Exclude(BTreeSet::new())
    }
}

impl FilterPolicy {
    /// Whether an article with this route is published.
    #[must_use]
    pub fn admits(&self, route: &str) -> bool {
        match self {
            Self::Exclude(excluded) => !excluded.contains(route),
            Self::Include(released) => released.contains(route),
        }
    }

    fn mode(&self) -> &'static str {
        match self {
            Self::Exclude(_) => "exclude",
            Self::Include(_) => "include",
        }
    }
}

/// Options for [`ArticleStore::load`].
#[derive(Clone, Debug)]
pub struct StoreOptions {
    /// Metadata filename inside each article folder.
    pub meta_filename: String,
    /// Publication filter.
    pub filter: FilterPolicy,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            meta_filename: "meta.json".to_owned(),
            filter: FilterPolicy::default(),
        }
    }
}

/// Error raised while reading article metadata.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Content root is missing or not a directory.
    #[error("Content root not found: {}", .0.display())]
    ContentRoot(PathBuf),
    /// Article folder has no metadata file.
    #[error("Metadata file not found: {}", .0.display())]
    MissingMeta(PathBuf),
    /// Metadata file could not be parsed.
    #[error("Invalid metadata in {}: {message}", path.display())]
    Parse {
        /// Metadata file path.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
    /// Route does not name a single folder under the content root.
    #[error("Invalid route: {0}")]
    InvalidRoute(String),
    /// I/O error.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Immutable, ordered list of published articles.
#[derive(Debug)]
pub struct ArticleStore {
    content_root: PathBuf,
    meta_filename: String,
    articles: Vec<ArticleMeta>,
}

impl ArticleStore {
    /// Load every article under `content_root`.
    ///
    /// Fails on the first missing or malformed metadata file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the root cannot be listed or any article's
    /// metadata is missing or malformed.
    pub fn load(content_root: &Path, options: &StoreOptions) -> Result<Self, StoreError> {
        let start = Instant::now();

        if !content_root.is_dir() {
            return Err(StoreError::ContentRoot(content_root.to_path_buf()));
        }

        let mut store = Self {
            content_root: content_root.to_path_buf(),
            meta_filename: options.meta_filename.clone(),
            articles: Vec::new(),
        };

        let routes = store.article_folders()?;
        let total = routes.len();

        let mut articles = Vec::with_capacity(total);
        for route in &routes {
            articles.push(store.read_meta(route)?);
        }

        articles.retain(|article| options.filter.admits(&article.route));
        // Stable: equal dateInt keeps folder-name order
        articles.sort_by(|a, b| b.date_int.cmp(&a.date_int));

        store.articles = articles;

        tracing::info!(
            root = %content_root.display(),
            mode = options.filter.mode(),
            total,
            published = store.articles.len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Articles loaded"
        );
        if store.articles.is_empty() {
            tracing::warn!(root = %content_root.display(), "No published articles");
        }

        Ok(store)
    }

    /// Sorted, filtered article list.
    #[must_use]
    pub fn all(&self) -> &[ArticleMeta] {
        &self.articles
    }

    /// Number of published articles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// Whether no article is published.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// First article whose title equals `title` exactly.
    #[must_use]
    pub fn find_by_title(&self, title: &str) -> Option<&ArticleMeta> {
        self.articles.iter().find(|article| article.title == title)
    }

    /// Index of the first article whose title equals `title` exactly.
    #[must_use]
    pub fn position_of_title(&self, title: &str) -> Option<usize> {
        self.articles.iter().position(|article| article.title == title)
    }

    /// Display date of the most recent article.
    #[must_use]
    pub fn last_published_date(&self) -> Option<&str> {
        self.articles.first().map(|article| article.date.as_str())
    }

    /// Content root directory.
    #[must_use]
    pub fn content_root(&self) -> &Path {
        &self.content_root
    }

    /// Read the metadata of a single article folder.
    ///
    /// The folder does not need to be published.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the route is not a plain relative folder
    /// path, or its metadata is missing or malformed.
    pub fn read_meta(&self, route: &str) -> Result<ArticleMeta, StoreError> {
        let folder = self.folder_path(route)?;
        let path = folder.join(&self.meta_filename);

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::MissingMeta(path));
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        ArticleMeta::parse(&content, MetaFormat::from_filename(&self.meta_filename), route)
            .map_err(|message| StoreError::Parse { path, message })
    }

    /// Resolve a route to its folder, rejecting anything that escapes the root.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidRoute`] for empty, absolute or `..` routes.
    pub fn folder_path(&self, route: &str) -> Result<PathBuf, StoreError> {
        let invalid = || StoreError::InvalidRoute(route.to_owned());

        if route.is_empty() || route.contains('\\') {
            return Err(invalid());
        }
        if route.split('/').any(str::is_empty) {
            return Err(invalid());
        }
        let relative = Path::new(route);
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(invalid());
        }

        Ok(self.content_root.join(relative))
    }

    /// Immediate subdirectory names of the content root, sorted.
    fn article_folders(&self) -> Result<Vec<String>, StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.content_root.clone(),
            source,
        };

        let mut routes = Vec::new();
        for entry in std::fs::read_dir(&self.content_root).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            if !entry.path().is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => routes.push(name),
                Err(name) => {
                    tracing::warn!(folder = ?name, "Skipping article folder with non-UTF-8 name");
                }
            }
        }
        routes.sort();
        Ok(routes)
    }
}
