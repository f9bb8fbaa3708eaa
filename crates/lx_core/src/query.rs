use crate::types::{FeedType, PAGE_SIZE};

/// Parameters for one `GET /articles` request.
///
/// Fields hold the raw selections; `to_query_pairs` decides what is
/// actually sent. Empty collections, empty search, `saved_only = false`
/// and an unset feed type are all omitted. Courts and document types are
/// only sent when the feed type is `Judgment`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleQuery {
    pub page: u32,
    pub limit: u32,
    pub feed_type: Option<FeedType>,
    pub categories: Vec<String>,
    pub jurisdictions: Vec<String>,
    pub courts: Vec<String>,
    pub doc_types: Vec<String>,
    pub search: Option<String>,
    pub saved_only: bool,
}

impl Default for ArticleQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: PAGE_SIZE,
            feed_type: None,
            categories: Vec::new(),
            jurisdictions: Vec::new(),
            courts: Vec::new(),
            doc_types: Vec::new(),
            search: None,
            saved_only: false,
        }
    }
}

impl ArticleQuery {
    pub fn is_judgment(&self) -> bool {
        self.feed_type == Some(FeedType::Judgment)
    }

    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];

        if let Some(feed_type) = self.feed_type {
            pairs.push(("feed_type", feed_type.as_str().to_string()));
        }
        if !self.categories.is_empty() {
            pairs.push(("category", self.categories.join(",")));
        }
        if !self.jurisdictions.is_empty() {
            pairs.push(("jurisdiction", self.jurisdictions.join(",")));
        }
        if self.is_judgment() {
            if !self.courts.is_empty() {
                pairs.push(("court", self.courts.join(",")));
            }
            if !self.doc_types.is_empty() {
                pairs.push(("doc_type", self.doc_types.join(",")));
            }
        }
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        if self.saved_only {
            pairs.push(("saved_only", "true".to_string()));
        }

        pairs
    }
}
