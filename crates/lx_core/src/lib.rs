pub mod api;
pub mod error;
pub mod query;
pub mod types;

pub use api::NewsApi;
pub use error::{Error, Result};
pub use query::ArticleQuery;
pub use types::*;

pub mod prelude {
    pub use crate::{Article, ArticleId, ArticleQuery, Error, FeedType, NewsApi, Result, User};
}
