pub mod articles;
pub mod dashboard;
pub mod detail;
pub mod filters;
pub mod pagination;
pub mod session;

pub use articles::{ArticleList, FlagKind, FlagState, ListStatus, LoadTicket, PendingToggle};
pub use dashboard::Dashboard;
pub use detail::DetailSelection;
pub use filters::{ActiveFilter, FilterController, FilterKind, FilterState};
pub use pagination::PageControls;
pub use session::AuthSession;

pub mod prelude {
    pub use super::{Dashboard, FlagKind, FlagState, ListStatus, PageControls};
    pub use lx_core::{Article, ArticleId, Error, FeedType, NewsApi, Result};
}
