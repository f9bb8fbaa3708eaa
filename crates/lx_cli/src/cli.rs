use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use lx_client::DEFAULT_API_URL;
use lx_core::{ArticleId, FeedType, ViewMode};

#[derive(Parser, Debug)]
#[command(author, version, about = "Legal news from the terminal", long_about = None)]
pub struct Cli {
    /// Base URL of the news API
    #[arg(long, env = "LEX_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Where preferences and the session token are kept
    #[arg(long, env = "LEX_STATE_FILE", global = true)]
    pub state_file: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "LEX_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// End the current session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List articles matching the given filters
    Articles {
        #[command(flatten)]
        filters: FilterArgs,
        /// Render as cards or a compact list (defaults to the saved preference)
        #[arg(long)]
        view: Option<ViewMode>,
        /// Open one article from the page in the detail view
        #[arg(long)]
        open: Option<ArticleId>,
    },
    /// List the available categories
    Categories,
    /// List the available jurisdictions
    Jurisdictions,
    /// Bookmark an article
    Save(FlagArgs),
    /// Remove a bookmark
    Unsave(FlagArgs),
    /// Mark an article as read
    Read(FlagArgs),
    /// Mark an article as unread
    Unread(FlagArgs),
    /// Re-ingest every feed on the server, then list articles
    Refresh {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Set the default view mode
    View { mode: ViewMode },
    /// Show or hide the filter sidebar
    Sidebar { state: SidebarState },
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// news, blogpost, judgment, regulatory or all
    #[arg(long)]
    pub feed_type: Option<FeedFilter>,
    /// Category slugs; replaces the categories from your profile
    #[arg(long = "category", value_delimiter = ',')]
    pub categories: Vec<String>,
    #[arg(long = "jurisdiction", value_delimiter = ',')]
    pub jurisdictions: Vec<String>,
    /// Only used with --feed-type judgment
    #[arg(long = "court", value_delimiter = ',')]
    pub courts: Vec<String>,
    /// Only used with --feed-type judgment
    #[arg(long = "doc-type", value_delimiter = ',')]
    pub doc_types: Vec<String>,
    #[arg(long)]
    pub search: Option<String>,
    /// Only bookmarked articles
    #[arg(long)]
    pub saved: bool,
    #[arg(long)]
    pub page: Option<u32>,
}

#[derive(Args, Debug, Clone)]
pub struct FlagArgs {
    pub id: ArticleId,
    #[command(flatten)]
    pub filters: FilterArgs,
}

/// `--feed-type` value; `all` clears the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedFilter(pub Option<FeedType>);

impl FromStr for FeedFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(FeedFilter(None))
        } else {
            s.parse().map(|feed_type| FeedFilter(Some(feed_type)))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarState {
    Open,
    Closed,
}

impl FromStr for SidebarState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "open" => Ok(SidebarState::Open),
            "closed" => Ok(SidebarState::Closed),
            other => Err(format!("Expected open or closed, got {}", other)),
        }
    }
}
