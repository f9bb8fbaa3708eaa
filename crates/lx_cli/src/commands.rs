use std::sync::Arc;

use anyhow::{bail, Context};
use lx_core::{ArticleId, Credentials, NewsApi, ViewMode};
use lx_state::{AuthSession, Dashboard, FlagKind, FlagState};
use lx_storage::Preferences;
use tracing::{info, warn};

use crate::cli::{Commands, FilterArgs, FlagArgs, SidebarState};
use crate::render;

pub async fn handle_command(
    command: Commands,
    api: Arc<dyn NewsApi>,
    preferences: Preferences,
) -> anyhow::Result<()> {
    match command {
        Commands::Login { email, password } => login(api.as_ref(), email, password).await,
        Commands::Logout => {
            let mut session = AuthSession::new();
            if let Err(e) = session.logout(api.as_ref()).await {
                warn!("Server did not confirm logout: {}", e);
            }
            println!("Logged out");
            Ok(())
        }
        Commands::Whoami => {
            let mut session = AuthSession::new();
            match session.initialize(api.as_ref()).await {
                Some(user) => println!("{}", render::render_user(user)),
                None => println!("Not logged in"),
            }
            Ok(())
        }
        Commands::Articles { filters, view, open } => {
            let mut dashboard = open_dashboard(api, preferences, &filters).await?;
            dashboard.reload().await;
            match open {
                Some(id) => show_article(&mut dashboard, id).await,
                None => {
                    print_listing(&dashboard, view);
                    Ok(())
                }
            }
        }
        Commands::Categories => {
            let dashboard = open_dashboard(api, preferences, &FilterArgs::default()).await?;
            if dashboard.categories().is_empty() {
                println!("No categories available");
            }
            for category in dashboard.categories() {
                let count = category
                    .article_count
                    .map(|n| format!("  ({} articles)", n))
                    .unwrap_or_default();
                println!("{:<28} {}{}", category.slug, category.name, count);
            }
            Ok(())
        }
        Commands::Jurisdictions => {
            let dashboard = open_dashboard(api, preferences, &FilterArgs::default()).await?;
            if dashboard.jurisdictions().is_empty() {
                println!("No jurisdictions available");
            }
            for jurisdiction in dashboard.jurisdictions() {
                println!("{}", jurisdiction);
            }
            Ok(())
        }
        Commands::Save(args) => change_flag(api, preferences, args, FlagKind::Saved, true).await,
        Commands::Unsave(args) => change_flag(api, preferences, args, FlagKind::Saved, false).await,
        Commands::Read(args) => change_flag(api, preferences, args, FlagKind::Read, true).await,
        Commands::Unread(args) => change_flag(api, preferences, args, FlagKind::Read, false).await,
        Commands::Refresh { filters } => {
            let mut dashboard = open_dashboard(api, preferences, &filters).await?;
            info!("🔄 Refreshing feeds, this can take a while");
            dashboard.refresh_feeds().await;
            print_listing(&dashboard, None);
            Ok(())
        }
        Commands::View { mode } => {
            let mut dashboard = Dashboard::new(api, preferences);
            dashboard.set_view_mode(mode).await?;
            println!("View mode set to {}", mode.as_str());
            Ok(())
        }
        Commands::Sidebar { state } => {
            let mut dashboard = Dashboard::new(api, preferences);
            let open = state == SidebarState::Open;
            dashboard.set_sidebar_open(open).await?;
            println!("Sidebar {}", if open { "open" } else { "closed" });
            Ok(())
        }
    }
}

async fn login(api: &dyn NewsApi, email: String, password: String) -> anyhow::Result<()> {
    let mut session = AuthSession::new();
    let credentials = Credentials::new(email, password);
    match session.login(api, &credentials).await {
        Ok(user) => {
            println!("Logged in as {}", render::render_user(&user));
            Ok(())
        }
        Err(e) => {
            let message = session
                .login_error()
                .map(str::to_string)
                .unwrap_or_else(|| e.to_string());
            bail!(message)
        }
    }
}

/// Resolves the session and applies `filters` without fetching articles.
async fn open_dashboard(
    api: Arc<dyn NewsApi>,
    preferences: Preferences,
    filters: &FilterArgs,
) -> anyhow::Result<Dashboard> {
    let mut dashboard = Dashboard::new(api, preferences);
    dashboard.resume().await;
    if dashboard.user().is_none() {
        bail!("Not logged in. Run `lx login --email <email>` first.");
    }
    apply_filters(&mut dashboard, filters);
    Ok(dashboard)
}

fn apply_filters(dashboard: &mut Dashboard, filters: &FilterArgs) {
    if let Some(feed_filter) = filters.feed_type {
        dashboard.set_feed_type(feed_filter.0);
    }
    if !filters.categories.is_empty() {
        dashboard.set_categories(filters.categories.clone());
    }
    if !filters.jurisdictions.is_empty() {
        dashboard.set_jurisdictions(filters.jurisdictions.clone());
    }
    if !filters.courts.is_empty() {
        dashboard.set_courts(filters.courts.clone());
    }
    if !filters.doc_types.is_empty() {
        dashboard.set_doc_types(filters.doc_types.clone());
    }
    if let Some(search) = &filters.search {
        dashboard.set_search(search);
    }
    if filters.saved {
        dashboard.set_show_saved(true);
    }
    // Last, since every filter setter goes back to page 1.
    if let Some(page) = filters.page {
        dashboard.set_page(page);
    }
}

fn print_listing(dashboard: &Dashboard, view: Option<ViewMode>) {
    if dashboard.is_sidebar_open() {
        println!(
            "{}",
            render::render_sidebar(
                dashboard.filters().state(),
                dashboard.categories(),
                dashboard.jurisdictions()
            )
        );
    }
    print!(
        "{}",
        render::render_listing(
            dashboard.articles(),
            view.unwrap_or_else(|| dashboard.view_mode()),
            dashboard.page_controls(),
            &dashboard.filters().active_filters(),
        )
    );
}

async fn show_article(dashboard: &mut Dashboard, id: ArticleId) -> anyhow::Result<()> {
    if let Some(error) = dashboard.articles().error() {
        bail!(error.to_string());
    }
    match dashboard.select_article(id).await {
        Some(article) => {
            print!("{}", render::render_detail(article));
            Ok(())
        }
        None => bail!("Article {} is not on this page; pass the filters and --page it appears on", id),
    }
}

async fn change_flag(
    api: Arc<dyn NewsApi>,
    preferences: Preferences,
    args: FlagArgs,
    kind: FlagKind,
    value: bool,
) -> anyhow::Result<()> {
    let mut dashboard = open_dashboard(Arc::clone(&api), preferences, &args.filters).await?;
    dashboard.reload().await;

    let outcome = match kind {
        FlagKind::Saved => dashboard.set_saved(args.id, value).await,
        FlagKind::Read => dashboard.set_read(args.id, value).await,
    };

    match outcome {
        Some(FlagState::Confirmed) => {}
        Some(_) => bail!("Could not update article {}", args.id),
        None => {
            info!(id = args.id, "Article not on the current page, updating directly");
            let result = match kind {
                FlagKind::Saved => api.set_saved(args.id, value).await,
                FlagKind::Read => api.set_read(args.id, value).await,
            };
            if let Err(e) = &result {
                if e.is_unauthorized() {
                    bail!("Session expired. Run `lx login --email <email>` again.");
                }
            }
            result.with_context(|| format!("Could not update article {}", args.id))?;
        }
    }

    let verb = match (kind, value) {
        (FlagKind::Saved, true) => "saved",
        (FlagKind::Saved, false) => "removed from saved",
        (FlagKind::Read, true) => "marked read",
        (FlagKind::Read, false) => "marked unread",
    };
    println!("Article {} {}", args.id, verb);
    Ok(())
}
