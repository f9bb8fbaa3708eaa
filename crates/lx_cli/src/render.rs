//! Plain-text presentation of the dashboard state.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use lx_core::{Article, Category, FeedType, JudgmentMetadata, User, ViewMode};
use lx_state::{ActiveFilter, ArticleList, FilterState, ListStatus, PageControls};

const EXCERPT_CHARS: usize = 180;

/// How prominently an article is drawn, from its relevance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Strong,
    Medium,
    Faint,
}

impl Weight {
    pub fn from_score(score: f32) -> Self {
        if score >= 0.7 {
            Weight::Strong
        } else if score >= 0.4 {
            Weight::Medium
        } else {
            Weight::Faint
        }
    }

    fn marker(&self) -> &'static str {
        match self {
            Weight::Strong => "●",
            Weight::Medium => "◐",
            Weight::Faint => "○",
        }
    }
}

fn excerpt(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}…", cut.trim_end())
}

fn badge(feed_type: FeedType) -> String {
    format!("[{}]", feed_type.label())
}

/// Relative age for the last week, the calendar date after that.
pub fn time_ago(published: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - published).num_seconds();
    if seconds < 60 {
        return "just now".to_string();
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h ago", hours);
    }
    let days = hours / 24;
    if days < 7 {
        return format!("{}d ago", days);
    }
    published.format("%d %b %Y").to_string()
}

fn date(article: &Article) -> String {
    time_ago(article.published_at, Utc::now())
}

fn flags(article: &Article) -> String {
    let mut flags = Vec::new();
    if article.is_saved {
        flags.push("★ saved");
    }
    if !article.is_read {
        flags.push("• unread");
    }
    flags.join("  ")
}

pub fn render_card(article: &Article) -> String {
    let mut out = String::new();
    let weight = Weight::from_score(article.relevance_score);
    let _ = writeln!(out, "{} {} {}", weight.marker(), badge(article.feed_type), article.title);

    let mut meta = vec![article.source_name.clone(), date(article)];
    if let Some(jurisdiction) = &article.jurisdiction {
        meta.push(jurisdiction.clone());
    }
    let _ = writeln!(out, "  {}   #{}", meta.join(" · "), article.id);

    if let Some(judgment) = &article.judgment {
        let court_line: Vec<&str> = [judgment.court.as_deref(), judgment.ecli.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if !court_line.is_empty() {
            let _ = writeln!(out, "  {}", court_line.join(" · "));
        }
    }
    if !article.description.trim().is_empty() {
        let _ = writeln!(out, "  {}", excerpt(&article.description, EXCERPT_CHARS));
    }
    if !article.categories.is_empty() {
        let tags: Vec<String> = article.categories.iter().map(|c| format!("#{}", c.slug)).collect();
        let _ = writeln!(out, "  {}", tags.join(" "));
    }
    let flags = flags(article);
    if !flags.is_empty() {
        let _ = writeln!(out, "  {}", flags);
    }
    let _ = writeln!(out, "  {}", article.link);
    out
}

pub fn render_row(article: &Article) -> String {
    let weight = Weight::from_score(article.relevance_score);
    let read = if article.is_read { ' ' } else { '•' };
    let saved = if article.is_saved { " ★" } else { "" };
    format!(
        "{} {} {:>7} {:<12} {} ({}, {}){}",
        weight.marker(),
        read,
        article.id,
        badge(article.feed_type),
        article.title,
        article.source_name,
        date(article),
        saved
    )
}

fn judgment_lines(judgment: &JudgmentMetadata) -> Vec<(&'static str, &str)> {
    [
        ("ECLI", judgment.ecli.as_deref()),
        ("Court", judgment.court.as_deref()),
        ("Chamber", judgment.chamber.as_deref()),
        ("Judge-Rapporteur", judgment.judge_rapporteur.as_deref()),
        ("Procedure", judgment.procedure_type.as_deref()),
        ("Subject", judgment.subject_matter.as_deref()),
        ("Document", judgment.document_type.as_deref()),
        ("Case number", judgment.case_number.as_deref()),
        ("Case", judgment.case_name.as_deref()),
        ("Parties", judgment.parties.as_deref()),
        ("Decided", judgment.decision_date.as_deref()),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.filter(|v| !v.trim().is_empty()).map(|v| (label, v)))
    .collect()
}

pub fn render_detail(article: &Article) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", badge(article.feed_type), article.title);
    let _ = writeln!(out, "{}", "=".repeat(article.title.chars().count().clamp(8, 72)));
    let _ = writeln!(out, "Source:    {} ({})", article.source_name, article.source_url);
    let _ = writeln!(out, "Published: {}", article.published_at.format("%Y-%m-%d %H:%M UTC"));
    if let Some(jurisdiction) = &article.jurisdiction {
        let _ = writeln!(out, "Region:    {}", jurisdiction);
    }
    if !article.language.is_empty() {
        let _ = writeln!(out, "Language:  {}", article.language);
    }
    let _ = writeln!(out, "Link:      {}", article.link);
    if let Some(image) = &article.image_url {
        let _ = writeln!(out, "Image:     {}", image);
    }
    if !article.categories.is_empty() {
        let names: Vec<&str> = article.categories.iter().map(|c| c.name.as_str()).collect();
        let _ = writeln!(out, "Topics:    {}", names.join(", "));
    }
    let _ = writeln!(
        out,
        "Status:    {}, {}",
        if article.is_read { "read" } else { "unread" },
        if article.is_saved { "saved" } else { "not saved" }
    );

    if let Some(judgment) = &article.judgment {
        let lines = judgment_lines(judgment);
        if !lines.is_empty() {
            let _ = writeln!(out);
            for (label, value) in lines {
                let _ = writeln!(out, "{:<17} {}", format!("{}:", label), value);
            }
        }
        if let Some(summary) = judgment.ai_summary.as_deref().filter(|s| !s.trim().is_empty()) {
            let _ = writeln!(out, "\nSummary\n-------\n{}", summary.trim());
        }
    }

    if !article.description.trim().is_empty() {
        let _ = writeln!(out, "\n{}", article.description.trim());
    }
    if !article.content.trim().is_empty() && article.content.trim() != article.description.trim() {
        let _ = writeln!(out, "\n{}", article.content.trim());
    }
    out
}

pub fn render_active_filters(active: &[ActiveFilter]) -> Option<String> {
    if active.is_empty() {
        return None;
    }
    let labels: Vec<&str> = active.iter().map(|f| f.label.as_str()).collect();
    Some(format!("Showing: {}", labels.join(" | ")))
}

pub fn render_pagination(controls: PageControls) -> Option<String> {
    if !controls.is_visible() {
        return None;
    }
    let previous = if controls.previous_enabled() { "< Previous" } else { "  -" };
    let next = if controls.next_enabled() { "Next >" } else { "-" };
    Some(format!(
        "{}   Page {} of {}   {}",
        previous, controls.page, controls.pages, next
    ))
}

/// The article area: summary, status or articles, and the page footer.
pub fn render_listing(
    list: &ArticleList,
    view: ViewMode,
    controls: PageControls,
    active: &[ActiveFilter],
) -> String {
    let mut out = String::new();
    if let Some(summary) = render_active_filters(active) {
        let _ = writeln!(out, "{}\n", summary);
    }

    match list.status() {
        ListStatus::Error(message) => {
            let _ = writeln!(out, "{}", message);
        }
        ListStatus::Loading => {
            let _ = writeln!(out, "Loading articles…");
        }
        ListStatus::Empty => {
            let _ = writeln!(out, "No articles found");
            let _ = writeln!(out, "Try adjusting your filters or refresh the feeds.");
        }
        ListStatus::Ready => {
            for article in list.articles() {
                match view {
                    ViewMode::Card => {
                        let _ = writeln!(out, "{}", render_card(article));
                    }
                    ViewMode::List => {
                        let _ = writeln!(out, "{}", render_row(article));
                    }
                }
            }
        }
    }

    if !list.is_loading() {
        if let Some(footer) = render_pagination(controls) {
            let _ = writeln!(out, "\n{}", footer);
        }
    }
    out
}

pub fn render_sidebar(state: &FilterState, categories: &[Category], jurisdictions: &[String]) -> String {
    let mut out = String::new();
    let mark = |on: bool| if on { "[x]" } else { "[ ]" };

    let _ = writeln!(out, "Feed type");
    let _ = writeln!(out, "  {} All", mark(state.feed_type.is_none()));
    for feed_type in FeedType::ALL {
        let _ = writeln!(out, "  {} {}", mark(state.feed_type == Some(feed_type)), feed_type.label());
    }

    if !jurisdictions.is_empty() {
        let _ = writeln!(out, "Jurisdiction");
        for jurisdiction in jurisdictions {
            let _ = writeln!(out, "  {} {}", mark(state.jurisdictions.contains(jurisdiction)), jurisdiction);
        }
    }

    if !categories.is_empty() {
        let _ = writeln!(out, "Categories");
        for category in categories {
            let count = category
                .article_count
                .map(|n| format!(" ({})", n))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "  {} {} [{}]{}",
                mark(state.categories.contains(&category.slug)),
                category.name,
                category.slug,
                count
            );
        }
    }

    if state.feed_type == Some(FeedType::Judgment) && !(state.courts.is_empty() && state.doc_types.is_empty()) {
        let _ = writeln!(out, "Case law");
        for court in &state.courts {
            let _ = writeln!(out, "  [x] {}", court);
        }
        for doc_type in &state.doc_types {
            let _ = writeln!(out, "  [x] {}", doc_type);
        }
    }
    out
}

pub fn render_user(user: &User) -> String {
    let mut out = format!("{} <{}> @{}", user.display_name, user.email, user.username);
    if !user.category_slugs.is_empty() {
        let _ = write!(out, "\nDefault categories: {}", user.category_slugs.join(", "));
    }
    out
}
