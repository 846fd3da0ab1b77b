//! Page composer and HTTP server.
//!
//! Each request is one linear pass: fetch the page's document, then either
//! render the board or, if the fetch failed for any reason, a failure page
//! that contains only a heading. Both outcomes are served as `200 OK` HTML.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use taskboard_proto::schedule::{Cadence, CadenceKeywords, ScheduleDocument, group_by_cadence};
use taskboard_proto::task::{StatusCategory, TaskDocument};

use crate::config::{DashboardConfig, SourceUrls};
use crate::fetch::{FetchError, SourceFetcher};
use crate::render::theme::Theme;
use crate::render::{Renderer, Section};

/// Number of completed tasks shown on the task board.
pub const MAX_COMPLETED_SHOWN: usize = 5;

/// The two pages the dashboard serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    /// The task board at `/`.
    Tasks,
    /// The schedule board at `/schedules`.
    Schedules,
}

impl Page {
    /// Pages in navigation order.
    pub const ALL: [Self; 2] = [Self::Tasks, Self::Schedules];

    /// Route path.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Tasks => "/",
            Self::Schedules => "/schedules",
        }
    }

    /// Link text in the navigation bar.
    #[must_use]
    pub const fn nav_label(self) -> &'static str {
        match self {
            Self::Tasks => "📋 Tasks",
            Self::Schedules => "⏰ Schedules",
        }
    }

    /// Sole content of the page when its document cannot be fetched.
    #[must_use]
    pub const fn failure_heading(self) -> &'static str {
        match self {
            Self::Tasks => "Failed to load tasks",
            Self::Schedules => "Failed to load schedules",
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tasks => write!(f, "tasks"),
            Self::Schedules => write!(f, "schedules"),
        }
    }
}

const fn task_section(category: StatusCategory, color: &str) -> Section<'_> {
    match category {
        StatusCategory::InProgress => Section {
            key: "in_progress",
            icon: "🚀",
            label: "In Progress",
            color,
            empty: "No tasks in progress",
        },
        StatusCategory::Planned => Section {
            key: "planned",
            icon: "📋",
            label: "Planned",
            color,
            empty: "No planned tasks",
        },
        StatusCategory::Backburner => Section {
            key: "backburner",
            icon: "💤",
            label: "Back Burner",
            color,
            empty: "No back-burner tasks",
        },
        StatusCategory::Completed => Section {
            key: "completed",
            icon: "✅",
            label: "Recently Completed",
            color,
            empty: "No completed tasks",
        },
    }
}

const fn cadence_section(cadence: Cadence) -> Section<'static> {
    match cadence {
        Cadence::Daily => Section {
            key: "daily",
            icon: "📅",
            label: "Daily",
            color: Theme::cadence_color(Cadence::Daily),
            empty: "No daily jobs",
        },
        Cadence::Weekly => Section {
            key: "weekly",
            icon: "📆",
            label: "Weekly",
            color: Theme::cadence_color(Cadence::Weekly),
            empty: "No weekly jobs",
        },
        Cadence::Monthly => Section {
            key: "monthly",
            icon: "📆",
            label: "Monthly",
            color: Theme::cadence_color(Cadence::Monthly),
            empty: "No monthly jobs",
        },
    }
}

/// Renders the task board for a fetched document.
///
/// Categories are read straight from the document; only the completed list
/// is cut down to its first [`MAX_COMPLETED_SHOWN`] entries.
#[must_use]
pub fn task_board(renderer: &Renderer, doc: &TaskDocument) -> String {
    let sections: Vec<String> = StatusCategory::ALL
        .iter()
        .map(|&category| {
            let tasks = doc.tasks.category(category);
            let shown = if category == StatusCategory::Completed {
                &tasks[..tasks.len().min(MAX_COMPLETED_SHOWN)]
            } else {
                tasks
            };
            let cards: Vec<String> = shown
                .iter()
                .map(|task| renderer.task_card(task, category))
                .collect();
            let color = renderer.theme.status_colors.color(category);
            renderer.section(&task_section(category, color), &cards)
        })
        .collect();

    let header = renderer.header(Page::Tasks, &doc.meta);
    renderer.document(&renderer.board(&header, &sections))
}

/// Renders the schedule board, grouping jobs by cadence keyword.
#[must_use]
pub fn schedule_board(
    renderer: &Renderer,
    doc: &ScheduleDocument,
    keywords: &CadenceKeywords,
) -> String {
    let groups = group_by_cadence(&doc.jobs, keywords);
    let sections: Vec<String> = Cadence::ALL
        .iter()
        .map(|&cadence| {
            let cards: Vec<String> = groups
                .bucket(cadence)
                .iter()
                .map(|job| renderer.schedule_card(job))
                .collect();
            renderer.section(&cadence_section(cadence), &cards)
        })
        .collect();

    let header = renderer.header(Page::Schedules, &doc.meta);
    renderer.document(&renderer.board(&header, &sections))
}

/// Shared state handed to every request.
pub struct AppState {
    /// Cached document fetcher.
    pub fetcher: SourceFetcher,
    /// Page renderer.
    pub renderer: Renderer,
    /// Where each page's document lives.
    pub sources: SourceUrls,
    /// Keywords for the schedule board's buckets.
    pub cadence: CadenceKeywords,
}

impl AppState {
    /// Builds state from resolved configuration with the default theme.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the HTTP client cannot be built.
    pub fn from_config(config: &DashboardConfig) -> Result<Self, FetchError> {
        Ok(Self {
            fetcher: SourceFetcher::new(config.request_timeout, config.revalidate)?,
            renderer: Renderer::new(Theme::default(), config.display.clone()),
            sources: config.sources.clone(),
            cadence: config.cadence.clone(),
        })
    }

    /// Fetches and renders the task board, or its failure page.
    pub async fn render_tasks(&self) -> String {
        let url = self.sources.for_page(Page::Tasks);
        match self.fetcher.fetch_document::<TaskDocument>(url).await {
            Ok(doc) => {
                tracing::debug!(tasks = doc.tasks.len(), "rendering task board");
                task_board(&self.renderer, &doc)
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "failed to load tasks");
                self.renderer.failure(Page::Tasks)
            }
        }
    }

    /// Fetches and renders the schedule board, or its failure page.
    pub async fn render_schedules(&self) -> String {
        let url = self.sources.for_page(Page::Schedules);
        match self.fetcher.fetch_document::<ScheduleDocument>(url).await {
            Ok(doc) => {
                tracing::debug!(jobs = doc.jobs.len(), "rendering schedule board");
                schedule_board(&self.renderer, &doc, &self.cadence)
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "failed to load schedules");
                self.renderer.failure(Page::Schedules)
            }
        }
    }

    /// `Cache-Control` value passing the revalidation interval downstream.
    fn cache_control(&self) -> String {
        let secs = self.fetcher.revalidate().as_secs();
        if secs == 0 {
            "no-store".to_string()
        } else {
            format!("public, s-maxage={secs}, stale-while-revalidate")
        }
    }

    fn html_response(&self, body: String) -> Response {
        (
            [
                (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
                (header::CACHE_CONTROL, self.cache_control()),
            ],
            body,
        )
            .into_response()
    }
}

async fn tasks_handler(State(state): State<Arc<AppState>>) -> Response {
    let body = state.render_tasks().await;
    state.html_response(body)
}

async fn schedules_handler(State(state): State<Arc<AppState>>) -> Response {
    let body = state.render_schedules().await;
    state.html_response(body)
}

/// Builds the router serving both pages.
pub fn router(state: Arc<AppState>) -> axum::Router {
    axum::Router::new()
        .route(Page::Tasks.path(), axum::routing::get(tasks_handler))
        .route(Page::Schedules.path(), axum::routing::get(schedules_handler))
        .with_state(state)
}

/// Starts the dashboard server with pre-built [`AppState`] and returns the
/// bound address and a join handle.
///
/// This is the primary entry point used by both `main.rs` and test code.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server(
    addr: &str,
    state: Arc<AppState>,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "dashboard server error");
        }
    });

    Ok((bound_addr, handle))
}
