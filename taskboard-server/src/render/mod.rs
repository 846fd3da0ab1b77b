//! Presentation mapper: turns documents into HTML.
//!
//! The free functions in [`cards`] map single entities; [`Renderer`] owns the
//! lookup tables and display settings and assembles headers, sections, and
//! the page shell around them.

pub mod cards;
pub mod dates;
pub mod html;
pub mod theme;

use taskboard_proto::meta::DocumentMeta;
use taskboard_proto::schedule::ScheduledJob;
use taskboard_proto::task::{StatusCategory, Task};

use crate::config::DisplayConfig;
use crate::pages::Page;

use self::html::escape;
use self::theme::Theme;

/// A titled group of cards on a board.
#[derive(Debug, Clone, Copy)]
pub struct Section<'a> {
    /// Stable identifier emitted as `data-group`.
    pub key: &'a str,
    /// Leading emoji of the heading.
    pub icon: &'a str,
    /// Heading text, followed by the card count.
    pub label: &'a str,
    /// Heading color.
    pub color: &'a str,
    /// Message shown instead of cards when the group is empty.
    pub empty: &'a str,
}

/// Renders pages using a fixed theme and display configuration.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    /// Colors and icons.
    pub theme: Theme,
    /// Titles and display zone.
    pub display: DisplayConfig,
}

impl Renderer {
    /// Creates a renderer.
    #[must_use]
    pub const fn new(theme: Theme, display: DisplayConfig) -> Self {
        Self { theme, display }
    }

    /// Renders a task card in this renderer's theme and zone.
    #[must_use]
    pub fn task_card(&self, task: &Task, category: StatusCategory) -> String {
        cards::task_card(task, category, &self.theme, self.display.zone)
    }

    /// Renders a scheduled job card.
    #[must_use]
    pub fn schedule_card(&self, job: &ScheduledJob) -> String {
        cards::schedule_card(job)
    }

    /// Wraps `main` content in the page shell.
    #[must_use]
    pub fn document(&self, main: &str) -> String {
        html::document(&self.display.title, main)
    }

    /// Dashboard heading, navigation with `active` highlighted, and the
    /// last-updated line.
    #[must_use]
    pub fn header(&self, active: Page, meta: &DocumentMeta) -> String {
        let nav: String = Page::ALL
            .iter()
            .map(|page| nav_link(*page, *page == active))
            .collect();

        let updated = meta
            .last_updated
            .as_deref()
            .filter(|raw| !raw.is_empty())
            .map_or_else(
                || "unknown".to_string(),
                |raw| {
                    self.display
                        .zone
                        .format_timestamp(raw)
                        .unwrap_or_else(|| raw.to_string())
                },
            );

        format!(
            "<header style=\"margin-bottom:40px\">\
             <h1 style=\"font-size:32px;margin:0 0 16px 0\">{heading}</h1>\
             <nav style=\"display:flex;gap:16px;margin-bottom:16px\">{nav}</nav>\
             <p class=\"last-updated\" style=\"color:{dimmed};margin:0\">Last updated: {updated}</p>\
             </header>",
            heading = escape(&self.display.heading),
            dimmed = theme::FG_DIMMED,
            updated = escape(&updated),
        )
    }

    /// Renders a section heading with its count followed by the cards, or
    /// the section's empty message if there are none.
    #[must_use]
    pub fn section(&self, section: &Section<'_>, cards: &[String]) -> String {
        let body = if cards.is_empty() {
            format!(
                "<p class=\"empty\" style=\"color:{}\">{}</p>",
                theme::FG_DIMMED,
                escape(section.empty)
            )
        } else {
            cards.concat()
        };
        format!(
            "<section data-group=\"{key}\">\
             <h2 style=\"font-size:20px;margin-bottom:16px;color:{color}\">{icon} {label} ({count})</h2>\
             {body}\
             </section>",
            key = section.key,
            color = section.color,
            icon = section.icon,
            label = escape(section.label),
            count = cards.len(),
        )
    }

    /// Lays sections out in a responsive grid below the header.
    #[must_use]
    pub fn board(&self, header: &str, sections: &[String]) -> String {
        format!(
            "<main style=\"padding:40px;max-width:1400px;margin:0 auto\">{header}\
             <div style=\"display:grid;grid-template-columns:repeat(auto-fit, minmax(400px, 1fr));gap:24px\">{}</div>\
             </main>",
            sections.concat()
        )
    }

    /// The complete failure page: shell plus a single heading.
    #[must_use]
    pub fn failure(&self, page: Page) -> String {
        self.document(&format!(
            "<main style=\"padding:40px;max-width:1200px;margin:0 auto\"><h1>{}</h1></main>",
            page.failure_heading()
        ))
    }
}

fn nav_link(page: Page, active: bool) -> String {
    let style = if active {
        format!(
            "padding:8px 16px;background-color:{};color:#fff;text-decoration:none;border-radius:6px;font-weight:bold",
            theme::HIGHLIGHT
        )
    } else {
        format!(
            "padding:8px 16px;background-color:{};color:#fff;text-decoration:none;border-radius:6px;border:1px solid {}",
            theme::BG_CARD,
            theme::BORDER
        )
    };
    let current = if active { " aria-current=\"page\"" } else { "" };
    format!(
        "<a href=\"{}\"{current} style=\"{style}\">{}</a>",
        page.path(),
        page.nav_label()
    )
}
