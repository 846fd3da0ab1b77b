//! Theme and styling constants for the rendered pages.

use taskboard_proto::schedule::Cadence;
use taskboard_proto::task::{Priority, StatusCategory};

/// Page background color.
pub const BG_PAGE: &str = "#0a0a0a";

/// Card background color.
pub const BG_CARD: &str = "#1a1a1a";

/// Primary foreground color.
pub const FG_PRIMARY: &str = "#e0e0e0";

/// Secondary foreground color (descriptions).
pub const FG_SECONDARY: &str = "#a0a0a0";

/// Dimmed foreground color (metadata, empty messages).
pub const FG_DIMMED: &str = "#707070";

/// Raw schedule expression color.
pub const FG_CODE: &str = "#888";

/// Neutral border color (inactive navigation link).
pub const BORDER: &str = "#333";

/// Active navigation link color.
pub const HIGHLIGHT: &str = "#3b82f6";

/// Success color (outcomes, enabled jobs).
pub const SUCCESS: &str = "#10b981";

/// Error color (blockers).
pub const ERROR: &str = "#ef4444";

/// Disabled job color.
pub const DISABLED: &str = "#6b7280";

/// Font stack for the page body.
pub const FONT_STACK: &str =
    "-apple-system, BlinkMacSystemFont, &quot;Segoe UI&quot;, Roboto, sans-serif";

/// Border and badge colors per task status category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusColors {
    pub in_progress: String,
    pub planned: String,
    pub completed: String,
    pub backburner: String,
}

impl Default for StatusColors {
    fn default() -> Self {
        Self {
            in_progress: "#3b82f6".to_string(),
            planned: "#8b5cf6".to_string(),
            completed: "#10b981".to_string(),
            backburner: "#6b7280".to_string(),
        }
    }
}

impl StatusColors {
    /// Color for a status category.
    #[must_use]
    pub fn color(&self, category: StatusCategory) -> &str {
        match category {
            StatusCategory::InProgress => &self.in_progress,
            StatusCategory::Planned => &self.planned,
            StatusCategory::Completed => &self.completed,
            StatusCategory::Backburner => &self.backburner,
        }
    }
}

/// Icons shown before a task title per priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityIcons {
    pub high: String,
    pub medium: String,
    pub low: String,
}

impl Default for PriorityIcons {
    fn default() -> Self {
        Self {
            high: "🔴".to_string(),
            medium: "🟡".to_string(),
            low: "🟢".to_string(),
        }
    }
}

impl PriorityIcons {
    /// Icon for a priority; unrecognized priorities have none.
    #[must_use]
    pub fn icon(&self, priority: Priority) -> Option<&str> {
        match priority {
            Priority::High => Some(&self.high),
            Priority::Medium => Some(&self.medium),
            Priority::Low => Some(&self.low),
            Priority::Unrecognized => None,
        }
    }
}

/// Lookup tables used by the card and section renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Theme {
    pub status_colors: StatusColors,
    pub priority_icons: PriorityIcons,
}

impl Theme {
    /// Heading color for a cadence section.
    #[must_use]
    pub const fn cadence_color(cadence: Cadence) -> &'static str {
        match cadence {
            Cadence::Daily => "#10b981",
            Cadence::Weekly => "#8b5cf6",
            Cadence::Monthly => "#f59e0b",
        }
    }
}
