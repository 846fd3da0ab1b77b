//! Card rendering for tasks and scheduled jobs.
//!
//! Both mappers are total: every input produces a card. Optional task fields
//! that are absent or empty produce no line at all.

use taskboard_proto::schedule::ScheduledJob;
use taskboard_proto::task::{StatusCategory, Task};

use super::dates::DisplayZone;
use super::html::escape;
use super::theme::{self, Theme};

const CARD_STYLE: &str = "border-radius:8px;padding:16px;margin-bottom:12px";
const CARD_HEADER_STYLE: &str = "display:flex;justify-content:space-between;align-items:start";
const BADGE_STYLE: &str =
    "color:#fff;padding:2px 8px;border-radius:12px;font-size:11px;font-weight:bold";

/// Treats empty strings like absent fields.
fn present(field: Option<&String>) -> Option<&str> {
    field.map(String::as_str).filter(|s| !s.is_empty())
}

fn badge(color: &str, text: &str) -> String {
    format!(
        "<span class=\"badge\" style=\"background-color:{color};{BADGE_STYLE}\">{}</span>",
        escape(text)
    )
}

fn detail(field: &str, style: Option<&str>, text: &str) -> String {
    style.map_or_else(
        || format!("<div data-field=\"{field}\">{text}</div>"),
        |style| format!("<div data-field=\"{field}\" style=\"{style}\">{text}</div>"),
    )
}

/// Renders one task as a card styled for its status category.
#[must_use]
pub fn task_card(task: &Task, category: StatusCategory, theme: &Theme, zone: DisplayZone) -> String {
    let color = theme.status_colors.color(category);

    let key = task
        .id
        .as_ref()
        .map(|id| format!(" data-key=\"{}\"", escape(&id.to_string())))
        .unwrap_or_default();

    let icon = task
        .priority
        .and_then(|p| theme.priority_icons.icon(p))
        .map(|icon| format!("{icon} "))
        .unwrap_or_default();

    let status_badge = present(task.status.as_ref())
        .map(|status| badge(color, &status.to_uppercase()))
        .unwrap_or_default();

    let description = present(task.description.as_ref())
        .map(|d| {
            format!(
                "<p style=\"margin:0 0 12px 0;font-size:14px;color:{}\">{}</p>",
                theme::FG_SECONDARY,
                escape(d)
            )
        })
        .unwrap_or_default();

    let mut details = Vec::new();
    if let Some(when) = present(task.scheduled_for.as_ref()) {
        details.push(detail(
            "scheduled-for",
            None,
            &format!("📅 Scheduled: {}", escape(when)),
        ));
    }
    if let Some(estimate) = present(task.estimated_duration.as_ref()) {
        details.push(detail(
            "estimated-duration",
            None,
            &format!("⏱️ Est: {}", escape(estimate)),
        ));
    }
    if let Some(raw) = present(task.completed_at.as_ref()) {
        let date = zone.format_date(raw).unwrap_or_else(|| raw.to_string());
        details.push(detail(
            "completed-at",
            None,
            &format!("✅ Completed: {}", escape(&date)),
        ));
    }
    if let Some(outcome) = present(task.outcome.as_ref()) {
        details.push(detail(
            "outcome",
            Some(&format!("margin-top:4px;color:{}", theme::SUCCESS)),
            &format!("→ {}", escape(outcome)),
        ));
    }
    if let Some(blocker) = present(task.blocked_by.as_ref()) {
        details.push(detail(
            "blocked-by",
            Some(&format!("margin-top:4px;color:{}", theme::ERROR)),
            &format!("🚫 {}", escape(blocker)),
        ));
    }
    if let Some(notes) = present(task.notes.as_ref()) {
        details.push(detail(
            "notes",
            Some("margin-top:4px;font-style:italic"),
            &escape(notes),
        ));
    }

    format!(
        "<div class=\"card task-card\" data-status=\"{category}\"{key} \
         style=\"background-color:{bg};border:2px solid {color};{CARD_STYLE}\">\
         <div style=\"{CARD_HEADER_STYLE}\">\
         <h3 style=\"margin:0 0 8px 0;font-size:16px\">{icon}{title}</h3>{status_badge}\
         </div>\
         {description}\
         <div style=\"font-size:12px;color:{dimmed}\">{details}</div>\
         </div>",
        bg = theme::BG_CARD,
        title = escape(&task.title),
        dimmed = theme::FG_DIMMED,
        details = details.concat(),
    )
}

/// Renders one scheduled job as a card; disabled jobs are dimmed.
#[must_use]
pub fn schedule_card(job: &ScheduledJob) -> String {
    let (color, label, opacity) = if job.enabled {
        (theme::SUCCESS, "ACTIVE", "1")
    } else {
        (theme::DISABLED, "DISABLED", "0.6")
    };

    format!(
        "<div class=\"card schedule-card\" data-key=\"{name}\" \
         style=\"background-color:{bg};border:2px solid {color};{CARD_STYLE};opacity:{opacity}\">\
         <div style=\"{CARD_HEADER_STYLE};margin-bottom:8px\">\
         <h3 style=\"margin:0;font-size:16px;font-weight:bold\">{name}</h3>{badge}\
         </div>\
         <p style=\"margin:0 0 12px 0;font-size:14px;color:{secondary}\">{description}</p>\
         <div style=\"font-size:12px;color:{dimmed}\">\
         <div data-field=\"next-run\">⏰ {next_run}</div>\
         <div data-field=\"schedule\" style=\"margin-top:4px;font-family:monospace;color:{code}\">{schedule}</div>\
         </div>\
         </div>",
        name = escape(&job.name),
        bg = theme::BG_CARD,
        badge = badge(color, label),
        secondary = theme::FG_SECONDARY,
        description = escape(&job.description),
        dimmed = theme::FG_DIMMED,
        next_run = escape(&job.next_run),
        code = theme::FG_CODE,
        schedule = escape(&job.schedule),
    )
}
