//! CLI presentation: text and json formatters per command.

use crate::error::ApiError;
use crate::generation::GeneratedBatch;
use crate::pillar::PILLARS;
use crate::sheets::{SheetSummary, STATUS_DRAFT, STATUS_PENDING, STATUS_SCHEDULED};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;

const PREVIEW_CHARS: usize = 60;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::ConfigError(format!("Failed to serialize output: {}", e)))
}

/// Status cell colored by workflow stage.
pub fn format_status(status: &str) -> String {
    match status {
        STATUS_PENDING => status.yellow().to_string(),
        STATUS_SCHEDULED => status.green().to_string(),
        STATUS_DRAFT => status.dimmed().to_string(),
        other => other.to_string(),
    }
}

fn preview(text: &str) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= PREVIEW_CHARS {
        return single_line;
    }
    let cut: String = single_line.chars().take(PREVIEW_CHARS - 1).collect();
    format!("{}…", cut)
}

pub fn format_batch_text(batch: &GeneratedBatch) -> String {
    let mut out = format!("{}\n\n", format_section_heading("Generated posts"));
    for (index, item) in batch.ideas.iter().enumerate() {
        let source = if item.is_ai_generated {
            "drafted".green().to_string()
        } else {
            "template".yellow().to_string()
        };
        out.push_str(&format!(
            "{}. [{}] {} ({})\n",
            index + 1,
            item.pillar.bold(),
            item.scheduled_for,
            source
        ));
        out.push_str(&format!("{}\n", item.post_description));
        out.push_str(&format!("{}\n{}\n\n", item.cta, item.hashtags.dimmed()));
    }
    out.push_str(&format!(
        "Total: {}  Success rate: {:.0}%  Remaining quota: {}",
        batch.total_generated,
        batch.ai_success_rate * 100.0,
        batch.rate_limit_remaining
    ));
    out
}

pub fn format_posts_text(summary: &SheetSummary) -> String {
    if summary.posts.is_empty() {
        return "No posts stored yet.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Scheduled For", "Pillar", "Status", "Post", "Created"]);
    for post in &summary.posts {
        table.add_row(vec![
            post.scheduled_for.clone(),
            post.pillar.clone(),
            format_status(&post.status),
            preview(&post.post_description),
            post.created_date.clone(),
        ]);
    }
    format!(
        "{}\n\n{}\n\nTotal: {}  Pending: {}  Scheduled: {}",
        format_section_heading("Posts"),
        table,
        summary.total_posts,
        summary.pending_posts,
        summary.scheduled_posts
    )
}

pub fn format_pillars_text() -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["#", "Pillar", "CTA", "Hashtags"]);
    for (index, pillar) in PILLARS.iter().enumerate() {
        table.add_row(vec![
            index.to_string(),
            pillar.name.to_string(),
            pillar.cta.to_string(),
            pillar.hashtags.to_string(),
        ]);
    }
    table.to_string()
}
