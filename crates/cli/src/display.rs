// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use quire_core::{PushReport, QuerySummary};

use crate::commands::read::Listing;
use crate::commands::refresh::RefreshReport;
use crate::commands::status::Status;
use crate::feed::Feed;
use crate::models::{Category, Notice, Post};

/// Maximum line width for wrapped text content (excluding 4-space indent).
const WRAP_WIDTH: usize = 96;

/// Wrap text at word boundaries if it's a single line.
///
/// Multi-line content is returned as-is.
pub fn wrap_text(content: &str, width: usize) -> String {
    if content.contains('\n') || content.len() <= width {
        return content.to_string();
    }

    let mut result = String::new();
    let mut current_line = String::new();

    for word in content.split_whitespace() {
        if current_line.is_empty() {
            current_line = word.to_string();
        } else if current_line.len() + 1 + word.len() <= width {
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            if !result.is_empty() {
                result.push('\n');
            }
            result.push_str(&current_line);
            current_line = word.to_string();
        }
    }

    if !current_line.is_empty() {
        if !result.is_empty() {
            result.push('\n');
        }
        result.push_str(&current_line);
    }

    result
}

/// Format a single post line for list output.
///
/// `- 42: Title (alice, 3 replies)`
pub fn format_post_line(post: &Post) -> String {
    let headline = match &post.title {
        Some(title) => title.as_str(),
        None => post.body.lines().next().unwrap_or_default(),
    };
    let headline = if headline.is_empty() {
        "(not loaded)"
    } else {
        headline
    };

    let mut meta = Vec::new();
    if let Some(author) = &post.author {
        meta.push(author.clone());
    }
    match post.reply_count {
        Some(1) => meta.push("1 reply".to_string()),
        Some(n) => meta.push(format!("{} replies", n)),
        None => {}
    }

    if meta.is_empty() {
        format!("- {}: {}", post.id, headline)
    } else {
        format!("- {}: {} ({})", post.id, headline, meta.join(", "))
    }
}

/// Format a thread reply with a metadata line and indented body.
///
/// ```text
///   #7 alice 2026-10-18 08:00
///     Body goes here, potentially
///     wrapped across multiple lines.
/// ```
pub fn format_reply(post: &Post) -> Vec<String> {
    let mut header = format!("  #{}", post.id);
    if let Some(author) = &post.author {
        header.push(' ');
        header.push_str(author);
    }
    if let Some(at) = post.posted_at {
        header.push_str(&format!(" {}", at.format("%Y-%m-%d %H:%M")));
    }

    let mut lines = vec![header];
    for line in wrap_text(&post.body, WRAP_WIDTH).lines() {
        lines.push(format!("    {}", line));
    }
    lines
}

/// Format one page of a feed.
///
/// Threads show reply bodies; other feeds show one line per post.
pub fn format_listing(listing: &Listing) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(reason) = &listing.stale {
        lines.push(format!("(offline: showing cached {}; {})", listing.feed, reason));
    }
    if listing.items.is_empty() {
        lines.push(format!("No posts in {}", listing.feed));
        return lines;
    }

    for post in &listing.items {
        if matches!(listing.feed, Feed::Thread { .. }) {
            lines.extend(format_reply(post));
        } else {
            lines.push(format_post_line(post));
        }
    }
    if listing.more {
        lines.push(format!("(more: quire more {})", listing.feed));
    }
    lines
}

pub fn format_refresh(feed: &Feed, report: &RefreshReport) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(push) = &report.push {
        lines.push(format_push(push));
    }
    let end = if report.end_reached { ", end of list" } else { "" };
    lines.push(format!("Refreshed {}: {} cached{}", feed, report.rows, end));
    lines
}

pub fn format_push(report: &PushReport) -> String {
    if report.deferred == 0 {
        format!("Pushed {} subscription change(s)", report.pushed)
    } else {
        format!(
            "Pushed {} subscription change(s), {} still queued",
            report.pushed, report.deferred
        )
    }
}

pub fn format_category(category: &Category) -> String {
    match &category.description {
        Some(description) => format!("- {}: {} ({})", category.id, category.name, description),
        None => format!("- {}: {}", category.id, category.name),
    }
}

pub fn format_notice(notices: &[Notice]) -> Vec<String> {
    if notices.is_empty() {
        return vec!["No notice today".to_string()];
    }
    let mut lines = Vec::new();
    for notice in notices {
        lines.extend(wrap_text(&notice.text, WRAP_WIDTH).lines().map(String::from));
    }
    lines
}

fn format_summary(summary: &QuerySummary) -> String {
    let paging = match &summary.remote_key {
        Some(key) => {
            let end = if key.end_reached() { ", end reached" } else { "" };
            format!(
                "fetched {}{}",
                key.last_fetched_at.format("%Y-%m-%d %H:%M"),
                end
            )
        }
        None => "never fetched".to_string(),
    };
    format!("  {}: {} rows ({})", summary.query, summary.rows, paging)
}

pub fn format_status(status: &Status) -> Vec<String> {
    let mut lines = Vec::new();
    match &status.remote {
        Some(url) => lines.push(format!("Remote: {}", url)),
        None => lines.push("Remote: none (offline only)".to_string()),
    }

    if status.queries.is_empty() {
        lines.push("Cache: empty".to_string());
    } else {
        lines.push("Cache:".to_string());
        lines.extend(status.queries.iter().map(format_summary));
    }

    if !status.pending.is_empty() {
        lines.push(format!("Pending ({}):", status.pending.len()));
        for mutation in &status.pending {
            lines.push(format!("  {} {}", mutation.action, mutation.target_id));
        }
    }
    lines
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
