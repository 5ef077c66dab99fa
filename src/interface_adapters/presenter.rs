use chrono::{DateTime, NaiveDateTime, Utc};
use std::cmp::Reverse;
use std::fmt::Write;

use crate::domain::{OrderDetails, OrderPage, OrderResponse, TutorProfile};

// Display formatting only; records are never mutated beyond ordering.

pub const DESCRIPTION_PREVIEW_CHARS: usize = 120;
pub const NO_ORDERS: &str = "No orders yet";
pub const NO_RESPONSES: &str = "No responses yet";
pub const ORDER_MISSING: &str = "This order does not exist";
pub const LOAD_FAILED: &str = "Could not load data, please try again";

// Cut on a char boundary and mark the cut with an ellipsis.
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", text[..cut].trim_end()),
        None => text.to_string(),
    }
}

pub fn price_range(min: f64, max: f64) -> String {
    format!("{min} - {max}")
}

pub fn status_label(is_active: bool) -> &'static str {
    if is_active { "Active" } else { "Inactive" }
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    // Some backend timestamps carry no offset; they are UTC.
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

pub fn format_timestamp(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

// Newest first; unparseable timestamps go last and keep their relative order.
pub fn sort_newest_first(responses: &mut [OrderResponse]) {
    responses.sort_by_key(|response| Reverse(parse_timestamp(&response.created_at)));
}

pub fn render_order_page(page: &OrderPage, current: u32) -> String {
    if page.orders.is_empty() {
        return NO_ORDERS.to_string();
    }

    let mut out = String::new();
    for order in &page.orders {
        let marker = if order.is_responsed { "✓" } else { "•" };
        let _ = writeln!(out, "{marker} [{}] {}", order.id, order.title);
        let _ = writeln!(
            out,
            "    {} | {}",
            price_range(order.min_price, order.max_price),
            truncate(&order.description, DESCRIPTION_PREVIEW_CHARS)
        );
    }
    let _ = write!(out, "page {current} of {}", page.pages.max(1));
    out
}

pub fn render_order_details(details: &OrderDetails) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", details.title);
    let _ = writeln!(out, "Rate: {}", price_range(details.min_price, details.max_price));
    let _ = writeln!(out, "Description: {}", details.description);
    if !details.tags.is_empty() {
        let _ = writeln!(out, "Tags: {}", details.tags.join(", "));
    }
    let _ = write!(out, "Responses: {}", details.response_count);
    if details.is_responsed {
        let _ = write!(out, "\nYou have already responded to this order");
    }
    out
}

pub fn render_responses(responses: &[OrderResponse]) -> String {
    if responses.is_empty() {
        return NO_RESPONSES.to_string();
    }

    let mut sorted = responses.to_vec();
    sort_newest_first(&mut sorted);
    sorted
        .iter()
        .map(|response| {
            let badge = if response.is_final { " (final)" } else { "" };
            format!(
                "Response {}{badge} -> order {}",
                format_timestamp(&response.created_at),
                response.order_id
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_profile(profile: &TutorProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (telegram {})", profile.tutor.name, profile.tutor.telegram_id);
    let _ = writeln!(out, "Status: {}", status_label(profile.is_active));
    let _ = writeln!(out, "Bio: {}", profile.bio);
    let tags = if profile.tags.is_empty() {
        "none".to_string()
    } else {
        profile.tags.join(", ")
    };
    let _ = writeln!(out, "Tags: {tags}");
    let _ = writeln!(
        out,
        "Rating: {:.1} | Responses: {}",
        profile.rating, profile.response_count
    );
    let _ = write!(out, "Reviews: {}", profile.reviews.len());
    for review in &profile.reviews {
        let visibility = if review.is_active { "" } else { " [hidden]" };
        let _ = write!(
            out,
            "\n  [{}] {}/5 {}{visibility}",
            review.id,
            review.rating,
            truncate(&review.comment, DESCRIPTION_PREVIEW_CHARS)
        );
    }
    out
}
