//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the client:
//! cookie lookup, query string parsing, download file naming and localized
//! date formatting.

use std::sync::OnceLock;
use chrono::{DateTime, FixedOffset, Offset, Utc};
use regex::Regex;

fn whitespace_runs() -> &'static Regex {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("static pattern"))
}

/// Read a cookie value out of a raw `Cookie` header string
///
/// Entries are `;`-separated and trimmed; the value is percent-decoded. An
/// undecodable value is returned as-is.
pub fn get_cookie(cookie_header: &str, name: &str) -> Option<String> {
    if cookie_header.is_empty() {
        return None;
    }

    let prefix = format!("{}=", name);
    cookie_header
        .split(';')
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(prefix.as_str()))
        .map(|raw| match urlencoding::decode(raw) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => raw.to_string(),
        })
}

/// Look up a single parameter in a query string (with or without the leading `?`)
pub fn query_param(query: &str, key: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

/// Replace every whitespace run with a hyphen (`Jane  Doe` -> `Jane-Doe`)
pub fn hyphenate_name(name: &str) -> String {
    whitespace_runs().replace_all(name, "-").into_owned()
}

/// Replace every whitespace run with an underscore (`Jane Doe` -> `Jane_Doe`)
pub fn underscore_name(name: &str) -> String {
    whitespace_runs().replace_all(name, "_").into_owned()
}

/// Replace path separators, reserved and control characters with `_`
///
/// The result is always a single path component.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    match cleaned.trim_matches('.') {
        "" => "_".to_string(),
        _ => cleaned,
    }
}

/// File name used for the QR image download
pub fn qr_file_name(registrant: &str) -> String {
    sanitize_file_name(&format!("event-pass-{}.png", hyphenate_name(registrant)))
}

/// File name used for the ID-card download
pub fn id_card_file_name(registrant: &str) -> String {
    sanitize_file_name(&format!("ID_Card_{}.pdf", underscore_name(registrant)))
}

/// Build the display offset from a minute count, falling back to UTC
pub fn display_offset(utc_offset_minutes: i32) -> FixedOffset {
    utc_offset_minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix())
}

/// Localized short date, e.g. `1/15/2025`
pub fn format_date(timestamp: DateTime<Utc>, offset: FixedOffset) -> String {
    timestamp.with_timezone(&offset).format("%-m/%-d/%Y").to_string()
}

/// Localized date and time, e.g. `1/15/2025, 9:05:00 AM`
pub fn format_date_time(timestamp: DateTime<Utc>, offset: FixedOffset) -> String {
    timestamp
        .with_timezone(&offset)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}
