//! Transcript parsing: format detection and per-format line grammars.
//!
//! One grammar per platform is compiled at startup; detection scores each
//! grammar against the first 200 non-empty lines and the best match wins.
//! The parser is total on any UTF-8 input: unparsable lines either merge
//! into the previous message as continuations or turn into diagnostics,
//! never into errors.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use tracing::debug;

use crate::models::{Diagnostic, Message, Platform};

/// Maximum number of non-empty lines scanned during format detection.
const DETECTION_WINDOW: usize = 200;
/// A format must match at least this share of scanned lines to win outright.
const DETECTION_THRESHOLD: f64 = 0.10;

/// Media placeholder markers, matched case-insensitively as substrings.
const MEDIA_MARKERS: &[&str] = &[
    "<media omitted>",
    "image omitted",
    "video omitted",
    "audio omitted",
    "sticker omitted",
    "gif omitted",
    "document omitted",
    "(file attached)",
];

/// Ordered timestamp layouts for the iMessage header line.
const IMESSAGE_LAYOUTS: &[&str] = &[
    "%B %d, %Y %I:%M:%S %p",
    "%B %d, %Y %I:%M %p",
    "%b %d, %Y %I:%M:%S %p",
    "%b %d, %Y %I:%M %p",
];

/// Ordered timestamp layouts for Telegram JSON exports.
const TELEGRAM_JSON_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub format: Platform,
    pub messages: Vec<Message>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Format detector and per-format parsers over compiled grammars.
pub struct ChatParser {
    whatsapp: Regex,
    telegram: Regex,
    discord: Regex,
    imessage: Regex,
    generic: Regex,
    imessage_from: Regex,
}

impl Default for ChatParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatParser {
    /// Compile the per-format grammars. The patterns are static, so
    /// compilation cannot fail at runtime.
    #[must_use]
    pub fn new() -> Self {
        Self {
            whatsapp: Regex::new(
                r"^\[?(\d{1,2})[./-](\d{1,2})[./-](\d{2,4}),? (\d{1,2}):(\d{2})(?::(\d{2}))?\s?([AP]M)?\]? [-–] ([^:]+): (.*)$",
            )
            .expect("whatsapp grammar"),
            telegram: Regex::new(
                r"^(\d{2})\.(\d{2})\.(\d{4}) (\d{2}):(\d{2})(?::(\d{2}))? - ([^:]+): (.*)$",
            )
            .expect("telegram grammar"),
            discord: Regex::new(
                r"^(.+?) [—–-] (\d{1,2})/(\d{1,2})/(\d{2,4}) (\d{1,2}):(\d{2})(?::(\d{2}))?$",
            )
            .expect("discord grammar"),
            imessage: Regex::new(r"^([A-Za-z]{3,9} \d{1,2}, \d{4} \d{1,2}:\d{2}(?::\d{2})? [AP]M)$")
                .expect("imessage grammar"),
            generic: Regex::new(r"^([^:]+): (.*)$").expect("generic grammar"),
            imessage_from: Regex::new(r"^From: (.+)$").expect("imessage from line"),
        }
    }

    /// Parse a transcript, auto-detecting the format when no hint is given.
    /// Total on any UTF-8 input.
    #[must_use]
    pub fn parse(&self, raw: &str, hint: Option<Platform>) -> ParseOutcome {
        let format = hint.unwrap_or_else(|| self.detect_format(raw));
        debug!(format = %format, "parsing transcript");

        let mut diagnostics = Vec::new();
        let messages = match format {
            Platform::Whatsapp => self.parse_whatsapp(raw, &mut diagnostics),
            Platform::Telegram => self.parse_telegram(raw, &mut diagnostics),
            Platform::Discord => self.parse_discord(raw, &mut diagnostics),
            Platform::Imessage => self.parse_imessage(raw, &mut diagnostics),
            Platform::Generic => self.parse_generic(raw, &mut diagnostics),
        };

        if messages.iter().any(|m| m.timestamp.is_some()) {
            diagnostics.push(Diagnostic::new(
                "naive_timestamps_assumed_utc",
                "source timestamps carry no zone; naive values were read as UTC",
            ));
        }

        ParseOutcome {
            format,
            messages,
            diagnostics,
        }
    }

    /// Score each grammar against the first 200 non-empty lines.
    #[must_use]
    pub fn detect_format(&self, raw: &str) -> Platform {
        let trimmed = raw.trim_start();
        if (trimmed.starts_with('{') || trimmed.starts_with('['))
            && telegram_json_messages(raw).is_some()
        {
            return Platform::Telegram;
        }

        let lines: Vec<&str> = raw
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .take(DETECTION_WINDOW)
            .collect();
        if lines.is_empty() {
            return Platform::Generic;
        }

        // The grammars overlap (a Telegram header is also a valid WhatsApp
        // line, every "Name: text" line is valid Generic), so each line is
        // attributed to the most specific grammar that matches it.
        let by_specificity = [
            (Platform::Telegram, &self.telegram),
            (Platform::Whatsapp, &self.whatsapp),
            (Platform::Discord, &self.discord),
            (Platform::Imessage, &self.imessage),
            (Platform::Generic, &self.generic),
        ];
        let mut counts: Vec<(Platform, usize)> = vec![
            (Platform::Whatsapp, 0),
            (Platform::Telegram, 0),
            (Platform::Discord, 0),
            (Platform::Imessage, 0),
            (Platform::Generic, 0),
        ];
        for line in &lines {
            if let Some(&(format, _)) = by_specificity.iter().find(|(_, re)| re.is_match(line)) {
                if let Some(entry) = counts.iter_mut().find(|(p, _)| *p == format) {
                    entry.1 += 1;
                }
            }
        }

        // Winner needs the highest count; ties break on the precedence order
        // of `counts` above.
        let mut winner = Platform::Generic;
        let mut best = 0usize;
        for &(format, n) in &counts {
            if n > best {
                winner = format;
                best = n;
            }
        }
        if best == 0 {
            return Platform::Generic;
        }

        let threshold = (lines.len() as f64 * DETECTION_THRESHOLD).ceil() as usize;
        let contenders = counts.iter().filter(|&&(_, n)| n > 0).count();
        if best >= threshold || contenders == 1 {
            winner
        } else {
            Platform::Generic
        }
    }

    fn parse_whatsapp(&self, raw: &str, diagnostics: &mut Vec<Diagnostic>) -> Vec<Message> {
        let mut messages: Vec<Message> = Vec::new();
        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(caps) = self.whatsapp.captures(line) {
                let timestamp = build_slash_timestamp(
                    caps.get(1).map_or("", |m| m.as_str()),
                    caps.get(2).map_or("", |m| m.as_str()),
                    caps.get(3).map_or("", |m| m.as_str()),
                    caps.get(4).map_or("", |m| m.as_str()),
                    caps.get(5).map_or("", |m| m.as_str()),
                    caps.get(6).map(|m| m.as_str()),
                    caps.get(7).map(|m| m.as_str()),
                    true,
                );
                if timestamp.is_none() {
                    diagnostics.push(Diagnostic::new(
                        "parser_skip",
                        format!("unreadable whatsapp timestamp: {line}"),
                    ));
                }
                let sender = caps.get(8).map_or("", |m| m.as_str()).trim().to_string();
                let text = caps.get(9).map_or("", |m| m.as_str()).trim().to_string();
                messages.push(new_message(timestamp, sender, text, Platform::Whatsapp));
            } else {
                append_continuation(&mut messages, line, diagnostics);
            }
        }
        messages
    }

    fn parse_telegram(&self, raw: &str, diagnostics: &mut Vec<Diagnostic>) -> Vec<Message> {
        if let Some(entries) = telegram_json_messages(raw) {
            return parse_telegram_json(entries, diagnostics);
        }

        let mut messages: Vec<Message> = Vec::new();
        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(caps) = self.telegram.captures(line) {
                let timestamp = build_slash_timestamp(
                    caps.get(1).map_or("", |m| m.as_str()),
                    caps.get(2).map_or("", |m| m.as_str()),
                    caps.get(3).map_or("", |m| m.as_str()),
                    caps.get(4).map_or("", |m| m.as_str()),
                    caps.get(5).map_or("", |m| m.as_str()),
                    caps.get(6).map(|m| m.as_str()),
                    None,
                    false,
                );
                if timestamp.is_none() {
                    diagnostics.push(Diagnostic::new(
                        "parser_skip",
                        format!("unreadable telegram timestamp: {line}"),
                    ));
                }
                let sender = caps.get(7).map_or("", |m| m.as_str()).trim().to_string();
                let text = caps.get(8).map_or("", |m| m.as_str()).trim().to_string();
                messages.push(new_message(timestamp, sender, text, Platform::Telegram));
            } else {
                append_continuation(&mut messages, line, diagnostics);
            }
        }
        messages
    }

    fn parse_discord(&self, raw: &str, diagnostics: &mut Vec<Diagnostic>) -> Vec<Message> {
        let mut messages: Vec<Message> = Vec::new();
        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(caps) = self.discord.captures(line) {
                // Discord exports write day-first dates
                let timestamp = build_slash_timestamp(
                    caps.get(2).map_or("", |m| m.as_str()),
                    caps.get(3).map_or("", |m| m.as_str()),
                    caps.get(4).map_or("", |m| m.as_str()),
                    caps.get(5).map_or("", |m| m.as_str()),
                    caps.get(6).map_or("", |m| m.as_str()),
                    caps.get(7).map(|m| m.as_str()),
                    None,
                    false,
                );
                if timestamp.is_none() {
                    diagnostics.push(Diagnostic::new(
                        "parser_skip",
                        format!("unreadable discord timestamp: {line}"),
                    ));
                }
                let sender = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();
                messages.push(new_message(
                    timestamp,
                    sender,
                    String::new(),
                    Platform::Discord,
                ));
            } else if let Some(last) = messages.last_mut() {
                if last.text.is_empty() {
                    last.text = line.to_string();
                    refresh_media_flag(last);
                } else {
                    last.text.push('\n');
                    last.text.push_str(line);
                }
            } else {
                diagnostics.push(Diagnostic::new(
                    "parser_skip",
                    format!("orphan line before first header: {line}"),
                ));
            }
        }
        messages
    }

    fn parse_imessage(&self, raw: &str, diagnostics: &mut Vec<Diagnostic>) -> Vec<Message> {
        let mut messages: Vec<Message> = Vec::new();
        let mut pending_timestamp: Option<Option<DateTime<Utc>>> = None;
        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(caps) = self.imessage.captures(line) {
                let header = caps.get(1).map_or("", |m| m.as_str());
                let timestamp = parse_with_layouts(header, IMESSAGE_LAYOUTS);
                if timestamp.is_none() {
                    diagnostics.push(Diagnostic::new(
                        "parser_skip",
                        format!("unreadable imessage timestamp: {header}"),
                    ));
                }
                pending_timestamp = Some(timestamp);
            } else if let Some(timestamp) = pending_timestamp.take() {
                match self.imessage_from.captures(line) {
                    Some(caps) => {
                        let sender = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();
                        messages.push(new_message(
                            timestamp,
                            sender,
                            String::new(),
                            Platform::Imessage,
                        ));
                    }
                    None => {
                        diagnostics.push(Diagnostic::new(
                            "parser_skip",
                            format!("imessage header without sender line: {line}"),
                        ));
                    }
                }
            } else if let Some(last) = messages.last_mut() {
                if last.text.is_empty() {
                    last.text = line.to_string();
                    refresh_media_flag(last);
                } else {
                    last.text.push('\n');
                    last.text.push_str(line);
                }
            } else {
                diagnostics.push(Diagnostic::new(
                    "parser_skip",
                    format!("orphan line before first header: {line}"),
                ));
            }
        }
        messages
    }

    fn parse_generic(&self, raw: &str, diagnostics: &mut Vec<Diagnostic>) -> Vec<Message> {
        let mut messages: Vec<Message> = Vec::new();
        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match self.generic.captures(line) {
                Some(caps) => {
                    let sender = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();
                    let text = caps.get(2).map_or("", |m| m.as_str()).trim().to_string();
                    messages.push(new_message(None, sender, text, Platform::Generic));
                }
                None => append_continuation(&mut messages, line, diagnostics),
            }
        }
        messages
    }
}

fn new_message(
    timestamp: Option<DateTime<Utc>>,
    sender: String,
    text: String,
    platform: Platform,
) -> Message {
    let is_media = is_media_placeholder(&text);
    Message {
        timestamp,
        sender,
        text,
        platform,
        is_media,
    }
}

fn refresh_media_flag(message: &mut Message) {
    message.is_media = is_media_placeholder(&message.text);
}

fn is_media_placeholder(text: &str) -> bool {
    let lower = text.to_lowercase();
    MEDIA_MARKERS.iter().any(|m| lower.contains(m))
}

/// Merge an unmatched line into the previous message; orphans at the start
/// of the file are recorded and dropped.
fn append_continuation(messages: &mut [Message], line: &str, diagnostics: &mut Vec<Diagnostic>) {
    match messages.last_mut() {
        Some(last) => {
            last.text.push('\n');
            last.text.push_str(line);
        }
        None => diagnostics.push(Diagnostic::new(
            "parser_skip",
            format!("orphan line before first header: {line}"),
        )),
    }
}

/// Build a UTC instant from numeric date/time captures. When `month_first`
/// the first field is tried as the month, swapping when it cannot be one.
#[allow(clippy::too_many_arguments)]
fn build_slash_timestamp(
    first: &str,
    second: &str,
    year: &str,
    hour: &str,
    minute: &str,
    second_of_minute: Option<&str>,
    ampm: Option<&str>,
    month_first: bool,
) -> Option<DateTime<Utc>> {
    let a: u32 = first.parse().ok()?;
    let b: u32 = second.parse().ok()?;
    let year = expand_year(year.parse().ok()?);
    let (month, day) = if month_first {
        if a <= 12 {
            (a, b)
        } else if b <= 12 {
            (b, a)
        } else {
            return None;
        }
    } else if b <= 12 {
        (b, a)
    } else if a <= 12 {
        (a, b)
    } else {
        return None;
    };

    let mut hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    let seconds: u32 = second_of_minute.and_then(|s| s.parse().ok()).unwrap_or(0);
    match ampm {
        Some("PM") if hour < 12 => hour += 12,
        Some("AM") if hour == 12 => hour = 0,
        _ => {}
    }

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let naive = date.and_hms_opt(hour, minute, seconds)?;
    Some(Utc.from_utc_datetime(&naive))
}

/// Two-digit years pivot at 69: 00-69 map to 2000-2069, 70-99 to 1970-1999.
fn expand_year(year: i32) -> i32 {
    if year < 100 {
        if year <= 69 {
            2000 + year
        } else {
            1900 + year
        }
    } else {
        year
    }
}

/// Try each layout in order; the first that parses wins.
fn parse_with_layouts(value: &str, layouts: &[&str]) -> Option<DateTime<Utc>> {
    layouts.iter().find_map(|layout| {
        NaiveDateTime::parse_from_str(value, layout)
            .ok()
            .map(|naive| Utc.from_utc_datetime(&naive))
    })
}

/// Extract the message array from a Telegram JSON export: either a bare
/// array or an object with a `messages` field.
fn telegram_json_messages(raw: &str) -> Option<Vec<serde_json::Value>> {
    let value: serde_json::Value = serde_json::from_str(raw.trim()).ok()?;
    let entries = match value {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut map) => match map.remove("messages") {
            Some(serde_json::Value::Array(items)) => items,
            _ => return None,
        },
        _ => return None,
    };
    let looks_like_messages = entries.iter().any(|e| {
        e.get("from").is_some() || e.get("sender").is_some() || e.get("date").is_some()
    });
    looks_like_messages.then_some(entries)
}

fn parse_telegram_json(
    entries: Vec<serde_json::Value>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<Message> {
    let mut messages = Vec::new();
    for entry in entries {
        let sender = entry
            .get("from")
            .or_else(|| entry.get("sender"))
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .trim()
            .to_string();
        if sender.is_empty() {
            diagnostics.push(Diagnostic::new(
                "parser_skip",
                "telegram json entry without sender",
            ));
            continue;
        }
        let timestamp = entry
            .get("date")
            .and_then(|v| v.as_str())
            .and_then(|s| parse_with_layouts(s, TELEGRAM_JSON_LAYOUTS));
        let text = match entry.get("text") {
            Some(serde_json::Value::String(s)) => s.trim().to_string(),
            Some(serde_json::Value::Array(parts)) => parts
                .iter()
                .filter_map(|p| match p {
                    serde_json::Value::String(s) => Some(s.as_str()),
                    serde_json::Value::Object(o) => o.get("text").and_then(|t| t.as_str()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join(""),
            _ => String::new(),
        };
        messages.push(new_message(timestamp, sender, text, Platform::Telegram));
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn parser() -> ChatParser {
        ChatParser::new()
    }

    #[test]
    fn test_detects_whatsapp() {
        let raw = "12/31/2023, 10:30 PM - Alice: hello\n12/31/2023, 10:31 PM - Bob: hi";
        assert_eq!(parser().detect_format(raw), Platform::Whatsapp);
    }

    #[test]
    fn test_detects_telegram_text() {
        let raw = "31.12.2023 22:30:00 - Alice: hello\n31.12.2023 22:31:00 - Bob: hi";
        assert_eq!(parser().detect_format(raw), Platform::Telegram);
    }

    #[test]
    fn test_detects_telegram_json() {
        let raw = r#"{"messages": [{"from": "Alice", "date": "2023-12-31T22:30:00", "text": "hi"}]}"#;
        assert_eq!(parser().detect_format(raw), Platform::Telegram);
    }

    #[test]
    fn test_detects_generic() {
        let raw = "Alice: hello there\nBob: hi";
        assert_eq!(parser().detect_format(raw), Platform::Generic);
    }

    #[test]
    fn test_empty_input_is_generic_and_empty() {
        let outcome = parser().parse("", None);
        assert_eq!(outcome.format, Platform::Generic);
        assert!(outcome.messages.is_empty());
    }

    #[test]
    fn test_whatsapp_pm_conversion() {
        let raw = "12/31/2023, 10:30 PM - Alice: late night";
        let outcome = parser().parse(raw, None);
        assert_eq!(outcome.messages.len(), 1);
        let ts = outcome.messages[0].timestamp.unwrap();
        assert_eq!(ts.hour(), 22);
        assert_eq!(ts.minute(), 30);
    }

    #[test]
    fn test_whatsapp_midnight_am() {
        let raw = "12/31/2023, 12:05 AM - Alice: midnight";
        let outcome = parser().parse(raw, None);
        assert_eq!(outcome.messages[0].timestamp.unwrap().hour(), 0);
    }

    #[test]
    fn test_whatsapp_day_first_fallback() {
        let raw = "31/12/2023, 10:30 PM - Alice: hello";
        let outcome = parser().parse(raw, Some(Platform::Whatsapp));
        let ts = outcome.messages[0].timestamp.unwrap();
        assert_eq!(ts.format("%Y-%m-%d").to_string(), "2023-12-31");
    }

    #[test]
    fn test_two_digit_year_pivot() {
        let raw = "12/31/23, 10:30 PM - Alice: one\n12/31/85, 10:30 PM - Alice: two";
        let outcome = parser().parse(raw, Some(Platform::Whatsapp));
        let years: Vec<String> = outcome
            .messages
            .iter()
            .map(|m| m.timestamp.unwrap().format("%Y").to_string())
            .collect();
        assert_eq!(years, vec!["2023", "1985"]);
    }

    #[test]
    fn test_continuation_appends_to_previous() {
        let raw = "12/31/2023, 10:30 PM - Alice: first line\nsecond line\nthird line";
        let outcome = parser().parse(raw, None);
        assert_eq!(outcome.messages.len(), 1);
        assert_eq!(outcome.messages[0].text, "first line\nsecond line\nthird line");
    }

    #[test]
    fn test_orphan_continuation_becomes_diagnostic() {
        let raw = "stray line\n12/31/2023, 10:30 PM - Alice: hello";
        let outcome = parser().parse(raw, Some(Platform::Whatsapp));
        assert_eq!(outcome.messages.len(), 1);
        assert!(outcome
            .diagnostics
            .iter()
            .any(|d| d.kind == "parser_skip" && d.detail.contains("stray line")));
    }

    #[test]
    fn test_media_placeholder_flag() {
        let raw = "12/31/2023, 10:30 PM - Alice: <Media omitted>";
        let outcome = parser().parse(raw, None);
        assert!(outcome.messages[0].is_media);
    }

    #[test]
    fn test_discord_day_first_with_low_day() {
        // DD/MM/YYYY with day <= 12: must resolve day-first, not month-first
        let raw = "Alice — 05/10/2023 14:30\nhello there";
        let outcome = parser().parse(raw, Some(Platform::Discord));
        let ts = outcome.messages[0].timestamp.unwrap();
        assert_eq!(ts.format("%Y-%m-%d %H:%M").to_string(), "2023-10-05 14:30");
    }

    #[test]
    fn test_discord_header_and_body() {
        let raw = "Alice — 31/12/2023 22:30\nhello there\nsecond line\nBob — 31/12/2023 22:31\nhi";
        let outcome = parser().parse(raw, Some(Platform::Discord));
        assert_eq!(outcome.messages.len(), 2);
        assert_eq!(outcome.messages[0].sender, "Alice");
        assert_eq!(outcome.messages[0].text, "hello there\nsecond line");
        assert_eq!(outcome.messages[1].text, "hi");
    }

    #[test]
    fn test_imessage_blocks() {
        let raw = "Dec 31, 2023 10:30:45 PM\nFrom: Alice\nhello\n\nDec 31, 2023 10:31:00 PM\nFrom: Bob\nhi there";
        let outcome = parser().parse(raw, Some(Platform::Imessage));
        assert_eq!(outcome.messages.len(), 2);
        assert_eq!(outcome.messages[0].sender, "Alice");
        assert_eq!(outcome.messages[0].text, "hello");
        assert_eq!(outcome.messages[1].timestamp.unwrap().hour(), 22);
    }

    #[test]
    fn test_telegram_json_array_text() {
        let raw = r#"{"messages": [{"from": "Alice", "date": "2023-12-31T22:30:00", "text": ["part ", {"type": "bold", "text": "two"}]}]}"#;
        let outcome = parser().parse(raw, None);
        assert_eq!(outcome.format, Platform::Telegram);
        assert_eq!(outcome.messages[0].text, "part two");
    }

    #[test]
    fn test_generic_has_no_timestamps() {
        let raw = "Alice: hello\nBob: hi back";
        let outcome = parser().parse(raw, None);
        assert_eq!(outcome.messages.len(), 2);
        assert!(outcome.messages.iter().all(|m| m.timestamp.is_none()));
        assert!(outcome
            .diagnostics
            .iter()
            .all(|d| d.kind != "naive_timestamps_assumed_utc"));
    }

    #[test]
    fn test_naive_utc_diagnostic_present() {
        let raw = "12/31/2023, 10:30 PM - Alice: hello";
        let outcome = parser().parse(raw, None);
        assert!(outcome
            .diagnostics
            .iter()
            .any(|d| d.kind == "naive_timestamps_assumed_utc"));
    }

    #[test]
    fn test_hint_overrides_detection() {
        let raw = "Alice: hello\nBob: hi";
        let outcome = parser().parse(raw, Some(Platform::Generic));
        assert_eq!(outcome.format, Platform::Generic);
    }
}
