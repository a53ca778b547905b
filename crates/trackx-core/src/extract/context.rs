//! Timestamp recovery and motion-status classification
//!
//! Timestamps are collected once across the whole document and assigned to
//! records by positional index; status comes from keyword scans over the
//! text window around each match.

use regex::Regex;

use crate::error::Result;
use crate::models::IgnitionStatus;

/// Keywords checked in fixed order; the first matching set wins, so
/// "not moving" classifies as Stopped before the moving set can see it.
const STOPPED_KEYWORDS: &[&str] = &[
    "stopped",
    "parked",
    "stationary",
    "ignition off",
    "engine off",
    "halt",
    "standstill",
    "not moving",
    "vehicle stopped",
    "engine switched off",
    "no movement detected",
    "vehicle parked",
    "final destination",
    "end of tracking",
];

const IDLE_KEYWORDS: &[&str] = &[
    "idling",
    "idle",
    "engine on",
    "ignition on",
    "running",
    "waiting",
    "engine running",
    "temporary stop",
    "brief stop",
    "passenger drop-off",
    "vehicle idling",
    "engine running briefly",
];

const MOVING_KEYWORDS: &[&str] = &[
    "moving",
    "motion",
    "driving",
    "traveling",
    "travelling",
    "speed",
    "en route",
    "in transit",
    "vehicle in motion",
    "coordinate recorded during movement",
    "significant movement",
    "movement detected",
];

/// The explicit tie-break order for context classification
const STATUS_KEYWORD_TABLE: [(IgnitionStatus, &[&str]); 3] = [
    (IgnitionStatus::Stopped, STOPPED_KEYWORDS),
    (IgnitionStatus::Idle, IDLE_KEYWORDS),
    (IgnitionStatus::Moving, MOVING_KEYWORDS),
];

/// Smaller keyword sets used when only a free-text description is
/// available, as in CSV exports without a status column
const CORE_STATUS_KEYWORD_TABLE: [(IgnitionStatus, &[&str]); 3] = [
    (
        IgnitionStatus::Stopped,
        &["stopped", "parked", "stationary", "ignition off", "engine off", "not moving", "halt", "standstill"],
    ),
    (
        IgnitionStatus::Idle,
        &["idling", "idle", "engine on", "ignition on", "running", "waiting"],
    ),
    (
        IgnitionStatus::Moving,
        &["moving", "motion", "driving", "traveling", "travelling", "en route", "in transit", "speed"],
    ),
];

/// Classify motion status from a candidate's context window plus its
/// matched text. Falls back to landmark heuristics, then Unknown.
pub fn classify_status(context: &str, matched_text: &str) -> IgnitionStatus {
    let combined = format!("{} {}", context, matched_text).to_lowercase();

    for (status, keywords) in STATUS_KEYWORD_TABLE {
        if keywords.iter().any(|keyword| combined.contains(keyword)) {
            return status;
        }
    }

    // Landmark heuristics for text without explicit status wording
    if combined.contains("airport") && combined.contains("departure") {
        return IgnitionStatus::Idle;
    }
    if combined.contains("mall") || combined.contains("shopping") {
        return IgnitionStatus::Stopped;
    }
    if combined.contains("checkpoint") || combined.contains("inspection") {
        return IgnitionStatus::Stopped;
    }

    IgnitionStatus::Unknown
}

/// Classify a standalone description. Unlike [`classify_status`] there is
/// no landmark fallback and no Unknown default; an empty or unmatched
/// description yields `None`.
pub fn classify_description(description: &str) -> Option<IgnitionStatus> {
    if description.is_empty() {
        return None;
    }

    let desc = description.to_lowercase();
    for (status, keywords) in CORE_STATUS_KEYWORD_TABLE {
        if keywords.iter().any(|keyword| desc.contains(keyword)) {
            return Some(status);
        }
    }

    None
}

/// Compiled timestamp and location patterns
#[derive(Debug)]
pub struct ContextPatterns {
    /// Tried in order; every match across the document is collected
    timestamps: Vec<Regex>,
    /// `at/near/location/stop <Name>` phrases near a coordinate
    location: Regex,
}

impl ContextPatterns {
    pub fn new() -> Result<Self> {
        let timestamps = vec![
            // YYYY-MM-DD HH:MM:SS
            Regex::new(r"\b\d{4}[/-]\d{2}[/-]\d{2}[,\s]+\d{2}:\d{2}:\d{2}\b")?,
            // DD/MM/YYYY HH:MM:SS
            Regex::new(r"\b\d{2}[/-]\d{2}[/-]\d{4}[,\s]+\d{2}:\d{2}:\d{2}\b")?,
            // HH:MM:SS
            Regex::new(r"\b\d{2}:\d{2}:\d{2}\b")?,
            // HH:MM
            Regex::new(r"\b\d{2}:\d{2}\b")?,
            // Time: HH:MM:SS, kept with its label
            Regex::new(r"(?i)Time[:\s]+(\d{2}:\d{2}(?::\d{2})?)")?,
            // YYYY/MM/DD
            Regex::new(r"\b\d{4}/\d{2}/\d{2}\b")?,
        ];

        Ok(Self {
            timestamps,
            location: Regex::new(r"(?i)(?:at|near|location|stop)\s+([A-Z][A-Za-z\s]{3,30})")?,
        })
    }

    /// Collect every timestamp-like substring in document order per
    /// pattern, deduplicated while preserving first appearance. A bare
    /// HH:MM:SS also surfaces its HH:MM prefix through the shorter
    /// pattern; positional assignment depends on that shape.
    pub fn collect_timestamps(&self, text: &str) -> Vec<String> {
        let mut timestamps: Vec<String> = Vec::new();

        for pattern in &self.timestamps {
            for found in pattern.find_iter(text) {
                let value = found.as_str().to_string();
                if !timestamps.contains(&value) {
                    timestamps.push(value);
                }
            }
        }

        timestamps
    }

    /// First location phrase in a context window, if any
    pub fn location_name<'t>(&self, context: &'t str) -> Option<&'t str> {
        self.location
            .captures(context)
            .and_then(|caps| caps.get(1))
            .map(|group| group.as_str())
    }
}

/// The characters around a matched coordinate: `before` characters back
/// and `after` characters forward from the first occurrence of the match.
/// Text that cannot be located falls back to the start of the document.
pub fn context_window(text: &str, matched: &str, before: usize, after: usize) -> String {
    let match_start = text.find(matched).unwrap_or(0);

    let mut start = match_start;
    for _ in 0..before {
        match text[..start].chars().next_back() {
            Some(c) => start -= c.len_utf8(),
            None => break,
        }
    }

    let mut end = match_start;
    for _ in 0..after {
        match text[end..].chars().next() {
            Some(c) => end += c.len_utf8(),
            None => break,
        }
    }

    text[start..end].to_string()
}
