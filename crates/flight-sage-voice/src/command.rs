// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// What the speaker wants to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Search,
    Location,
    Weather,
    Navigate,
}

/// Dashboard panels a command can bring to the front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    #[default]
    Voice,
    Search,
    Map,
    Weather,
    Gps,
}

impl Intent {
    pub fn panel(self) -> Panel {
        match self {
            Intent::Search => Panel::Search,
            Intent::Location => Panel::Gps,
            Intent::Weather => Panel::Weather,
            Intent::Navigate => Panel::Map,
        }
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Panel::Voice => "voice",
            Panel::Search => "search",
            Panel::Map => "map",
            Panel::Weather => "weather",
            Panel::Gps => "gps",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationRef {
    /// "here", "my location": whatever the location provider reports.
    Here,
    /// Free text, left for the destination table to resolve.
    Named(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceCommand {
    pub raw: String,
    pub intent: Option<Intent>,
    pub origin: Option<LocationRef>,
    pub destination: Option<LocationRef>,
}

const WEATHER_WORDS: &[&str] = &["weather", "forecast", "wind", "visibility", "metar", "storm"];
const LOCATION_WORDS: &[&str] = &[
    "where am i",
    "my location",
    "current location",
    "my position",
    "gps",
    "locate me",
];
const NAVIGATE_WORDS: &[&str] = &["navigate", "navigation", "directions", "route", "map"];
const SEARCH_WORDS: &[&str] = &["flight", "search", "find", "book", "fly", "ticket"];
/// Words that turn a following "to" into an infinitive rather than a direction.
const INFINITIVE_VERBS: &[&str] = &[
    "be", "see", "know", "book", "go", "fly", "find", "get", "visit", "check", "have", "make",
    "take", "travel", "plan", "search", "hear", "ask", "learn", "do", "leave", "meet", "show",
    "start", "land", "depart", "head", "catch",
];

impl VoiceCommand {
    pub fn parse(input: &str) -> Self {
        let clean = input
            .trim()
            .trim_end_matches(&['?', '!', '.'][..])
            .to_lowercase();

        let mut cmd = VoiceCommand {
            raw: input.to_string(),
            intent: detect_intent(&clean),
            origin: None,
            destination: None,
        };

        // "from X to Y", stopping at trailing time phrases or a further "to"
        static FROM_TO_RE: OnceLock<Regex> = OnceLock::new();
        let from_to_re = FROM_TO_RE.get_or_init(|| {
            Regex::new(r"\bfrom\s+(.+?)\s+\bto\b\s+(.+?)(\s+\b(?:to|on|at|for|tomorrow|today|tonight)\b|$)")
                .unwrap()
        });
        // "to Y" alone; the tail stops at the next "to" ("to Chicago to see ...")
        static TO_RE: OnceLock<Regex> = OnceLock::new();
        let to_re = TO_RE.get_or_init(|| Regex::new(r"\bto\b").unwrap());
        static TAIL_RE: OnceLock<Regex> = OnceLock::new();
        let tail_re = TAIL_RE.get_or_init(|| {
            Regex::new(r"^\s+(.+?)(\s+\b(?:to|on|at|for|from|tomorrow|today|tonight)\b|$)")
                .unwrap()
        });
        // Trailing "from X" after the destination ("to Chicago from Boston")
        static FROM_RE: OnceLock<Regex> = OnceLock::new();
        let from_re = FROM_RE.get_or_init(|| {
            Regex::new(r"\bfrom\s+(.+?)(\s+\b(?:to|on|at|for|tomorrow|today|tonight)\b|$)")
                .unwrap()
        });

        if let Some(caps) = from_to_re.captures(&clean) {
            cmd.origin = parse_location(caps[1].trim());
            cmd.destination = parse_location(caps[2].trim());
        } else {
            for to in to_re.find_iter(&clean) {
                let rest = &clean[to.end()..];
                let Some(caps) = tail_re.captures(rest) else {
                    continue;
                };
                let place = caps[1].trim();
                // "to be", "to book": an infinitive, not a place
                let first_word = place.split_whitespace().next().unwrap_or_default();
                if INFINITIVE_VERBS.contains(&first_word) {
                    continue;
                }
                cmd.destination = parse_location(place);
                if let Some(from) = from_re.captures(rest) {
                    cmd.origin = parse_location(from[1].trim());
                }
                break;
            }
        }

        // A bare place ("to Boston") is a search
        if cmd.intent.is_none() && cmd.destination.is_some() {
            cmd.intent = Some(Intent::Search);
        }

        log::debug!(
            "Parsed voice command — intent={:?} origin={:?} destination={:?}",
            cmd.intent,
            cmd.origin,
            cmd.destination
        );
        cmd
    }

    /// Whether the command asks for a route: searches, navigation, or a bare
    /// destination with no other intent.
    pub fn wants_route(&self) -> bool {
        matches!(
            self.intent,
            None | Some(Intent::Search) | Some(Intent::Navigate)
        )
    }

    /// Panel the dashboard should switch to; stays on the voice panel when unsure.
    pub fn panel(&self) -> Panel {
        self.intent.map(Intent::panel).unwrap_or_default()
    }
}

fn detect_intent(clean: &str) -> Option<Intent> {
    let has = |words: &[&str]| words.iter().any(|w| contains_word(clean, w));
    if has(WEATHER_WORDS) {
        Some(Intent::Weather)
    } else if has(LOCATION_WORDS) {
        Some(Intent::Location)
    } else if has(NAVIGATE_WORDS) {
        Some(Intent::Navigate)
    } else if has(SEARCH_WORDS) {
        Some(Intent::Search)
    } else {
        None
    }
}

/// Phrase match on word boundaries, tolerating a plural "s" ("flights").
fn contains_word(text: &str, phrase: &str) -> bool {
    text.match_indices(phrase).any(|(i, _)| {
        let before_ok = text[..i]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let rest = &text[i + phrase.len()..];
        let rest = rest.strip_prefix('s').unwrap_or(rest);
        let after_ok = rest.chars().next().map_or(true, |c| !c.is_alphanumeric());
        before_ok && after_ok
    })
}

fn parse_location(s: &str) -> Option<LocationRef> {
    let s = s.strip_prefix("the ").unwrap_or(s).trim();
    match s {
        "" => None,
        "here" | "my location" | "current location" | "my position" => Some(LocationRef::Here),
        _ => Some(LocationRef::Named(s.to_string())),
    }
}
