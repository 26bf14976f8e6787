//! Content negotiation
//!
//! A simplified take on HTTP proactive negotiation: the client sends an
//! Accept-style list of media ranges with optional `q` weights, the endpoint
//! offers an ordered list of media types, and one of the offered types is
//! chosen.
//!
//! ## Rules
//! - Each offered type takes the weight of the most specific range that
//!   matches it (`type/subtype` beats `type/*` beats `*/*`)
//! - A weight of zero means "not acceptable"
//! - The highest weight wins; ties go to the type offered first
//! - An empty header accepts anything
//! - Ranges that cannot be parsed are skipped

use crate::error::{PasteError, Result};

/// Weights are kept in thousandths so comparisons are exact
const MAX_WEIGHT: u16 = 1000;

/// One parsed entry of an Accept header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRange {
    pub main: String,
    pub sub: String,
    /// Quality in thousandths (0..=1000)
    pub weight: u16,
}

impl MediaRange {
    /// Parse a single range such as `text/plain;q=0.5`
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.split(';');
        let media = parts.next()?.trim();
        let (main, sub) = media.split_once('/')?;
        let (main, sub) = (main.trim(), sub.trim());

        if main.is_empty() || sub.is_empty() || (main == "*" && sub != "*") {
            return None;
        }

        let mut weight = MAX_WEIGHT;
        for param in parts {
            let Some((key, value)) = param.split_once('=') else {
                continue;
            };
            if key.trim().eq_ignore_ascii_case("q") {
                weight = parse_weight(value.trim())?;
            }
        }

        Some(Self {
            main: main.to_ascii_lowercase(),
            sub: sub.to_ascii_lowercase(),
            weight,
        })
    }

    /// How closely this range matches `main/sub`, if at all
    ///
    /// Higher is more specific.
    fn specificity(&self, main: &str, sub: &str) -> Option<u8> {
        match (self.main.as_str(), self.sub.as_str()) {
            ("*", "*") => Some(0),
            (m, "*") if m == main => Some(1),
            (m, s) if m == main && s == sub => Some(2),
            _ => None,
        }
    }
}

/// Parse a q-value into thousandths (`0`, `0.5`, `1.000`, ...)
fn parse_weight(value: &str) -> Option<u16> {
    let (int, frac) = value.split_once('.').unwrap_or((value, ""));
    if frac.len() > 3 || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut thousandths: u16 = 0;
    for (i, digit) in frac.bytes().enumerate() {
        thousandths += u16::from(digit - b'0') * 10u16.pow(2 - i as u32);
    }

    match int {
        "0" => Some(thousandths),
        "1" if thousandths == 0 => Some(MAX_WEIGHT),
        _ => None,
    }
}

/// Parse a full Accept header, skipping malformed ranges
///
/// A blank header is treated as `*/*`.
pub fn parse_accept(header: &str) -> Vec<MediaRange> {
    if header.trim().is_empty() {
        return vec![MediaRange {
            main: "*".to_string(),
            sub: "*".to_string(),
            weight: MAX_WEIGHT,
        }];
    }

    header
        .split(',')
        .filter(|raw| !raw.trim().is_empty())
        .filter_map(|raw| {
            let range = MediaRange::parse(raw);
            if range.is_none() {
                tracing::trace!(range = raw, "Skipping malformed media range");
            }
            range
        })
        .collect()
}

/// Weight the client gives to `media_type`, using the most specific range
fn weight_of(ranges: &[MediaRange], media_type: &str) -> u16 {
    let lowered = media_type.to_ascii_lowercase();
    let Some((main, sub)) = lowered.split_once('/') else {
        return 0;
    };

    ranges
        .iter()
        .filter_map(|range| range.specificity(main, sub).map(|s| (s, range.weight)))
        // On equal specificity the first range listed wins
        .fold(None, |best: Option<(u8, u16)>, (spec, weight)| match best {
            Some((best_spec, _)) if best_spec >= spec => best,
            _ => Some((spec, weight)),
        })
        .map(|(_, weight)| weight)
        .unwrap_or(0)
}

/// Pick the best of `supported` for the given Accept header
///
/// Deterministic: the same inputs always give the same answer, and ties go
/// to the earlier entry of `supported`.
pub fn negotiate<'a>(accept: &str, supported: &[&'a str]) -> Result<&'a str> {
    let ranges = parse_accept(accept);

    let mut best: Option<(&'a str, u16)> = None;
    for &candidate in supported {
        let weight = weight_of(&ranges, candidate);
        if weight == 0 {
            continue;
        }
        // Strictly greater, so the earlier candidate keeps a tie
        if best.map_or(true, |(_, w)| weight > w) {
            best = Some((candidate, weight));
        }
    }

    best.map(|(chosen, _)| chosen).ok_or(PasteError::NotAcceptable)
}
