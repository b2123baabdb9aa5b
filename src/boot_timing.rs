//! Parsing of systemd-analyze startup summaries
//!
//! `systemd-analyze` reports boot timing as a single human-readable line:
//!
//! ```text
//! Startup finished in 10.230s (firmware) + 5.631s (loader) + 2.325s (kernel) + 18.985s (userspace) = 37.172s
//! ```
//!
//! The set of phases is open-ended (older kernels omit "firmware" and
//! "loader"), so the result is keyed by the labels actually found in the
//! text rather than a fixed enum.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Key under which the post-`=` total is stored
pub const TOTAL_PHASE: &str = "total";

/// One duration component: a number followed by its unit
fn duration_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+(?:\.\d+)?)(h|min|ms|s)").expect("valid regex"))
}

/// Trailing parenthesized phase label, e.g. "5.459s (kernel)"
fn phase_label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(([^()]+)\)\s*$").expect("valid regex"))
}

/// Boot phases mapped to elapsed seconds
///
/// Produced by [`parse`]; a successful parse always contains a
/// [`TOTAL_PHASE`] entry. The sum of the individual phases is not required
/// to equal the total (firmware-reported slack and rounding are tolerated).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimingBreakdown {
    phases: HashMap<String, f64>,
}

impl TimingBreakdown {
    /// Elapsed seconds for a named phase, if it was reported
    pub fn phase(&self, name: &str) -> Option<f64> {
        self.phases.get(name).copied()
    }

    /// Total startup time in seconds
    pub fn total(&self) -> f64 {
        self.phase(TOTAL_PHASE).unwrap_or_default()
    }

    /// Iterate over all phases, including the total
    pub fn phases(&self) -> impl Iterator<Item = (&str, f64)> {
        self.phases.iter().map(|(name, secs)| (name.as_str(), *secs))
    }

    /// Number of entries, counting the total
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }
}

/// Parse one startup summary line into a [`TimingBreakdown`]
///
/// Returns `None` when the text does not match the expected grammar. The
/// parse is all-or-nothing: a line with a malformed segment yields `None`,
/// never a partial breakdown.
pub fn parse(text: &str) -> Option<TimingBreakdown> {
    // the summary is a single line; anything after it (e.g. the
    // "graphical.target reached after ..." line) is not part of the grammar
    let line = text.lines().next().unwrap_or_default();

    // '+' between phases and '=' before the total are structural
    if !line.contains('+') || !line.contains('=') {
        return None;
    }
    let (head, tail) = line.split_once('=')?;

    let mut phases = HashMap::new();
    phases.insert(TOTAL_PHASE.to_string(), parse_duration(tail)?);

    for segment in head.split('+') {
        let label = phase_label_re().captures(segment.trim())?;
        phases.insert(label[1].to_string(), parse_duration(segment)?);
    }
    Some(TimingBreakdown { phases })
}

/// Parse a duration expression like `1h 4min 20.111s` or `2min 752ms`
///
/// Components are optional but at least one must be present. Decimal
/// seconds and a separate milliseconds component are summed if a line
/// (incorrectly) carries both.
pub fn parse_duration(text: &str) -> Option<f64> {
    let mut seconds = 0.0;
    let mut components = 0;
    for token in duration_token_re().captures_iter(text) {
        let value: f64 = token[1].parse().ok()?;
        seconds += match &token[2] {
            "h" => value * 3600.0,
            "min" => value * 60.0,
            "ms" => value / 1000.0,
            _ => value,
        };
        components += 1;
    }
    if components == 0 {
        return None;
    }
    Some(seconds)
}
