//! Post-processing of the model's free-text reply.
//!
//! The reply is not structured. Sections are found by literal header text, so any rewording
//! by the model makes the corresponding section disappear from the report; callers must treat
//! every extractor as optional and fall back to the full text.

use crate::models::Verdict;

/// Score reported for every successful analysis. Not derived from the reply.
pub const MATCH_SCORE: u8 = 7;

struct Section {
    header: &'static str,
    terminators: &'static [&'static str],
    /// Whether a section without any terminator runs to the end of the reply.
    open_ended: bool,
}

const STRENGTHS: Section = Section {
    header: "strengths of the match:",
    terminators: &["weaknesses"],
    open_ended: true,
};

const RECOMMENDATIONS: Section = Section {
    header: "recommendations:",
    terminators: &["final verdict:"],
    open_ended: true,
};

const VIDEO_CONTENT_ANALYSIS: Section = Section {
    header: "video content analysis:",
    terminators: &["strengths of the match:", "strengths:", "weaknesses", "recommendations:"],
    open_ended: false,
};

/// MATCH when the reply mentions "match" but never "no match" (case-insensitive).
///
/// A reply such as "this is a strong MATCH, there is no match-breaking risk" therefore comes
/// out as NO MATCH.
pub fn verdict(reply: &str) -> Verdict {
    let upper = reply.to_uppercase();
    if upper.contains("MATCH") && !upper.contains("NO MATCH") {
        Verdict::Match
    } else {
        Verdict::NoMatch
    }
}

/// The single line following "Match Evaluation:".
pub fn match_evaluation(reply: &str) -> Option<&str> {
    let lowered = reply.to_ascii_lowercase();
    let start = lowered.find("match evaluation:")? + "match evaluation:".len();
    let end = reply[start..].find('\n').map_or(reply.len(), |i| start + i);
    non_empty(&reply[start..end])
}

pub fn strengths(reply: &str) -> Option<&str> {
    extract(reply, &STRENGTHS)
}

pub fn recommendations(reply: &str) -> Option<&str> {
    extract(reply, &RECOMMENDATIONS)
}

pub fn video_content_analysis(reply: &str) -> Option<&str> {
    extract(reply, &VIDEO_CONTENT_ANALYSIS)
}

pub fn mentions_content_style(reply: &str) -> bool {
    let lowered = reply.to_ascii_lowercase();
    lowered.contains("content style") || lowered.contains("visual language")
}

// ASCII lowering keeps byte offsets identical to the original text, and every header is
// ASCII, so offsets found in `lowered` are char boundaries in `reply`.
fn extract<'a>(reply: &'a str, section: &Section) -> Option<&'a str> {
    let lowered = reply.to_ascii_lowercase();
    let start = lowered.find(section.header)? + section.header.len();

    let end = section
        .terminators
        .iter()
        .filter_map(|t| lowered[start..].find(t).map(|i| start + i))
        .min();

    let end = match end {
        Some(end) => end,
        None if section.open_ended => reply.len(),
        None => return None,
    };
    non_empty(&reply[start..end])
}

fn non_empty(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}
