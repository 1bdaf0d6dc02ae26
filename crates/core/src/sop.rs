use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A line that looks like a numbered heading, before classification.
///
/// Produced by [`detect_headings`], consumed by [`classify_headings`] and
/// [`build_sections`]. Offsets are byte positions of the whole heading line
/// within the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingCandidate {
    pub number: String,
    pub title: String,
    pub start: usize,
    pub end: usize,
}

/// One numbered section of a document.
///
/// `number` is the dotted string exactly as it appears in the source
/// ("2", "2.1", "3.2.1"). Numbers are not guaranteed unique: duplicate or
/// out-of-order numbering in the source is preserved as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub number: String,
    pub title: String,
    pub content: String,
    pub full_heading: String,
}

/// A downstream calculator a section's text can be associated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculatorTag {
    Pcr,
    Gibson,
    Restriction,
    Ligation,
    Oligo,
}

impl CalculatorTag {
    pub const ALL: [CalculatorTag; 5] = [
        CalculatorTag::Pcr,
        CalculatorTag::Gibson,
        CalculatorTag::Restriction,
        CalculatorTag::Ligation,
        CalculatorTag::Oligo,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CalculatorTag::Pcr => "pcr",
            CalculatorTag::Gibson => "gibson",
            CalculatorTag::Restriction => "restriction",
            CalculatorTag::Ligation => "ligation",
            CalculatorTag::Oligo => "oligo",
        }
    }

    /// Keyword list for this tag. "annealing" appears under both `pcr` and
    /// `oligo`: a section mentioning annealing without other cues maps to both.
    fn keywords(self) -> &'static [&'static str] {
        match self {
            CalculatorTag::Pcr => &["pcr", "primer", "annealing", "thermocycler", "amplification"],
            CalculatorTag::Gibson => &["gibson", "assembly", "fragment"],
            CalculatorTag::Restriction => &["restriction", "digest", "cut"],
            CalculatorTag::Ligation => &["ligation", "ligate", "insert", "vector", "clone"],
            CalculatorTag::Oligo => &["oligo", "annealing", "oligonucleotide"],
        }
    }
}

impl fmt::Display for CalculatorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scan text for candidate numbered headings, in text order.
///
/// Matches are anchored at line start: an optional literal "Section" prefix
/// (case-insensitive), a dotted sequence of integers, a `.`/`:`/whitespace
/// separator, and the rest of the line as the raw title. No classification
/// or deduplication happens here.
pub fn detect_headings(text: &str) -> Vec<HeadingCandidate> {
    let pattern = Regex::new(r"(?mi)^(?:Section\s+)?(\d+(?:\.\d+)*)[.:\s]\s*(.+)$").unwrap();

    pattern
        .captures_iter(text)
        .map(|caps| {
            let whole = caps.get(0).unwrap();
            HeadingCandidate {
                number: caps[1].to_string(),
                title: caps[2].trim().to_string(),
                start: whole.start(),
                end: whole.end(),
            }
        })
        .collect()
}

/// Filter candidates down to true section boundaries, order-preserving.
///
/// A candidate survives if its title is mostly uppercase, or if it is a
/// top-level number (no dot) with a title long enough to be a real heading.
/// This suppresses inline numeric mentions like "2.5 mL of buffer" while
/// keeping short Title Case headings such as "3. Quality control steps".
pub fn classify_headings(candidates: Vec<HeadingCandidate>) -> Vec<HeadingCandidate> {
    candidates
        .into_iter()
        .filter(is_section_boundary)
        .collect()
}

fn is_section_boundary(candidate: &HeadingCandidate) -> bool {
    let title_len = candidate.title.chars().count();
    let non_space = candidate.title.chars().filter(|&c| c != ' ').count();
    let uppercase = candidate.title.chars().filter(|c| c.is_uppercase()).count();
    let uppercase_ratio = uppercase as f64 / non_space.max(1) as f64;

    let is_all_caps = uppercase_ratio > 0.7 && title_len > 5;
    let is_top_level = !candidate.number.contains('.');

    is_all_caps || (is_top_level && title_len > 10)
}

/// Slice text into sections delimited by the classified boundaries.
///
/// Content spans from the end of each boundary's heading line to the start
/// of the next boundary (end of text for the last one). Runs of blank lines
/// collapse to a single blank line; everything else passes through verbatim.
pub fn build_sections(text: &str, boundaries: &[HeadingCandidate]) -> Vec<Section> {
    let blank_runs = Regex::new(r"\n\s*\n\s*\n+").unwrap();

    boundaries
        .iter()
        .enumerate()
        .map(|(i, boundary)| {
            let content_end = boundaries
                .get(i + 1)
                .map(|next| next.start)
                .unwrap_or(text.len());
            let raw = &text[boundary.end..content_end];
            let content = blank_runs.replace_all(raw, "\n\n").trim().to_string();

            Section {
                number: boundary.number.clone(),
                title: boundary.title.clone(),
                content,
                full_heading: format!("{}. {}", boundary.number, boundary.title),
            }
        })
        .collect()
}

/// Full extraction pipeline: detect, classify, build.
///
/// Deterministic: the same text always yields byte-for-byte identical
/// sections, in source order.
pub fn parse_sections(text: &str) -> Vec<Section> {
    let boundaries = classify_headings(detect_headings(text));
    build_sections(text, &boundaries)
}

/// Point lookup by section number.
///
/// Returns the first section whose number string-equals the query. No
/// numeric normalization: "2.10" and "2.1" are distinct, "02" is not "2".
pub fn find_section<'a>(sections: &'a [Section], number: &str) -> Option<&'a Section> {
    sections.iter().find(|section| section.number == number)
}

/// Case-insensitive literal substring test over a section's title and
/// content. `query_lower` must already be lowercased by the caller.
pub fn matches_query(section: &Section, query_lower: &str) -> bool {
    section.title.to_lowercase().contains(query_lower)
        || section.content.to_lowercase().contains(query_lower)
}

/// Map a section's text to the calculators it is relevant for.
///
/// Tags come back in discovery order with no duplicates; a tag is included
/// when any of its keywords appears in the lowercased title + content.
pub fn map_calculators(title: &str, content: &str) -> Vec<CalculatorTag> {
    let text = format!("{title} {content}").to_lowercase();

    CalculatorTag::ALL
        .into_iter()
        .filter(|tag| tag.keywords().iter().any(|keyword| text.contains(keyword)))
        .collect()
}
