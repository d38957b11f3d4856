//! Parsing of raw quote submissions.
//!
//! A submission is free text with two marker lines:
//!
//! ```text
//! !text
//! the quote, may span lines
//! !source
//! author《work》
//! ```

use std::sync::OnceLock;

use regex::Regex;

use crate::{errors::Error, Result};

const TEXT_MARKERS: [&str; 2] = ["!text", "!文本"];
const SOURCE_MARKERS: [&str; 2] = ["!source", "!出处"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub sentence: String,
    pub source: String,
    pub fingerprint: String,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Text,
    Source,
}

fn marker_section(line: &str) -> Option<Section> {
    let t = line.trim();
    if TEXT_MARKERS.contains(&t) {
        return Some(Section::Text);
    }
    if SOURCE_MARKERS.contains(&t) {
        return Some(Section::Source);
    }
    None
}

/// Split `raw` into the text and source sections and derive the fingerprint.
pub fn parse_submission(raw: &str) -> Result<Submission> {
    let content = raw.replace("\r\n", "\n");

    let mut text: Option<Vec<&str>> = None;
    let mut source: Option<Vec<&str>> = None;
    let mut current: Option<Section> = None;

    for line in content.split('\n') {
        if let Some(section) = marker_section(line) {
            let slot = match section {
                Section::Text => &mut text,
                Section::Source => &mut source,
            };
            if slot.is_some() {
                return Err(Error::MalformedSubmission);
            }
            *slot = Some(Vec::new());
            current = Some(section);
            continue;
        }

        match current {
            Some(Section::Text) => text.get_or_insert_with(Vec::new).push(line),
            Some(Section::Source) => source.get_or_insert_with(Vec::new).push(line),
            None => {}
        }
    }

    let (Some(text), Some(source)) = (text, source) else {
        return Err(Error::MalformedSubmission);
    };

    let sentence = trim_line_breaks(&text.join("\n")).to_string();
    let source = trim_line_breaks(&source.join("\n")).to_string();
    let fingerprint = normalize_sentence(&sentence);
    if fingerprint.is_empty() || source.trim().is_empty() {
        return Err(Error::MalformedSubmission);
    }

    Ok(Submission {
        sentence,
        source,
        fingerprint,
    })
}

/// Strip leading and trailing CR/LF, leaving other whitespace alone.
pub fn trim_line_breaks(s: &str) -> &str {
    s.trim_matches(|c| c == '\n' || c == '\r')
}

/// Canonical form used as the dedup key.
pub fn normalize_sentence(s: &str) -> String {
    static HSPACE: OnceLock<Regex> = OnceLock::new();
    static BLANKS: OnceLock<Regex> = OnceLock::new();
    let hspace = HSPACE.get_or_init(|| Regex::new(r"[ \t]+").expect("valid regex"));
    let blanks = BLANKS.get_or_init(|| Regex::new(r"\n{2,}").expect("valid regex"));

    let unified = s.replace("\r\n", "\n");
    let trimmed = trim_line_breaks(&unified);
    let spaced = hspace.replace_all(trimmed, " ");
    blanks.replace_all(&spaced, "\n").trim().to_string()
}
