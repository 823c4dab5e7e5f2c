//! Paragraph-aligned text chunking.
//!
//! Classifier requests have a size budget. Text is cut at blank lines only,
//! and each segment repeats a few trailing paragraphs of the previous one so
//! an item split across the boundary is still seen whole once.

use std::sync::LazyLock;

use regex::Regex;

static RE_BLANK_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n[ \t\r]*\n").unwrap());

const PARAGRAPH_SEPARATOR: &str = "\n\n";
const SEPARATOR_LEN: usize = 2;

/// One bounded slice of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSegment {
    /// Position in the segment sequence.
    pub index: usize,

    /// Paragraphs joined by blank lines.
    pub text: String,

    /// Leading paragraphs repeated from the previous segment.
    pub overlap: usize,
}

/// Split text into paragraphs, dropping empty ones.
pub fn paragraphs(text: &str) -> Vec<&str> {
    RE_BLANK_LINE
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Split `text` into segments of at most `max_size` characters.
///
/// Paragraphs are never split; a paragraph longer than `max_size` becomes a
/// segment of its own. When a segment is closed, the next one starts with
/// up to `overlap` of its trailing paragraphs, fewer if they would not leave
/// room for the next paragraph.
pub fn segment_text(text: &str, max_size: usize, overlap: usize) -> Vec<TextSegment> {
    let mut segments = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0;
    let mut seeded = 0;

    for para in paragraphs(text) {
        let para_len = para.chars().count();

        if !current.is_empty() && current_len + SEPARATOR_LEN + para_len > max_size {
            segments.push(TextSegment {
                index: segments.len(),
                text: current.join(PARAGRAPH_SEPARATOR),
                overlap: seeded,
            });

            let keep = overlap.min(current.len());
            let mut seed: Vec<&str> = current.split_off(current.len() - keep);
            while !seed.is_empty() && joined_len(&seed) + SEPARATOR_LEN + para_len > max_size {
                seed.remove(0);
            }

            seeded = seed.len();
            current_len = joined_len(&seed);
            current = seed;
        }

        current_len = if current.is_empty() {
            para_len
        } else {
            current_len + SEPARATOR_LEN + para_len
        };
        current.push(para);
    }

    if !current.is_empty() {
        segments.push(TextSegment {
            index: segments.len(),
            text: current.join(PARAGRAPH_SEPARATOR),
            overlap: seeded,
        });
    }

    segments
}

/// [`segment_text`] without the bookkeeping.
pub fn chunk_text(text: &str, max_size: usize, overlap: usize) -> Vec<String> {
    segment_text(text, max_size, overlap)
        .into_iter()
        .map(|s| s.text)
        .collect()
}

fn joined_len(paras: &[&str]) -> usize {
    if paras.is_empty() {
        return 0;
    }
    paras.iter().map(|p| p.chars().count()).sum::<usize>() + SEPARATOR_LEN * (paras.len() - 1)
}
