//! Section slicing over the bracket-labelled lyrics layout:
//!
//! ```text
//! [Verse 1]
//! Line A
//! [Chorus]
//! Line B
//! ```

use super::error::AttemptError;
use super::models::{Excerpt, SongRecord};
use super::random::{nth_occurrence, RandomSource};

const LABEL_END: &str = "]\n";
const LABEL_START: &str = "\n[";

/// Normalise the lyrics, slice one random section out of them and reject it
/// if it gives the title away.
///
/// The section may come back empty (e.g. no labels at all); emptiness is
/// judged by the caller.
pub fn extract_section(
    mut record: SongRecord,
    rng: &mut impl RandomSource,
) -> Result<Excerpt, AttemptError> {
    record.lyrics = normalize(&record.lyrics);

    let count = count_sections(&record.lyrics);
    let index = rng.int_inclusive(0, count);
    let section = slice_section(&record.lyrics, index).to_string();

    if leaks_title(&section, &record.title) {
        return Err(AttemptError::SpoilerLeak(record.title));
    }

    Ok(Excerpt {
        song: record,
        section,
    })
}

/// Drop the blank line glued between two adjacent labels and the trailing
/// "Embed" marker the lyrics pages append.
pub fn normalize(lyrics: &str) -> String {
    lyrics.replacen("]\n\n[", "", 1).replacen("Embed", "", 1)
}

/// Number of label lines (`]` directly followed by a newline).
pub fn count_sections(lyrics: &str) -> usize {
    lyrics.matches(LABEL_END).count()
}

/// Text between the `index`-th label line and the `index`-th label start.
///
/// Index 0 and out-of-order boundaries yield an empty slice.
pub fn slice_section(lyrics: &str, index: usize) -> &str {
    if index == 0 {
        return "";
    }
    let start = (nth_occurrence(lyrics, LABEL_END, index) + LABEL_END.len()).min(lyrics.len());
    let end = match nth_occurrence(lyrics, LABEL_START, index) {
        pos if pos < lyrics.len() => pos + 1,
        _ => lyrics.len(),
    };
    if end < start {
        return "";
    }
    &lyrics[start..end]
}

fn leaks_title(section: &str, title: &str) -> bool {
    let title = title.trim().to_lowercase();
    !title.is_empty() && section.to_lowercase().contains(&title)
}
