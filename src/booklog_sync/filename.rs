//! Human-readable, filesystem-safe filenames for new notes.
//!
//! The display template mirrors how Booklog renders a book:
//! `著者『タイトル』（出版社、年）`. Filenames are only generated on the
//! create path — lookups go through the identifier index, never the name.

/// Extension for generated notes.
pub const NOTE_EXT: &str = ".md";

/// Maximum filename length in UTF-8 bytes, extension included.
pub const MAX_FILENAME_BYTES: usize = 200;

/// Stem used when sanitization leaves nothing behind.
const FALLBACK_STEM: &str = "unnamed_book";

/// Derive a note filename from book metadata. The result is non-empty,
/// contains no path separators or vault link syntax, and never exceeds
/// [`MAX_FILENAME_BYTES`], whatever the inputs.
pub fn note_filename(author: &str, title: &str, publisher: &str, publish_year: &str) -> String {
    let display = format!("{author}『{title}』（{publisher}、{publish_year}）");
    let budget = MAX_FILENAME_BYTES - NOTE_EXT.len();

    let mut stem = truncate_to_boundary(&display, budget).to_string();
    stem = sanitize(&stem);
    if stem.is_empty() {
        stem = FALLBACK_STEM.to_string();
    }
    // Replacements are all single ASCII bytes, but stripping may not have
    // brought an over-budget stem back down. Re-check.
    let stem = truncate_to_boundary(&stem, budget);
    format!("{stem}{NOTE_EXT}")
}

/// Cut `s` to at most `max_bytes`, backing up over any trailing partial
/// multi-byte character instead of erroring.
fn truncate_to_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Replace characters that are unsafe in filenames — or that collide with
/// `[[wiki-link]]` syntax — with underscores, then strip leading/trailing
/// spaces and periods.
fn sanitize(stem: &str) -> String {
    let replaced: String = stem
        .chars()
        .map(|c| match c {
            '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '[' | ']' => '_',
            c if (c as u32) < 0x20 => '_',
            c => c,
        })
        .collect();
    replaced.trim_matches([' ', '.']).to_string()
}
