use std::borrow::Cow;

use unicode_categories::UnicodeCategories;
use unicode_normalization::UnicodeNormalization;

use crate::config::NormalizeConfig;

/// Normalize `input` for indexing or querying.
///
/// Applies NFKC, lowercasing, and punctuation stripping per `cfg`, then
/// collapses every run of delimiters to a single interior space. Leading and
/// trailing delimiters vanish. An input consisting entirely of delimiters
/// yields the empty string; that is a legal output, not an error.
pub fn normalize(input: &str, cfg: &NormalizeConfig) -> String {
    // NFKC first: it can change which characters exist at all.
    let text: Cow<str> = if cfg.normalize_unicode {
        Cow::Owned(input.nfkc().collect::<String>())
    } else {
        Cow::Borrowed(input)
    };

    let mut out = String::with_capacity(text.len());
    // Delimiters only materialize as a space once a following token
    // character arrives, which trims the edges for free.
    let mut pending_space = false;

    for ch in text.chars() {
        if cfg.lowercase {
            // Lowercasing can expand one char into several.
            for lower in ch.to_lowercase() {
                push_char(lower, cfg, &mut out, &mut pending_space);
            }
        } else {
            push_char(ch, cfg, &mut out, &mut pending_space);
        }
    }

    out
}

fn push_char(ch: char, cfg: &NormalizeConfig, out: &mut String, pending_space: &mut bool) {
    let is_delim = ch.is_whitespace() || (cfg.strip_punctuation && ch.is_punctuation());
    if is_delim {
        if !out.is_empty() {
            *pending_space = true;
        }
    } else {
        if *pending_space {
            out.push(' ');
            *pending_space = false;
        }
        out.push(ch);
    }
}
