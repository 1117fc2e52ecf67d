use crate::constants::MONTHS_DESC;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Month-name prefixes accepted as input, mapped to the canonical Spanish name.
///
/// Covers Spanish full names and abbreviations (including the legacy "set"
/// abbreviation for septiembre) plus the English names and abbreviations that
/// show up in the source spreadsheets.
const MONTH_PREFIXES: &[(&str, &str)] = &[
    ("ene", "enero"),
    ("jan", "enero"),
    ("feb", "febrero"),
    ("mar", "marzo"),
    ("abr", "abril"),
    ("apr", "abril"),
    ("may", "mayo"),
    ("jun", "junio"),
    ("jul", "julio"),
    ("ago", "agosto"),
    ("aug", "agosto"),
    ("sep", "septiembre"),
    ("set", "septiembre"),
    ("oct", "octubre"),
    ("nov", "noviembre"),
    ("dic", "diciembre"),
    ("dec", "diciembre"),
];

/// Canonicalizes free text for searching and grouping.
///
/// Decomposes to NFD, drops combining diacritical marks, and lowercases the
/// result, so that `"Resolución"` and `"RESOLUCION"` compare equal. Empty
/// input yields an empty string; this never fails.
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Canonicalizes a free-text month into one of the twelve Spanish month names.
///
/// Applies [`normalize`], collapses dots and runs of whitespace, then resolves
/// in order: prefix table, exact canonical name, and finally the normalized
/// text itself. The fallback means callers must treat a non-canonical return
/// value as "unrecognized month", not as an error.
pub fn canon_month(raw: &str) -> String {
    let n = collapse(&normalize(raw));
    for (prefix, canonical) in MONTH_PREFIXES {
        if n.starts_with(prefix) {
            return (*canonical).to_string();
        }
    }
    // Every full canonical name already matches its own prefix above, so
    // whatever is left is an unrecognized month and passes through as-is.
    n
}

/// Rank of a month within the fixed December-to-January display order.
///
/// diciembre ranks 0 and enero ranks 11. Unrecognized months rank 12, one
/// past the table, so under an ascending sort they land after every known
/// month without ever breaking the comparison.
pub fn month_rank(m: &str) -> usize {
    let canon = canon_month(m);
    MONTHS_DESC
        .iter()
        .position(|month| *month == canon)
        .unwrap_or(MONTHS_DESC.len())
}

/// Canonicalizes a month and capitalizes the first letter for display.
pub fn label_month(m: &str) -> String {
    let canon = canon_month(m);
    let mut chars = canon.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => canon,
    }
}

/// Alphabetical bucket for an outlet name: `'A'..='Z'`, or `'#'` for names
/// that are empty or start with anything other than an ASCII letter.
pub fn first_letter_of(name: &str) -> char {
    match name.trim().chars().next() {
        Some(ch) if ch.is_ascii_alphabetic() => ch.to_ascii_uppercase(),
        _ => '#',
    }
}

fn collapse(text: &str) -> String {
    text.replace('.', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
