//! Conduct name normalizer
//!
//! Canonicalizes free-text conduct labels so that records from different
//! sheets group together (e.g. "S&P 2", "Strength & Power" and
//! "strength and power (makeup)" all become "STRENGTH AND POWER").
//!
//! Lookup path: trim, strip trailing numbers, strip a trailing
//! parenthetical, strip trailing numbers again, lower-case, exact table
//! lookup. Fallback path (no table hit): strip one trailing number from the
//! *raw* label, trim, upper-case. The fallback deliberately uses the weaker
//! strip so that output matches existing deployments label for label.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Built-in sanitized-label → canonical-label entries
const BUILTIN_ENTRIES: &[(&str, &str)] = &[
    ("s&p", "STRENGTH AND POWER"),
    ("strength & power", "STRENGTH AND POWER"),
    ("strength and power", "STRENGTH AND POWER"),
    ("endurance run", "ENDURANCE RUN"),
    ("er", "ENDURANCE RUN"),
    ("endurance run base", "ENDURANCE RUN"),
    ("endurance run tempo", "ENDURANCE RUN"),
    ("endurance run intervals", "ENDURANCE RUN"),
    ("distance intervals", "DISTANCE INTERVAL"),
    ("distance interval", "DISTANCE INTERVAL"),
    ("di", "DISTANCE INTERVAL"),
    ("acfc", "ARMY COMBAT FITNESS CHECK"),
    ("army combat fitness check", "ARMY COMBAT FITNESS CHECK"),
    ("acct", "ACCT"),
    ("sports & games", "SPORTS AND GAMES"),
    ("sports and games", "SPORTS AND GAMES"),
    ("rm", "ROUTE MARCH"),
    ("route march", "ROUTE MARCH"),
    ("mc", "METABOLIC CIRCUIT"),
    ("metabolic circuit", "METABOLIC CIRCUIT"),
    ("metabolic circuits", "METABOLIC CIRCUIT"),
];

static BUILTIN_TABLE: Lazy<NormalizationTable> = Lazy::new(NormalizationTable::builtin);

/// Mapping from sanitized (lower-case) label to canonical display label
///
/// Exact-match only; entries can be added but never removed.
#[derive(Debug, Clone, Default)]
pub struct NormalizationTable {
    entries: HashMap<String, String>,
}

impl NormalizationTable {
    /// Table with the built-in conduct vocabulary
    pub fn builtin() -> Self {
        let mut table = Self::default();
        for (key, value) in BUILTIN_ENTRIES {
            table.insert(key, value);
        }
        table
    }

    /// Add an entry; the key is matched against the sanitized label
    pub fn insert(&mut self, sanitized: &str, canonical: &str) {
        self.entries
            .insert(sanitized.to_lowercase(), canonical.to_string());
    }

    pub fn lookup(&self, sanitized: &str) -> Option<&str> {
        self.entries.get(sanitized).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Normalize a raw conduct label against the built-in table
pub fn normalize(raw: &str) -> String {
    normalize_with(&BUILTIN_TABLE, raw)
}

/// Normalize a raw conduct label against a given table
///
/// Total: every input yields a label.
pub fn normalize_with(table: &NormalizationTable, raw: &str) -> String {
    let key = sanitize(raw);
    if let Some(canonical) = table.lookup(&key) {
        return canonical.to_string();
    }

    strip_one_trailing_number(raw).trim().to_uppercase()
}

/// Lookup key for a raw label
pub fn sanitize(raw: &str) -> String {
    let stripped = strip_trailing_numbers(raw.trim());
    let stripped = strip_trailing_parenthetical(stripped);
    strip_trailing_numbers(stripped).trim().to_lowercase()
}

/// Split off a trailing `<whitespace><digits>` token, if present
fn split_number_token(s: &str) -> Option<&str> {
    let digits_start = s.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    if digits_start == s.len() {
        return None;
    }
    let head = &s[..digits_start];
    let ws = head.chars().next_back().filter(|c| c.is_whitespace())?;
    Some(&head[..head.len() - ws.len_utf8()])
}

/// Remove a trailing run of whitespace-separated integers ("... 3 4")
fn strip_trailing_numbers(s: &str) -> &str {
    let mut current = s;
    while let Some(rest) = split_number_token(current) {
        current = rest;
    }
    current
}

/// Remove exactly one trailing whitespace-separated integer
fn strip_one_trailing_number(s: &str) -> &str {
    split_number_token(s).unwrap_or(s)
}

/// Remove a trailing "(...)" annotation and one whitespace before it
///
/// The annotation starts at the first "(" on the last line, so
/// "a (b) c (d)" loses everything from " (b)".
fn strip_trailing_parenthetical(s: &str) -> &str {
    if !s.ends_with(')') {
        return s;
    }
    let line_start = s.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let Some(offset) = s[line_start..].find('(') else {
        return s;
    };
    let open = line_start + offset;
    let head = &s[..open];
    match head.chars().next_back() {
        Some(c) if c.is_whitespace() => &head[..head.len() - c.len_utf8()],
        _ => head,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbreviation_with_trailing_number() {
        assert_eq!(normalize("S&P 2"), "STRENGTH AND POWER");
    }

    #[test]
    fn test_ampersand_variant() {
        assert_eq!(normalize("Strength & Power"), "STRENGTH AND POWER");
    }

    #[test]
    fn test_parenthetical_stripped() {
        assert_eq!(normalize("strength and power (makeup)"), "STRENGTH AND POWER");
    }

    #[test]
    fn test_number_masked_by_parenthetical() {
        assert_eq!(normalize("ER (makeup) 2"), "ENDURANCE RUN");
        assert_eq!(normalize("Route March 4 (Company) "), "ROUTE MARCH");
    }

    #[test]
    fn test_multiple_trailing_numbers() {
        assert_eq!(normalize("  Metabolic Circuits 3 4 "), "METABOLIC CIRCUIT");
    }

    #[test]
    fn test_unknown_label_falls_back_to_upper_case() {
        assert_eq!(normalize("Obstacle Course 3"), "OBSTACLE COURSE");
    }

    #[test]
    fn test_fallback_strips_only_one_number() {
        // Lookup misses, so the weaker raw strip applies
        assert_eq!(normalize("Obstacle Course 3 4"), "OBSTACLE COURSE 3");
    }

    #[test]
    fn test_fallback_keeps_parenthetical() {
        assert_eq!(normalize("Obstacle Course (wet)"), "OBSTACLE COURSE (WET)");
    }

    #[test]
    fn test_fallback_uses_untrimmed_raw() {
        // Trailing whitespace hides the number from the raw strip
        assert_eq!(normalize("Obstacle Course 3 "), "OBSTACLE COURSE 3");
    }

    #[test]
    fn test_digits_attached_to_word_kept() {
        assert_eq!(normalize("Phase2"), "PHASE2");
        assert_eq!(normalize("2.4km run"), "2.4KM RUN");
    }

    #[test]
    fn test_empty_label() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_canonical_output_is_stable() {
        for raw in ["S&P 2", "di", "RM 3", "sports & games (rain)"] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "unstable for {raw}");
        }
    }

    #[test]
    fn test_sanitize_steps() {
        assert_eq!(sanitize(" Distance Intervals 2 (makeup) 3 "), "distance intervals");
        assert_eq!(sanitize("(makeup)"), "");
        assert_eq!(sanitize("a (b) c (d)"), "a");
    }

    #[test]
    fn test_parenthetical_on_last_line_only() {
        assert_eq!(strip_trailing_parenthetical("x (y\nz (w)"), "x (y\nz");
    }

    #[test]
    fn test_custom_table_entry() {
        let mut table = NormalizationTable::builtin();
        table.insert("Obstacle Course", "OBSTACLE COURSE");
        assert_eq!(normalize_with(&table, "obstacle course 3 4"), "OBSTACLE COURSE");
        assert_eq!(table.len(), BUILTIN_ENTRIES.len() + 1);
    }

    #[test]
    fn test_empty_table_always_falls_back() {
        let table = NormalizationTable::default();
        assert!(table.is_empty());
        assert_eq!(normalize_with(&table, "S&P 2"), "S&P");
    }
}
