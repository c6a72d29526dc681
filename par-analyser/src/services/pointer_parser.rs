//! PAR pointer parser
//!
//! Recovers Observation/Reflection/Recommendation triples from the free-text
//! "Pointers" column. The text is expected in six-line blocks:
//!
//! ```text
//! Observation 1
//! <observation body>
//! Reflection 1
//! <reflection body>
//! Recommendation 1
//! <recommendation body>
//! ```
//!
//! Labels are checked by prefix only and bodies are taken by position.
//! Malformed blocks are skipped, never reported.

use crate::models::PointerTriple;

const OBSERVATION_PREFIX: &str = "Observation";
const REFLECTION_PREFIX: &str = "Reflection";
const RECOMMENDATION_PREFIX: &str = "Recommendation";

/// Lines consumed by one well-formed block
const BLOCK_LINES: usize = 6;

/// Parse a pointers blob into triples, in order of appearance
///
/// Total: empty or unstructured input yields an empty vector.
pub fn parse(raw: &str) -> Vec<PointerTriple> {
    let lines: Vec<&str> = raw
        .split(&['\r', '\n'][..])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let line_at = |i: usize| lines.get(i).copied().unwrap_or("");

    let mut triples = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        if lines[i].starts_with(OBSERVATION_PREFIX)
            && line_at(i + 2).starts_with(REFLECTION_PREFIX)
            && line_at(i + 4).starts_with(RECOMMENDATION_PREFIX)
        {
            triples.push(PointerTriple::new(
                line_at(i + 1),
                line_at(i + 3),
                line_at(i + 5),
            ));
            i += BLOCK_LINES;
        } else {
            i += 1;
        }
    }

    triples
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n   \r\n").is_empty());
    }

    #[test]
    fn test_single_block() {
        let triples = parse("Observation\nA\nReflection\nB\nRecommendation\nC");
        assert_eq!(triples, vec![PointerTriple::new("A", "B", "C")]);
    }

    #[test]
    fn test_numbered_labels_and_crlf() {
        let text = "Observation 1:\r\n  Late start \r\n\r\nReflection 1:\r\nPoor timing\r\nRecommendation 1:\r\nArrive early\r\n";
        let triples = parse(text);
        assert_eq!(
            triples,
            vec![PointerTriple::new("Late start", "Poor timing", "Arrive early")]
        );
    }

    #[test]
    fn test_bare_carriage_returns() {
        let triples = parse("Observation\rA\rReflection\rB\rRecommendation\rC");
        assert_eq!(triples, vec![PointerTriple::new("A", "B", "C")]);
    }

    #[test]
    fn test_multiple_blocks_in_order() {
        let text = "Observation 1\nA1\nReflection 1\nB1\nRecommendation 1\nC1\n\
                    Observation 2\nA2\nReflection 2\nB2\nRecommendation 2\nC2";
        let triples = parse(text);
        assert_eq!(triples.len(), 2);
        assert_eq!(triples[0].observation, "A1");
        assert_eq!(triples[1].recommendation, "C2");
    }

    #[test]
    fn test_missing_reflection_yields_nothing() {
        let triples = parse("Observation\nA\nNotes\nB\nRecommendation\nC");
        assert!(triples.is_empty());
    }

    #[test]
    fn test_missing_recommendation_yields_nothing() {
        let triples = parse("Observation\nA\nReflection\nB\nSummary\nC");
        assert!(triples.is_empty());
    }

    #[test]
    fn test_noise_before_valid_block() {
        let text = "Observation\nbroken\nObservation\nA\nReflection\nB\nRecommendation\nC";
        let triples = parse(text);
        assert_eq!(triples, vec![PointerTriple::new("A", "B", "C")]);
    }

    #[test]
    fn test_truncated_block_uses_empty_body() {
        let triples = parse("Observation\nA\nReflection\nB\nRecommendation");
        assert_eq!(triples, vec![PointerTriple::new("A", "B", "")]);
    }

    #[test]
    fn test_labels_are_positional() {
        // The body line itself may look like a label
        let triples = parse("Observation\nReflection\nReflection\nx\nRecommendation\ny");
        assert_eq!(triples, vec![PointerTriple::new("Reflection", "x", "y")]);
    }

    #[test]
    fn test_prefix_is_case_sensitive() {
        assert!(parse("observation\nA\nreflection\nB\nrecommendation\nC").is_empty());
    }
}
