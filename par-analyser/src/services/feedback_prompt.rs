//! Feedback request builder
//!
//! Re-serializes the parsed pointers of the filtered records into the plain
//! text body sent to the summarization service, together with the fixed
//! system instruction describing the category taxonomy and output shape.

use crate::models::Record;

/// Outer instruction line preceding the per-conduct blocks
pub const REQUEST_PREAMBLE: &str = "Here are the PAR Pointers for several conducts:";

/// Separator line between per-record blocks
pub const BLOCK_SEPARATOR: &str = "---";

/// Fixed system instruction for the summarization service
pub const SYSTEM_PROMPT: &str = "\
You are an AI assistant that helps officers review their conducts using PAR (Post Action Review) entries.

PAR pointers are used to:
- Analyse what went wrong during a conduct
- Reflect on why it happened
- Recommend how to prevent the same mistakes in future

Your task is to analyse the provided PAR pointers, identify key issues, merge duplicates, and categorise each issue as one of:
- \"Conducting Body\": those that organised or oversaw the conduct
- \"Commanders\": auxiliary commanders that helped out with the conduct
- \"Participants\": those that participated in the conduct

For each issue give concise advice on how to improve future conducts and prevent the same mistake.
Do not repeat the pointers back to the user.

Respond with ONLY a JSON array, no prose, where every element is an object with these fields:
- \"category\": one of \"Conducting Body\", \"Commanders\", \"Participants\"
- \"issue\": short description of the issue
- \"recommendation\": how to prevent it in future
- \"frequency\": number of pointers that raised this issue (integer >= 1)
- \"severity\": one of \"High\", \"Medium\", \"Low\"";

/// Build the request body for the filtered records
///
/// Records without any parsable pointer are skipped. Returns an empty
/// string when no record contributes a block.
pub fn build_request<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a Record>,
{
    let blocks: Vec<String> = records.into_iter().filter_map(render_record).collect();

    if blocks.is_empty() {
        return String::new();
    }

    let separator = format!("\n\n{BLOCK_SEPARATOR}\n\n");
    format!("{REQUEST_PREAMBLE}\n\n{}", blocks.join(&separator))
}

/// Render one record's block, or `None` if it has no pointers
fn render_record(record: &Record) -> Option<String> {
    let pointers = record.pointers();
    if pointers.is_empty() {
        return None;
    }

    let rendered: Vec<String> = pointers
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let k = i + 1;
            format!(
                "Observation {k}: {}\nReflection {k}: {}\nRecommendation {k}: {}",
                p.observation, p.reflection, p.recommendation
            )
        })
        .collect();

    Some(format!(
        "Conduct Name: {}\n{}",
        record.conduct_name(),
        rendered.join("\n\n")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_BLOCK: &str = "Observation\nLate\nReflection\nPoor timing\nRecommendation\nStart early";

    #[test]
    fn test_empty_input_builds_empty_body() {
        assert_eq!(build_request(Vec::<&Record>::new()), "");
    }

    #[test]
    fn test_records_without_pointers_are_skipped() {
        let records = vec![
            Record::new("ALPHA", "", "ER", "free text only", ""),
            Record::new("ALPHA", "", "RM", "", ""),
        ];
        assert_eq!(build_request(&records), "");
    }

    #[test]
    fn test_single_record_rendering() {
        let records = vec![Record::new("ALPHA", "", "S&P 2", ONE_BLOCK, "")];
        assert_eq!(
            build_request(&records),
            "Here are the PAR Pointers for several conducts:\n\n\
             Conduct Name: S&P 2\n\
             Observation 1: Late\n\
             Reflection 1: Poor timing\n\
             Recommendation 1: Start early"
        );
    }

    #[test]
    fn test_numbering_restarts_per_record() {
        let two = format!("{ONE_BLOCK}\n{ONE_BLOCK}");
        let records = vec![
            Record::new("ALPHA", "", "S&P", &two, ""),
            Record::new("BRAVO", "", "ER", ONE_BLOCK, ""),
        ];
        let body = build_request(&records);

        assert!(body.contains("Observation 2: Late"));
        let blocks: Vec<&str> = body.split("\n\n---\n\n").collect();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[1].starts_with("Conduct Name: ER\nObservation 1: Late"));
        assert!(!blocks[1].contains("Observation 2"));
    }

    #[test]
    fn test_triples_separated_by_blank_line() {
        let two = format!("{ONE_BLOCK}\n{ONE_BLOCK}");
        let records = vec![Record::new("ALPHA", "", "S&P", &two, "")];
        let body = build_request(&records);
        assert!(body.contains("Recommendation 1: Start early\n\nObservation 2: Late"));
    }

    #[test]
    fn test_system_prompt_names_taxonomy() {
        for needle in ["Conducting Body", "Commanders", "Participants", "\"severity\"", "\"frequency\""] {
            assert!(SYSTEM_PROMPT.contains(needle), "missing {needle}");
        }
    }
}
