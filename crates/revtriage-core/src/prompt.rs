//! Prompt construction for the revision-pair classifier. The template has
//! two positional insertion points, filled row by row from the two
//! designated text columns; output order matches row order so predictions
//! can be reattached index-for-index.

use polars::prelude::*;

use crate::errors::{Result, TriageError};

/// Columns holding the revision pair unless a caller selects others.
pub const DEFAULT_PROMPT_COLUMNS: [&str; 2] = ["before_revision", "after_revision"];

pub const SYSTEM_PROMPT: &str = "You are an expert language model tasked with evaluating text revisions for coherence, grammar, and logical structure. Your goal is to help filter out nonsensical or confusing text, while retaining useful examples that can be used for further analysis.";

pub const CLASSIFY_PROMPT: &str = r#"
You are tasked with analyzing text revisions from various sources (e.g., Wikipedia, Wikinews, and arXiv) and classifying them as either "good" or "bad" based on the following guidelines:

1. **Good Example**:
   - The text is coherent, grammatically correct, and easy to understand.
   - It flows logically, even if there are minor typos or small issues with punctuation or typos.

2. **Bad Example**:
   - The text is nonsensical or ungrammatical to the point where it’s hard to understand for human readers.
   - There are missing words, wrong spacing, or fragmented sentences that confuse the meaning.
   - The revised version of the text degrades the quality of the original text in a significant way that even proficient readers would struggle to understand the meaning.
   - The text is a clear artifact from Wikipedia or Wikinews. Such an artifact could be a list of references or categories. Another type of artifacts a captions of images.

For each pair of revisions (before and after), classify the pair as follows:

- **good**: The text is coherent and makes sense, even if there are imperfections.
- **bad**: The text is too disjointed, confusing, or nonsensical to be useful in further experiments.

Here is an example revision pair:

- **Before**: "The space betweend the planets is vast. Th distance can be million miles."
- **After**: "The space between the planets is vast. The distance can be millions of miles."

In this case, this would be classified as "good" because the revised version corrects errors and makes sense, even though the original had minor issues.

Another example:

- **Before**: "In space, no sounds can heard. Because thers no aire for the sound waves."
- **After**: "In space no heard, because no sound. Sound waves."

This would be classified as "bad" because the text after the revision is incoherent and hard to understand.

Another example:

- **Before**: "In at , , defeated the Netherlands to win the , and was defeated by the Netherlands in the ."
- **After**: "on Sundayon SaturdayIn at , , defeated the Netherlands to win the , and was defeated by the Netherlands in the ."

This would be classified as "bad" because the text after the revision is nonsensical.

Another example:

- **Before**: bad,"Yesterday, football club (BVB) sacked manager ."
- **After**: "File photo of Peter Stöger in 2011Yesterday, football club (BVB) sacked manager ."

This would be classified as "bad" because the text after the revision is an artifact from Wikipedia or Wikinews (Photo details).

Another example:

- **Before**: "Due to lack of playing time , he moved to Portuguese club ."
- **After**: "With limited playing time with Barcelona , he moved to Portuguese club ."

This example would be classified as "good" because both versions of the text are coherent and make sense. Also, there are no weird artifacts from Wikipedia or Wikinews.

Another example:

- **Before**: "(GEO New GO GO GO ------C.J !"
- **After**: "(GEO News) GO GO GO ------C.J !"

This example would be classified as "bad" because both versions of the text are just nonsensical.


Classify the following text pairs and think step by step about the quality of the text and remember the guidelines above:

**Before**: {}
**After**: {}
"#;

/// Builds one prompt per row by substituting the two selected columns into
/// `template`, in the order the columns were given. A zero-row table yields
/// an empty vector; a missing column propagates the underlying error.
pub fn build_prompts(df: &DataFrame, columns: &[&str], template: &str) -> Result<Vec<String>> {
    if columns.len() != 2 {
        return Err(TriageError::InvalidColumnSelection(columns.len()));
    }
    let before = string_values(df, columns[0])?;
    let after = string_values(df, columns[1])?;

    Ok(before
        .iter()
        .zip(after.iter())
        .map(|(b, a)| fill_template(template, b, a))
        .collect())
}

fn string_values(df: &DataFrame, column: &str) -> Result<Vec<String>> {
    let series = df.column(column)?.cast(&DataType::String)?;
    let ca = series.str()?;
    Ok(ca
        .into_iter()
        .map(|value| value.unwrap_or_default().to_string())
        .collect())
}

/// Substitutes `before` and `after` into the template's two `{}` slots.
/// Substituted values are never re-scanned for placeholders.
fn fill_template(template: &str, before: &str, after: &str) -> String {
    let mut parts = template.splitn(3, "{}");
    let mut out = String::with_capacity(template.len() + before.len() + after.len());
    out.push_str(parts.next().unwrap_or_default());
    out.push_str(before);
    out.push_str(parts.next().unwrap_or_default());
    out.push_str(after);
    out.push_str(parts.next().unwrap_or_default());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "Before: '{}'. After: '{}'.";

    fn revision_frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new(
                "col_before",
                &["This is the old text", "Here is the previous version"],
            ),
            Series::new(
                "col_after",
                &["This is the new text", "Here is the updated version"],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn builds_one_prompt_per_row_in_order() {
        let df = revision_frame();
        let prompts = build_prompts(&df, &["col_before", "col_after"], TEMPLATE).unwrap();
        assert_eq!(
            prompts,
            vec![
                "Before: 'This is the old text'. After: 'This is the new text'.",
                "Before: 'Here is the previous version'. After: 'Here is the updated version'.",
            ]
        );
    }

    #[test]
    fn column_order_drives_substitution_order() {
        let df = revision_frame();
        let prompts = build_prompts(&df, &["col_after", "col_before"], TEMPLATE).unwrap();
        assert_eq!(
            prompts[0],
            "Before: 'This is the new text'. After: 'This is the old text'."
        );
    }

    #[test]
    fn wrong_cardinality_is_rejected() {
        let df = revision_frame();
        let err = build_prompts(&df, &["col_before"], TEMPLATE).unwrap_err();
        assert!(matches!(err, TriageError::InvalidColumnSelection(1)));

        let err =
            build_prompts(&df, &["col_before", "col_after", "col_before"], TEMPLATE).unwrap_err();
        assert!(matches!(err, TriageError::InvalidColumnSelection(3)));
    }

    #[test]
    fn empty_table_yields_empty_prompts() {
        let df = DataFrame::new(vec![
            Series::new("col_before", Vec::<String>::new()),
            Series::new("col_after", Vec::<String>::new()),
        ])
        .unwrap();
        let prompts = build_prompts(&df, &["col_before", "col_after"], TEMPLATE).unwrap();
        assert!(prompts.is_empty());
    }

    #[test]
    fn missing_column_fails_loudly() {
        let df = revision_frame();
        let err = build_prompts(&df, &["col_before", "no_such_column"], TEMPLATE).unwrap_err();
        assert!(matches!(err, TriageError::Polars(_)));
    }

    #[test]
    fn numeric_columns_are_stringified() {
        let df = DataFrame::new(vec![
            Series::new("col_before", &[1i64, 2]),
            Series::new("col_after", &["one", "two"]),
        ])
        .unwrap();
        let prompts = build_prompts(&df, &["col_before", "col_after"], TEMPLATE).unwrap();
        assert_eq!(prompts[0], "Before: '1'. After: 'one'.");
    }

    #[test]
    fn classify_template_has_two_slots() {
        assert_eq!(CLASSIFY_PROMPT.matches("{}").count(), 2);
        let filled = fill_template(CLASSIFY_PROMPT, "old text", "new text");
        assert!(filled.contains("**Before**: old text"));
        assert!(filled.contains("**After**: new text"));
    }
}
