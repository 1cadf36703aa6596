//! Prompt templates for the tafsir summaries.

use daily_juz_core::JuzNumber;

const AUDIENCE_GUIDELINES: &str = "\
- Opens with which surahs/verses this juz covers
- Highlights the major themes, stories, and lessons
- Notes any key rulings or guidance mentioned
- References specific verses using the format surah:verse (e.g. 5:82, 6:1) when discussing key points, so readers can look them up
- Closes with the overarching message of the juz
- Is written in clear, accessible English";

/// Prompt used when no source text was fetched: the model works from the juz identity alone
pub fn overview(juz: JuzNumber) -> String {
    format!(
        "You are summarising Juz {n} ({name}, {name_ar}) of the Quran's Tafsir Ibn Kathir for a Muslim audience.\n\
         The juz begins at verse {first}.\n\n\
         Write a detailed overview summary in markdown that:\n\
         {guidelines}\n\
         - Is around 400-600 words",
        n = juz,
        name = juz.name(),
        name_ar = juz.name_ar(),
        first = juz.first_verse(),
        guidelines = AUDIENCE_GUIDELINES,
    )
}

/// Prompt for source text that fits in one call
pub fn single(juz: JuzNumber, source_text: &str) -> String {
    format!(
        "You are summarising Juz {n} of the Quran's Tafsir Ibn Kathir for a Muslim audience.\n\n\
         Write a detailed overview summary in markdown that:\n\
         {guidelines}\n\
         - Is around 400-600 words\n\n\
         Here is the full tafsir text:\n\n\
         {source_text}",
        n = juz,
        guidelines = AUDIENCE_GUIDELINES,
    )
}

/// Prompt for one section of a juz that was split into chunks
pub fn chunk(juz: JuzNumber, chunk_text: &str) -> String {
    format!(
        "Summarise this section of Tafsir Ibn Kathir from Juz {juz}.\n\
         Cover the key themes, stories, rulings, and lessons. Be thorough, as this will be merged with other section summaries.\n\
         Write 200-300 words.\n\n\
         {chunk_text}"
    )
}

/// Prompt that merges the per-chunk summaries into the final one
pub fn merge(juz: JuzNumber, summaries: &[String]) -> String {
    let sections = summaries
        .iter()
        .enumerate()
        .map(|(i, s)| format!("Section {}:\n{}", i + 1, s))
        .collect::<Vec<_>>()
        .join("\n\n---\n\n");

    format!(
        "You are writing the final summary for Juz {n} of the Quran's Tafsir Ibn Kathir, for a Muslim audience.\n\n\
         Below are summaries of each section of the juz. Merge them into one cohesive markdown summary that:\n\
         {guidelines}\n\
         - Is around 500-700 words\n\
         - Flows naturally as one piece (not a list of sections)\n\n\
         Section summaries:\n\n\
         {sections}",
        n = juz,
        guidelines = AUDIENCE_GUIDELINES,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn juz(n: u8) -> JuzNumber {
        JuzNumber::new(n).unwrap()
    }

    #[test]
    fn test_overview_names_the_juz() {
        let prompt = overview(juz(30));
        assert!(prompt.contains("Juz 30"));
        assert!(prompt.contains("Amma Yatasa'aloon"));
        assert!(prompt.contains("78:1"));
        assert!(prompt.contains("surah:verse"));
    }

    #[test]
    fn test_single_embeds_source() {
        let prompt = single(juz(2), "[2:142]\nThe foolish will say");
        assert!(prompt.contains("Juz 2"));
        assert!(prompt.ends_with("[2:142]\nThe foolish will say"));
    }

    #[test]
    fn test_merge_numbers_sections() {
        let prompt = merge(juz(5), &["first".to_string(), "second".to_string()]);
        assert!(prompt.contains("Section 1:\nfirst\n\n---\n\nSection 2:\nsecond"));
        assert!(prompt.contains("500-700 words"));
    }
}
