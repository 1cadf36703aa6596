//! Canned tafsir and summary used by `--local` runs.

use crate::{TafsirSource, TextGenerator};
use anyhow::Result;
use async_trait::async_trait;
use daily_juz_core::{JuzNumber, TafsirEntry};

/// Generator that answers every prompt with [`mock_summary`]
pub struct MockGenerator {
    juz: JuzNumber,
}

impl MockGenerator {
    pub fn new(juz: JuzNumber) -> Self {
        Self { juz }
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(mock_summary(self.juz))
    }
}

/// Source that returns [`mock_tafsir`]
pub struct MockTafsirSource;

#[async_trait]
impl TafsirSource for MockTafsirSource {
    async fn fetch_tafsir(&self, juz: JuzNumber) -> Result<Vec<TafsirEntry>> {
        Ok(mock_tafsir(juz))
    }
}

pub fn mock_tafsir(juz: JuzNumber) -> Vec<TafsirEntry> {
    let entry = |verse: u8, uthmani: &str, text: &str| TafsirEntry {
        verse_key: format!("{}:{}", juz, verse),
        text: text.to_string(),
        uthmani: uthmani.to_string(),
    };

    vec![
        entry(
            1,
            "بِسْمِ ٱللَّهِ ٱلرَّحْمَـٰنِ ٱلرَّحِيمِ",
            "<h2>Commentary on the Opening Verse</h2>\
             <p>Ibn Kathir explains that this verse establishes the foundational \
             theme of the surah. The scholars have noted its significance in \
             understanding the broader context of divine guidance.</p>\
             <p>Al-Tabari and others have reported that this verse was revealed \
             in connection with the events following the migration to Madinah.</p>",
        ),
        entry(
            2,
            "ٱلْحَمْدُ لِلَّهِ رَبِّ ٱلْعَـٰلَمِينَ",
            "<h2>The Command to Reflect</h2>\
             <p>This verse calls upon the believers to reflect deeply on the \
             signs of Allah in creation. Ibn Kathir draws upon multiple hadith \
             to illustrate how the Prophet (peace be upon him) exemplified this \
             quality of contemplation.</p>",
        ),
        entry(
            3,
            "ٱلرَّحْمَـٰنِ ٱلرَّحِيمِ",
            "<h2>Rulings and Guidance</h2>\
             <p>Here the tafsir elaborates on the specific rulings derived from \
             this verse, including matters of worship, social conduct, and the \
             importance of maintaining family ties. The scholars of fiqh have \
             derived several important principles from this passage.</p>",
        ),
    ]
}

pub fn mock_summary(juz: JuzNumber) -> String {
    let n = juz.get();
    format!(
        "## Juz {n}: {name}

This juz covers key themes of **divine guidance**, **reflection on creation**, and **practical rulings** for the Muslim community.

### Major Themes

The opening verse ({n}:1) establishes the foundational message of the surah, connecting the believers to the broader narrative of prophetic history. Ibn Kathir draws upon classical scholarship to illuminate the depth of each verse.

In {n}:2, we find a powerful call to reflect upon the signs of Allah in creation. The scholars have noted how this connects to the broader themes of gratitude and awareness.

### Key Rulings

- Matters of worship and their proper observance ({n}:1)
- Social conduct and the rights of others ({n}:2)
- The importance of maintaining family ties and community bonds ({n}:3)

### Overarching Message

Juz {n} calls upon the believers to combine faith with action, knowledge with practice, and individual devotion with communal responsibility.",
        name = juz.name(),
    )
}
