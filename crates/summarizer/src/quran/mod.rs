// Quran.com v4 API client: juz verse ranges, Uthmani text, per-verse tafsir

use crate::TafsirSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use daily_juz_core::config::TafsirSettings;
use daily_juz_core::{JuzNumber, TafsirEntry};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Verse keys per Uthmani text request, keeps URLs short
const UTHMANI_BATCH: usize = 50;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct QuranClient {
    client: reqwest::Client,
    api_base: String,
    resource_id: u32,
}

#[derive(Debug, Deserialize)]
struct JuzsResponse {
    #[serde(default)]
    juzs: Vec<JuzInfo>,
}

#[derive(Debug, Deserialize)]
struct JuzInfo {
    juz_number: u8,
    /// Surah number -> verse range, e.g. `{"2": "142-252"}`
    verse_mapping: BTreeMap<u32, String>,
}

#[derive(Debug, Deserialize)]
struct VersesResponse {
    #[serde(default)]
    verses: Vec<UthmaniVerse>,
}

#[derive(Debug, Deserialize)]
struct UthmaniVerse {
    verse_key: String,
    #[serde(default)]
    text_uthmani: String,
}

#[derive(Debug, Deserialize)]
struct TafsirResponse {
    #[serde(default)]
    tafsir: TafsirBody,
}

#[derive(Debug, Default, Deserialize)]
struct TafsirBody {
    #[serde(default)]
    text: String,
}

impl QuranClient {
    pub fn new(settings: &TafsirSettings) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_base: settings.api_base.clone(),
            resource_id: settings.resource_id,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{}", self.api_base, path);
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?
            .error_for_status()
            .with_context(|| format!("Quran.com API returned an error for {}", url))?;
        response
            .json()
            .await
            .with_context(|| format!("Malformed response from {}", url))
    }

    /// All verse keys (`surah:verse`) in a juz, in reading order
    pub async fn juz_verse_keys(&self, juz: JuzNumber) -> Result<Vec<String>> {
        let response: JuzsResponse = self.get_json("/juzs", &[]).await?;
        let info = response
            .juzs
            .into_iter()
            .find(|j| j.juz_number == juz.get())
            .with_context(|| format!("Juz {} not found in /juzs response", juz))?;
        expand_verse_mapping(&info.verse_mapping)
    }

    /// Uthmani script keyed by verse key
    pub async fn uthmani_text(&self, verse_keys: &[String]) -> Result<HashMap<String, String>> {
        let mut uthmani = HashMap::with_capacity(verse_keys.len());
        for batch in verse_keys.chunks(UTHMANI_BATCH) {
            let keys = batch.join(",");
            let response: VersesResponse = self
                .get_json("/quran/verses/uthmani", &[("verse_key", keys.as_str())])
                .await?;
            for verse in response.verses {
                uthmani.insert(verse.verse_key, verse.text_uthmani);
            }
        }
        Ok(uthmani)
    }

    /// Tafsir HTML for a single verse
    pub async fn verse_tafsir(&self, verse_key: &str) -> Result<String> {
        let path = format!("/tafsirs/{}/by_ayah/{}", self.resource_id, verse_key);
        let response: TafsirResponse = self.get_json(&path, &[]).await?;
        Ok(response.tafsir.text)
    }
}

#[async_trait]
impl TafsirSource for QuranClient {
    async fn fetch_tafsir(&self, juz: JuzNumber) -> Result<Vec<TafsirEntry>> {
        let verse_keys = self.juz_verse_keys(juz).await?;
        tracing::info!(juz = juz.get(), verses = verse_keys.len(), "fetching tafsir");

        let mut uthmani = self.uthmani_text(&verse_keys).await?;

        let mut entries = Vec::with_capacity(verse_keys.len());
        for verse_key in verse_keys {
            let text = self.verse_tafsir(&verse_key).await?;
            // Ibn Kathir often covers a passage under its first verse only
            if text.trim().is_empty() {
                continue;
            }
            let uthmani = uthmani.remove(&verse_key).unwrap_or_default();
            entries.push(TafsirEntry {
                verse_key,
                text,
                uthmani,
            });
        }
        Ok(entries)
    }
}

/// Expand `{"2": "142-252"}` style ranges into individual verse keys
fn expand_verse_mapping(mapping: &BTreeMap<u32, String>) -> Result<Vec<String>> {
    let mut keys = Vec::new();
    for (surah, range) in mapping {
        let (start, end) = match range.split_once('-') {
            Some((start, end)) => (start.trim(), end.trim()),
            None => (range.trim(), range.trim()),
        };
        let start: u32 = start
            .parse()
            .with_context(|| format!("Invalid verse range '{}' for surah {}", range, surah))?;
        let end: u32 = end
            .parse()
            .with_context(|| format!("Invalid verse range '{}' for surah {}", range, surah))?;
        if start == 0 || end < start {
            anyhow::bail!("Invalid verse range '{}' for surah {}", range, surah);
        }
        keys.extend((start..=end).map(|verse| format!("{}:{}", surah, verse)));
    }
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(pairs: &[(u32, &str)]) -> BTreeMap<u32, String> {
        pairs.iter().map(|(s, r)| (*s, r.to_string())).collect()
    }

    #[test]
    fn test_expand_single_surah() {
        let keys = expand_verse_mapping(&mapping(&[(78, "1-3")])).unwrap();
        assert_eq!(keys, vec!["78:1", "78:2", "78:3"]);
    }

    #[test]
    fn test_expand_orders_surahs_numerically() {
        let keys = expand_verse_mapping(&mapping(&[(10, "1-1"), (9, "129-129"), (11, "1")])).unwrap();
        assert_eq!(keys, vec!["9:129", "10:1", "11:1"]);
    }

    #[test]
    fn test_expand_rejects_bad_ranges() {
        assert!(expand_verse_mapping(&mapping(&[(2, "abc")])).is_err());
        assert!(expand_verse_mapping(&mapping(&[(2, "10-5")])).is_err());
        assert!(expand_verse_mapping(&mapping(&[(2, "0-5")])).is_err());
    }

    #[test]
    fn test_parse_juzs_response() {
        let json = r#"{
            "juzs": [
                { "id": 1, "juz_number": 1, "verse_mapping": { "1": "1-7", "2": "1-141" } },
                { "id": 2, "juz_number": 2, "verse_mapping": { "2": "142-252" } }
            ]
        }"#;
        let response: JuzsResponse = serde_json::from_str(json).unwrap();
        let first = &response.juzs[0];
        let keys = expand_verse_mapping(&first.verse_mapping).unwrap();
        assert_eq!(keys.len(), 148);
        assert_eq!(keys.first().map(String::as_str), Some("1:1"));
        assert_eq!(keys.last().map(String::as_str), Some("2:141"));
    }

    #[test]
    fn test_parse_tafsir_response_tolerates_missing_text() {
        let response: TafsirResponse = serde_json::from_str(r#"{ "tafsir": {} }"#).unwrap();
        assert!(response.tafsir.text.is_empty());

        let response: TafsirResponse =
            serde_json::from_str(r#"{ "tafsir": { "text": "<p>x</p>", "resource_id": 169 } }"#)
                .unwrap();
        assert_eq!(response.tafsir.text, "<p>x</p>");
    }
}
