// Text generation and tafsir sources (Anthropic Messages API, Quran.com v4)

pub mod anthropic;
pub mod chunk;
pub mod mock;
pub mod prompt;
pub mod quran;
pub mod text;

use anyhow::{Context, Result};
use async_trait::async_trait;
use daily_juz_core::{JuzNumber, TafsirEntry};
use std::time::Duration;

/// A service that turns a prompt into text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// A source of per-verse tafsir for a juz
#[async_trait]
pub trait TafsirSource: Send + Sync {
    async fn fetch_tafsir(&self, juz: JuzNumber) -> Result<Vec<TafsirEntry>>;
}

/// Settings for summarising long source text
#[derive(Debug, Clone)]
pub struct SummaryOptions {
    pub chunk_chars: usize,
    pub chunk_delay: Duration,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            chunk_chars: chunk::DEFAULT_CHUNK_CHARS,
            chunk_delay: Duration::ZERO,
        }
    }
}

/// Produce the markdown summary for `juz`.
///
/// Without source text this is a single generation call. With source text
/// that fits in one chunk it is also a single call; longer text is summarised
/// chunk by chunk and the partial summaries merged by a final call.
///
/// There is no retry: the first failed call aborts the whole summary.
pub async fn summarise(
    generator: &dyn TextGenerator,
    juz: JuzNumber,
    source_text: Option<&str>,
    options: &SummaryOptions,
) -> Result<String> {
    let Some(source_text) = source_text else {
        return call(generator, &prompt::overview(juz)).await;
    };

    let chunks = chunk::chunk_text(source_text, options.chunk_chars);
    if chunks.len() <= 1 {
        return call(generator, &prompt::single(juz, source_text)).await;
    }

    tracing::info!(juz = juz.get(), chunks = chunks.len(), "summarising in chunks");

    let total = chunks.len();
    let mut summaries = Vec::with_capacity(total);
    for (i, chunk) in chunks.iter().enumerate() {
        if i > 0 && !options.chunk_delay.is_zero() {
            tracing::debug!(delay_secs = options.chunk_delay.as_secs(), "waiting for rate limit");
            tokio::time::sleep(options.chunk_delay).await;
        }
        let summary = call(generator, &prompt::chunk(juz, chunk))
            .await
            .with_context(|| format!("Failed to summarise chunk {}/{}", i + 1, total))?;
        summaries.push(summary);
    }

    call(generator, &prompt::merge(juz, &summaries))
        .await
        .context("Failed to merge chunk summaries")
}

async fn call(generator: &dyn TextGenerator, prompt: &str) -> Result<String> {
    let text = generator.generate(prompt).await?;
    let text = text.trim();
    if text.is_empty() {
        anyhow::bail!("Text generation returned an empty response");
    }
    Ok(text.to_string())
}
