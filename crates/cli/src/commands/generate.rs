use super::{SelectionArgs, load_config};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use daily_juz_core::config::resolve_api_key;
use daily_juz_core::manifest::{Manifest, ManifestEntry};
use daily_juz_core::{JuzNumber, Selection, format_thousands, word_count};
use daily_juz_generator::{PageContext, PublishedSite, SiteWriter, render_index_page, render_juz_page};
use daily_juz_summarizer::anthropic::AnthropicClient;
use daily_juz_summarizer::mock::{MockGenerator, MockTafsirSource};
use daily_juz_summarizer::quran::QuranClient;
use daily_juz_summarizer::text::build_plain_text;
use daily_juz_summarizer::{SummaryOptions, TafsirSource, TextGenerator, summarise};
use std::path::PathBuf;

pub struct GenerateArgs {
    pub selection: SelectionArgs,
    pub output: Option<PathBuf>,
    pub local: bool,
    pub with_tafsir: bool,
    pub api_key: Option<String>,
}

/// Resolved inputs for one generation run
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub juz: JuzNumber,
    pub date: NaiveDate,
    pub site_title: String,
    pub output_dir: PathBuf,
    pub summary: SummaryOptions,
}

/// Select the juz, generate its summary and write the site.
///
/// Validation failures (bad override, missing API key) are reported before
/// any network call. Nothing is written unless generation succeeds.
pub async fn run(config_path: Option<PathBuf>, args: GenerateArgs) -> Result<PublishedSite> {
    let mut config = load_config(config_path.as_deref())?;
    if let Some(output) = args.output {
        config.site.output_dir = output;
    }
    if args.with_tafsir {
        config.tafsir.enabled = true;
    }

    let (date, selection) = args.selection.resolve(&config)?;
    let juz = selection.juz();
    tracing::debug!(juz = juz.get(), %date, local = args.local, tafsir = config.tafsir.enabled, "selection resolved");

    println!("📖 Generating tafsir summary for Juz {} ({})", juz, juz.name());
    match selection {
        Selection::Override { .. } => println!("   Juz chosen by override"),
        Selection::Date { date, .. } => println!("   Date: {}", date),
    }

    let plan = RunPlan {
        juz,
        date,
        site_title: config.site.title.clone(),
        output_dir: config.site.output_dir.clone(),
        summary: SummaryOptions {
            chunk_chars: config.tafsir.chunk_chars,
            chunk_delay: config.tafsir.chunk_delay,
        },
    };

    if args.local {
        println!("   [LOCAL MODE] Using mock data, no API calls");
        let generator = MockGenerator::new(juz);
        return execute(&plan, &generator, Some(&MockTafsirSource)).await;
    }

    let api_key = resolve_api_key(args.api_key)?;
    let generator = AnthropicClient::new(&api_key, &config.model)?;
    println!("   Model: {}", generator.model());

    let quran = if config.tafsir.enabled {
        Some(QuranClient::new(&config.tafsir)?)
    } else {
        None
    };
    let source = quran.as_ref().map(|client| client as &dyn TafsirSource);

    execute(&plan, &generator, source).await
}

/// Run the pipeline against the given generator and optional tafsir source
pub async fn execute(
    plan: &RunPlan,
    generator: &dyn TextGenerator,
    source: Option<&dyn TafsirSource>,
) -> Result<PublishedSite> {
    let writer = SiteWriter::new(&plan.output_dir);
    let mut manifest = Manifest::load(&plan.output_dir)
        .with_context(|| format!("Failed to load manifest from {}", plan.output_dir.display()))?;

    let tafsir = match source {
        Some(source) => {
            println!("🌐 Fetching tafsir...");
            let entries = source
                .fetch_tafsir(plan.juz)
                .await
                .with_context(|| format!("Failed to fetch tafsir for Juz {}", plan.juz))?;
            println!("   ✓ Got {} tafsir entries", entries.len());
            entries
        }
        None => Vec::new(),
    };

    let plain_text = if tafsir.is_empty() {
        None
    } else {
        let text = build_plain_text(&tafsir);
        println!("   Total words: {}", format_thousands(word_count(&text)));
        Some(text)
    };

    println!("✍️  Summarising...");
    let summary = summarise(generator, plan.juz, plain_text.as_deref(), &plan.summary)
        .await
        .with_context(|| format!("Failed to generate summary for Juz {}", plan.juz))?;
    println!("   ✓ Summary: {} words", format_thousands(word_count(&summary)));

    let words = plain_text
        .as_deref()
        .map(word_count)
        .unwrap_or_else(|| word_count(&summary));

    let ctx = PageContext {
        site_title: &plan.site_title,
        juz: plan.juz,
        date: plan.date,
        summary: &summary,
        tafsir: &tafsir,
        word_count: words,
    };

    manifest.record(
        plan.juz,
        ManifestEntry {
            date: plan.date,
            word_count: words,
        },
    );

    let juz_html = render_juz_page(&ctx);
    let index_html = render_index_page(&ctx, &manifest);

    println!("📄 Writing pages...");
    let site = writer.publish(plan.juz, &juz_html, &manifest, &index_html)?;

    println!();
    println!("✅ Done!");
    println!("   {}", site.juz_page.display());
    println!("   {}", site.index_page.display());

    Ok(site)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use daily_juz_core::TafsirEntry;
    use std::fs;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tempfile::TempDir;

    struct StubGenerator(&'static str);

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    #[derive(Default)]
    struct FailingGenerator {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            anyhow::bail!("Anthropic API error (529): overloaded_error: Overloaded")
        }
    }

    struct StubSource;

    #[async_trait]
    impl TafsirSource for StubSource {
        async fn fetch_tafsir(&self, _juz: JuzNumber) -> Result<Vec<TafsirEntry>> {
            Ok(vec![
                TafsirEntry {
                    verse_key: "2:253".to_string(),
                    text: "<p>Those messengers, some We caused to exceed others</p>".to_string(),
                    uthmani: "تِلْكَ ٱلرُّسُلُ".to_string(),
                },
                TafsirEntry {
                    verse_key: "2:254".to_string(),
                    text: "<p>Spend from what We have provided</p>".to_string(),
                    uthmani: String::new(),
                },
            ])
        }
    }

    fn plan(juz: u8, output_dir: &Path) -> RunPlan {
        RunPlan {
            juz: JuzNumber::new(juz).unwrap(),
            date: NaiveDate::from_ymd_opt(2026, 2, 19).unwrap(),
            site_title: "Daily Juz Tafsir".to_string(),
            output_dir: output_dir.to_path_buf(),
            summary: SummaryOptions {
                chunk_chars: 120_000,
                chunk_delay: Duration::ZERO,
            },
        }
    }

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    fn generate_args(juz: Option<&str>, output: &Path) -> GenerateArgs {
        GenerateArgs {
            selection: SelectionArgs {
                juz: juz.map(str::to_string),
                date: NaiveDate::from_ymd_opt(2026, 2, 19),
            },
            output: Some(output.to_path_buf()),
            local: false,
            with_tafsir: false,
            api_key: None,
        }
    }

    #[tokio::test]
    async fn test_stubbed_text_lands_in_both_pages() {
        let dir = TempDir::new().unwrap();
        let site = execute(&plan(3, dir.path()), &StubGenerator("SAMPLE TEXT"), None)
            .await
            .unwrap();

        assert_eq!(site.juz_page, dir.path().join("juz-3.html"));
        assert_eq!(site.index_page, dir.path().join("index.html"));
        assert!(read(&site.juz_page).contains("SAMPLE TEXT"));
        assert!(read(&site.index_page).contains("SAMPLE TEXT"));

        let manifest = Manifest::load(dir.path()).unwrap();
        let entry = manifest.get(JuzNumber::new(3).unwrap()).unwrap();
        assert_eq!(entry.word_count, 2);
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2026, 2, 19).unwrap());
    }

    #[tokio::test]
    async fn test_generation_failure_leaves_outputs_untouched() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), "previous index").unwrap();
        fs::write(dir.path().join("juz-3.html"), "previous page").unwrap();

        let generator = FailingGenerator::default();
        let err = execute(&plan(3, dir.path()), &generator, None)
            .await
            .unwrap_err();

        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
        assert!(format!("{:#}", err).contains("overloaded_error"));
        assert_eq!(read(&dir.path().join("index.html")), "previous index");
        assert_eq!(read(&dir.path().join("juz-3.html")), "previous page");
        assert!(!dir.path().join("manifest.json").exists());
    }

    #[tokio::test]
    async fn test_generation_failure_creates_nothing() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("site");
        let result = execute(&plan(3, &output), &FailingGenerator::default(), None).await;
        assert!(result.is_err());
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_rerun_overwrites_archival_page() {
        let dir = TempDir::new().unwrap();
        execute(&plan(3, dir.path()), &StubGenerator("FIRST RUN"), None)
            .await
            .unwrap();
        let site = execute(&plan(3, dir.path()), &StubGenerator("SECOND RUN"), None)
            .await
            .unwrap();

        let page = read(&site.juz_page);
        assert!(!page.contains("FIRST RUN"));
        assert_eq!(page.matches("SECOND RUN").count(), 1);
        assert_eq!(Manifest::load(dir.path()).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_index_links_previous_days() {
        let dir = TempDir::new().unwrap();
        execute(&plan(2, dir.path()), &StubGenerator("DAY TWO"), None)
            .await
            .unwrap();
        let site = execute(&plan(3, dir.path()), &StubGenerator("DAY THREE"), None)
            .await
            .unwrap();

        let index = read(&site.index_page);
        assert!(index.contains("DAY THREE"));
        assert!(!index.contains("DAY TWO"));
        assert!(index.contains(r#"href="juz-2.html""#));
        assert!(read(&dir.path().join("juz-2.html")).contains("DAY TWO"));
    }

    #[tokio::test]
    async fn test_tafsir_source_adds_verse_cards() {
        let dir = TempDir::new().unwrap();
        let site = execute(
            &plan(3, dir.path()),
            &StubGenerator("The juz opens at 2:253."),
            Some(&StubSource),
        )
        .await
        .unwrap();

        let page = read(&site.juz_page);
        assert!(page.contains(r#"id="v-2-253""#));
        assert!(page.contains("openVerse('v-2-253')"));
        assert!(page.contains("Spend from what We have provided"));

        let index = read(&site.index_page);
        assert!(index.contains(r##"href="juz-3.html#v-2-253""##));
        assert!(!index.contains("openVerse('v-2-253')"));

        let manifest = Manifest::load(dir.path()).unwrap();
        let words = manifest.get(JuzNumber::new(3).unwrap()).unwrap().word_count;
        // "[2:253]" and "[2:254]" count as words alongside the commentary
        assert_eq!(words, 16);
    }

    #[tokio::test]
    async fn test_local_mode_needs_no_credential() {
        let dir = TempDir::new().unwrap();
        let mut args = generate_args(Some("5"), dir.path());
        args.local = true;

        let site = run(None, args).await.unwrap();
        let page = read(&site.juz_page);
        assert!(page.contains("Juz 5: Wal Muhsanat"));
        assert!(page.contains(r#"id="v-5-1""#));
        assert!(page.contains("openVerse('v-5-2')"));
    }

    #[tokio::test]
    async fn test_invalid_override_fails_before_anything_else() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("site");

        for raw in ["0", "31"] {
            let err = run(None, generate_args(Some(raw), &output)).await.unwrap_err();
            assert!(matches!(
                err.downcast_ref::<daily_juz_core::Error>(),
                Some(daily_juz_core::Error::InvalidJuz(_))
            ));
        }
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_network() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("site");

        let err = run(None, generate_args(Some("15"), &output)).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<daily_juz_core::Error>(),
            Some(daily_juz_core::Error::MissingCredential(_))
        ));
        assert!(!output.exists());
    }
}
