use crate::markdown::render_summary;
use crate::{format_long_date, html_escape};
use chrono::NaiveDate;
use daily_juz_core::{JuzNumber, TafsirEntry, format_thousands};
use std::collections::HashSet;

/// Characters of Arabic text shown on a collapsed verse card
const PREVIEW_CHARS: usize = 60;

/// Everything a page template needs for one juz
#[derive(Debug, Clone)]
pub struct PageContext<'a> {
    pub site_title: &'a str,
    pub juz: JuzNumber,
    /// Date the content was generated for
    pub date: NaiveDate,
    /// Summary as returned by the model (markdown)
    pub summary: &'a str,
    /// Verse-level tafsir; empty when the summary was generated without source text
    pub tafsir: &'a [TafsirEntry],
    pub word_count: usize,
}

impl PageContext<'_> {
    /// Summary as HTML with verse references linked to their cards.
    /// `page` names the page holding the cards when it is not the current one.
    pub fn summary_html(&self, page: Option<&str>) -> String {
        let verse_keys: HashSet<String> = self
            .tafsir
            .iter()
            .map(|entry| entry.verse_key.clone())
            .collect();
        render_summary(self.summary, &verse_keys, page)
    }

    /// Header block shared by the juz page and the canonical page
    pub(crate) fn header_html(&self) -> String {
        format!(
            r#"<header class="juz-header">
        <div class="juz-arabic" lang="ar" dir="rtl">{name_ar}</div>
        <h1>Juz {n}: {name}</h1>
        <div class="meta">{date}</div>
    </header>"#,
            name_ar = self.juz.name_ar(),
            n = self.juz,
            name = html_escape(self.juz.name()),
            date = format_long_date(self.date),
        )
    }
}

/// Render the archival page for one juz (`juz-<N>.html`)
pub fn render_juz_page(ctx: &PageContext) -> String {
    let full_tafsir = if ctx.tafsir.is_empty() {
        String::new()
    } else {
        format!(
            r#"<section class="full-tafsir">
        <h2>Full Tafsir</h2>
        <nav class="verse-jumpbar">
{jumpbar}
        </nav>
{cards}
    </section>"#,
            jumpbar = verse_jumpbar(ctx.tafsir),
            cards = verse_cards(ctx.tafsir),
        )
    };

    let body = format!(
        r#"{header}
    <section class="summary">
{summary}
    </section>
    {full_tafsir}
    <footer>
        <div class="meta">{words} words &middot; <a href="index.html">All juz</a></div>
    </footer>"#,
        header = ctx.header_html(),
        summary = ctx.summary_html(None),
        full_tafsir = full_tafsir,
        words = format_thousands(ctx.word_count),
    );

    let title = format!("Juz {}: {} - {}", ctx.juz, ctx.juz.name(), ctx.site_title);
    layout(&title, &body)
}

fn verse_jumpbar(entries: &[TafsirEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                r##"            <a href="#{}">{}</a>"##,
                entry.anchor_id(),
                html_escape(&entry.verse_key)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn verse_cards(entries: &[TafsirEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            let uthmani_html = if entry.uthmani.is_empty() {
                String::new()
            } else {
                format!(
                    r#"<div class="verse-arabic" lang="ar" dir="rtl">{}</div>"#,
                    html_escape(&entry.uthmani)
                )
            };

            // Tafsir text is markup from the tafsir API and is embedded as-is
            format!(
                r#"        <div class="verse-tafsir" id="{id}">
            <div class="verse-header">
                <div class="verse-header-left">
                    <span class="verse-key">{key}</span>
                    <span class="verse-preview-ar" lang="ar" dir="rtl">{preview}</span>
                </div>
                <span class="verse-toggle-icon">&#9662;</span>
            </div>
            <div class="verse-body">
                {uthmani}
                <div class="verse-text">{text}</div>
            </div>
        </div>"#,
                id = entry.anchor_id(),
                key = html_escape(&entry.verse_key),
                preview = html_escape(&preview(&entry.uthmani)),
                uthmani = uthmani_html,
                text = entry.text,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Truncated Arabic preview for a collapsed card
fn preview(uthmani: &str) -> String {
    if uthmani.chars().count() > PREVIEW_CHARS {
        let cut: String = uthmani.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", cut)
    } else {
        uthmani.to_string()
    }
}

/// Wrap page body in the shared document shell
pub(crate) fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{style}</style>
</head>
<body>
<main>
    {body}
</main>
<script>{script}</script>
</body>
</html>
"#,
        title = html_escape(title),
        style = STYLE,
        body = body,
        script = SCRIPT,
    )
}

const STYLE: &str = r#"
        :root {
            --bg: #faf8f3;
            --card: #ffffff;
            --text: #2b2b2b;
            --muted: #6b6b6b;
            --accent: #1f6f5c;
            --border: #e6e1d6;
        }
        * { box-sizing: border-box; }
        body {
            margin: 0;
            background: var(--bg);
            color: var(--text);
            font-family: Georgia, 'Times New Roman', serif;
            line-height: 1.7;
        }
        main { max-width: 760px; margin: 0 auto; padding: 2rem 1.25rem 4rem; }
        a { color: var(--accent); }
        .juz-header { text-align: center; margin-bottom: 2rem; }
        .juz-arabic { font-size: 2.4rem; line-height: 1.4; }
        .meta { color: var(--muted); font-size: 0.9rem; }
        .summary h3, .summary h4 { color: var(--accent); }
        .verse-ref { text-decoration: none; border-bottom: 1px dotted var(--accent); }
        .verse-jumpbar { display: flex; flex-wrap: wrap; gap: 0.4rem; margin: 1rem 0; }
        .verse-jumpbar a { font-size: 0.8rem; padding: 0.1rem 0.45rem; border: 1px solid var(--border); border-radius: 4px; text-decoration: none; }
        .verse-tafsir { background: var(--card); border: 1px solid var(--border); border-radius: 8px; margin: 0.6rem 0; }
        .verse-header { display: flex; justify-content: space-between; align-items: center; padding: 0.6rem 0.9rem; cursor: pointer; }
        .verse-header-left { display: flex; gap: 0.8rem; align-items: baseline; min-width: 0; }
        .verse-key { font-weight: bold; color: var(--accent); }
        .verse-preview-ar { color: var(--muted); white-space: nowrap; overflow: hidden; text-overflow: ellipsis; }
        .verse-body { display: none; padding: 0 0.9rem 0.9rem; }
        .verse-tafsir.open .verse-body { display: block; }
        .verse-tafsir.open .verse-toggle-icon { transform: rotate(180deg); }
        .verse-arabic { font-size: 1.6rem; text-align: right; margin: 0.5rem 0 1rem; }
        .juz-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(140px, 1fr)); gap: 0.7rem; }
        .juz-card { display: block; text-decoration: none; color: inherit; background: var(--card); border: 1px solid var(--border); border-radius: 8px; padding: 0.7rem; text-align: center; }
        .juz-card.upcoming { opacity: 0.5; }
        .juz-card.today { border-color: var(--accent); }
        .juz-num { font-weight: bold; color: var(--accent); }
        .juz-card .juz-arabic { font-size: 1.2rem; }
        .juz-title, .juz-date { font-size: 0.8rem; color: var(--muted); }
        footer { margin-top: 3rem; text-align: center; }
"#;

const SCRIPT: &str = r#"
        document.querySelectorAll('.verse-header').forEach(function (header) {
            header.addEventListener('click', function () {
                header.parentElement.classList.toggle('open');
            });
        });
        function openVerse(id) {
            var card = document.getElementById(id);
            if (card) {
                card.classList.add('open');
                card.scrollIntoView({ behavior: 'smooth', block: 'start' });
            }
        }
        if (location.hash) {
            openVerse(location.hash.slice(1));
        }
"#;
