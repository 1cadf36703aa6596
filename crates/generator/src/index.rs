use crate::page::{PageContext, layout};
use crate::{format_short_date, html_escape};
use daily_juz_core::JuzNumber;
use daily_juz_core::manifest::Manifest;

/// Render the canonical page (`index.html`).
///
/// Shows today's summary in full, then a grid of all 30 juz linking to the
/// archival pages recorded in `manifest`.
pub fn render_index_page(ctx: &PageContext, manifest: &Manifest) -> String {
    // Verse cards only exist on the archival page
    let page = ctx.juz.page_file_name();
    let body = format!(
        r#"{header}
    <section class="summary">
{summary}
        <p class="meta"><a href="{page}">Open the Juz {n} page</a></p>
    </section>
    <section class="archive">
        <h2>All Juz</h2>
        <div class="juz-grid">
{cards}
        </div>
    </section>"#,
        header = ctx.header_html(),
        summary = ctx.summary_html(Some(&page)),
        page = page,
        n = ctx.juz,
        cards = juz_cards(ctx.juz, manifest),
    );

    layout(ctx.site_title, &body)
}

fn juz_cards(today: JuzNumber, manifest: &Manifest) -> String {
    JuzNumber::all()
        .map(|juz| {
            let inner = |date_line: String| {
                format!(
                    r#"<div class="juz-num">Juz {n}</div>
                <div class="juz-arabic" lang="ar" dir="rtl">{name_ar}</div>
                <div class="juz-title">{name}</div>
                <div class="juz-date">{date_line}</div>"#,
                    n = juz,
                    name_ar = juz.name_ar(),
                    name = html_escape(juz.name()),
                )
            };

            match manifest.get(juz) {
                Some(entry) => {
                    let class = if juz == today { "juz-card today" } else { "juz-card" };
                    format!(
                        r#"            <a class="{class}" href="{href}">
                {inner}
            </a>"#,
                        href = juz.page_file_name(),
                        inner = inner(format_short_date(entry.date)),
                    )
                }
                None => format!(
                    r#"            <div class="juz-card upcoming">
                {inner}
            </div>"#,
                    inner = inner("Coming soon".to_string()),
                ),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use daily_juz_core::TafsirEntry;
    use daily_juz_core::manifest::ManifestEntry;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, d).unwrap()
    }

    fn context(juz: u8) -> PageContext<'static> {
        PageContext {
            site_title: "Daily Juz Tafsir",
            juz: JuzNumber::new(juz).unwrap(),
            date: date(19),
            summary: "SAMPLE TEXT",
            tafsir: &[],
            word_count: 2,
        }
    }

    fn manifest(entries: &[(u8, u32)]) -> Manifest {
        let mut manifest = Manifest::default();
        for (juz, day) in entries {
            manifest.record(
                JuzNumber::new(*juz).unwrap(),
                ManifestEntry {
                    date: date(*day),
                    word_count: 100,
                },
            );
        }
        manifest
    }

    #[test]
    fn test_index_contains_todays_summary() {
        let html = render_index_page(&context(3), &manifest(&[(3, 19)]));
        assert!(html.contains("<p>SAMPLE TEXT</p>"));
        assert!(html.contains("Juz 3: Tilkal Rusul"));
        assert!(html.contains(r#"<a href="juz-3.html">Open the Juz 3 page</a>"#));
        assert!(html.contains("<title>Daily Juz Tafsir</title>"));
    }

    #[test]
    fn test_grid_lists_all_thirty() {
        let html = render_index_page(&context(3), &manifest(&[(1, 17), (2, 18), (3, 19)]));
        assert_eq!(html.matches("class=\"juz-num\"").count(), 30);
        assert_eq!(html.matches("juz-card upcoming").count(), 27);
        assert!(html.contains(r#"<a class="juz-card" href="juz-1.html">"#));
        assert!(html.contains(r#"<a class="juz-card today" href="juz-3.html">"#));
        assert!(html.contains("17 Feb 2026"));
        assert!(html.contains("Coming soon"));
    }

    #[test]
    fn test_names_with_apostrophes_are_escaped() {
        let html = render_index_page(&context(1), &Manifest::default());
        assert!(html.contains("Wa Iza Sami&#x27;oo"));
    }

    #[test]
    fn test_verse_links_point_at_archival_page() {
        let tafsir = [TafsirEntry {
            verse_key: "2:253".to_string(),
            text: "<p>Commentary</p>".to_string(),
            uthmani: String::new(),
        }];
        let ctx = PageContext {
            summary: "Opens at 2:253.",
            tafsir: &tafsir,
            ..context(3)
        };
        let html = render_index_page(&ctx, &Manifest::default());
        assert!(html.contains(r##"<a href="juz-3.html#v-2-253" class="verse-ref">2:253</a>"##));
        assert!(!html.contains(r##"href="#v-2-253""##));
        assert!(!html.contains(r#"id="v-2-253""#));
    }
}
