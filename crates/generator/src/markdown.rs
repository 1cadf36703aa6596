use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static VERSE_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,3}:\d{1,3}").expect("valid verse pattern"));

/// Render model output (markdown) to HTML.
///
/// Raw HTML in the input is escaped rather than passed through, and headings
/// are demoted one level so the summary sits under the page's own headings.
pub fn markdown_to_html(markdown: &str) -> String {
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES;
    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Heading {
            level,
            id,
            classes,
            attrs,
        }) => Event::Start(Tag::Heading {
            level: demote(level),
            id,
            classes,
            attrs,
        }),
        Event::End(TagEnd::Heading(level)) => Event::End(TagEnd::Heading(demote(level))),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

fn demote(level: HeadingLevel) -> HeadingLevel {
    match level {
        HeadingLevel::H1 | HeadingLevel::H2 => HeadingLevel::H3,
        HeadingLevel::H3 => HeadingLevel::H4,
        HeadingLevel::H4 => HeadingLevel::H5,
        HeadingLevel::H5 | HeadingLevel::H6 => HeadingLevel::H6,
    }
}

/// Turn `surah:verse` references that have a verse card on the page into links.
///
/// A reference is only linked when it is not glued to a preceding word
/// character, `#`, `/` or `-`, and not followed by a word character or quote,
/// which keeps times, ids and URLs untouched.
///
/// With `page` set, links point at the cards on that page (`juz-3.html#v-2-253`)
/// instead of opening a card on the current page.
pub fn linkify_verses(html: &str, verse_keys: &HashSet<String>, page: Option<&str>) -> String {
    if verse_keys.is_empty() {
        return html.to_string();
    }

    let mut out = String::with_capacity(html.len());
    let mut last = 0;

    for m in VERSE_REF_RE.find_iter(html) {
        let before = html[..m.start()].chars().next_back();
        let after = html[m.end()..].chars().next();
        let glued_before = before.is_some_and(|c| c.is_alphanumeric() || matches!(c, '_' | '#' | '/' | '-'));
        let glued_after = after.is_some_and(|c| c.is_alphanumeric() || matches!(c, '_' | '"'));

        if glued_before || glued_after || !verse_keys.contains(m.as_str()) {
            continue;
        }

        let verse_id = daily_juz_core::verse_anchor_id(m.as_str());
        out.push_str(&html[last..m.start()]);
        let link = match page {
            Some(page) => format!(
                r##"<a href="{page}#{id}" class="verse-ref">{key}</a>"##,
                page = page,
                id = verse_id,
                key = m.as_str()
            ),
            None => format!(
                r##"<a href="#{id}" class="verse-ref" onclick="openVerse('{id}')">{key}</a>"##,
                id = verse_id,
                key = m.as_str()
            ),
        };
        out.push_str(&link);
        last = m.end();
    }

    out.push_str(&html[last..]);
    out
}

/// Markdown-to-HTML with verse links, as used by both page templates
pub fn render_summary(markdown: &str, verse_keys: &HashSet<String>, page: Option<&str>) -> String {
    linkify_verses(&markdown_to_html(markdown), verse_keys, page)
}
