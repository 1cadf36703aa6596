use daily_juz_core::TafsirEntry;
use regex::Regex;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));

/// Remove HTML tags and decode entities
pub fn strip_html_tags(html: &str) -> String {
    unescape_html(&TAG_RE.replace_all(html, ""))
}

/// Decode numeric references and the named entities found in tafsir markup
/// (markup escapes, typographic quotes and dashes, bidi marks).
/// Other named entities are left as written.
pub fn unescape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match tail.find(';').filter(|&end| end <= 10) {
            Some(end) => match decode_entity(&tail[1..end]) {
                Some(c) => {
                    out.push(c);
                    rest = &tail[end + 1..];
                }
                None => {
                    out.push('&');
                    rest = &tail[1..];
                }
            },
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        "lsquo" => Some('\u{2018}'),
        "rsquo" => Some('\u{2019}'),
        "sbquo" => Some('\u{201a}'),
        "ldquo" => Some('\u{201c}'),
        "rdquo" => Some('\u{201d}'),
        "bdquo" => Some('\u{201e}'),
        "laquo" => Some('\u{ab}'),
        "raquo" => Some('\u{bb}'),
        "ndash" => Some('\u{2013}'),
        "mdash" => Some('\u{2014}'),
        "hellip" => Some('\u{2026}'),
        "middot" => Some('\u{b7}'),
        "bull" => Some('\u{2022}'),
        "prime" => Some('\u{2032}'),
        "shy" => Some('\u{ad}'),
        "ensp" => Some('\u{2002}'),
        "emsp" => Some('\u{2003}'),
        "thinsp" => Some('\u{2009}'),
        "zwnj" => Some('\u{200c}'),
        "zwj" => Some('\u{200d}'),
        "lrm" => Some('\u{200e}'),
        "rlm" => Some('\u{200f}'),
        "deg" => Some('\u{b0}'),
        "copy" => Some('\u{a9}'),
        "times" => Some('\u{d7}'),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)
        }
    }
}

/// Combine tafsir entries into the plain text document sent to the model.
///
/// Each entry becomes `[verse_key]\n<text>`, separated by blank lines.
/// Entries whose text is empty after stripping are skipped.
pub fn build_plain_text(entries: &[TafsirEntry]) -> String {
    entries
        .iter()
        .filter_map(|entry| {
            let text = strip_html_tags(&entry.text);
            if text.trim().is_empty() {
                None
            } else {
                Some(format!("[{}]\n{}", entry.verse_key, text))
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
