// Static page generation: markdown rendering, juz/index templates, site output

pub mod index;
pub mod markdown;
pub mod page;
pub mod site;

pub use index::render_index_page;
pub use page::{PageContext, render_juz_page};
pub use site::{PublishedSite, SiteWriter};

/// HTML-escape a string to prevent XSS attacks
///
/// Escapes: & < > " '
pub fn html_escape(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#x27;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// Long date used in page headers, e.g. "Monday, 23 February 2026"
pub fn format_long_date(date: chrono::NaiveDate) -> String {
    date.format("%A, %d %B %Y").to_string()
}

/// Short date used on archive cards, e.g. "23 Feb 2026"
pub fn format_short_date(date: chrono::NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_html_escape_basic_characters() {
        assert_eq!(html_escape("Wa Mali"), "Wa Mali");
        assert_eq!(html_escape("Test & Test"), "Test &amp; Test");
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(html_escape("Wa Iza Sami'oo"), "Wa Iza Sami&#x27;oo");
    }

    #[test]
    fn test_html_escape_xss_attempts() {
        assert_eq!(
            html_escape("<script>alert('XSS')</script>"),
            "&lt;script&gt;alert(&#x27;XSS&#x27;)&lt;/script&gt;"
        );
        assert_eq!(
            html_escape("<img src=x onerror=alert(1)>"),
            "&lt;img src=x onerror=alert(1)&gt;"
        );
    }

    #[test]
    fn test_html_escape_unicode() {
        // Arabic passes through unchanged
        assert_eq!(html_escape("قَدْ أَفْلَحَ"), "قَدْ أَفْلَحَ");
        assert_eq!(html_escape(""), "");
    }

    #[test]
    fn test_date_formats() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 23).unwrap();
        assert_eq!(format_long_date(date), "Monday, 23 February 2026");
        assert_eq!(format_short_date(date), "23 Feb 2026");
    }
}
