use url::{ParseError, Url};

const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Returns the link destination when it is safe to follow from displayed
/// content. Relative references pass; absolute URLs must use an allowed
/// scheme. The returned string is exactly the one that was checked.
pub fn sanitize_href(raw: &str) -> Option<String> {
    let trimmed = raw.trim_matches(|c: char| c.is_whitespace() || c.is_control());
    // Browsers drop tabs and newlines anywhere in a URL, so "java\tscript:"
    // would be read as "javascript:". Refuse those outright.
    if trimmed.is_empty() || trimmed.chars().any(char::is_control) {
        return None;
    }
    let href = trimmed.replace(' ', "%20");

    match Url::parse(&href) {
        Ok(url) if ALLOWED_SCHEMES.contains(&url.scheme()) => Some(href),
        Ok(_) => None,
        Err(ParseError::RelativeUrlWithoutBase) => Some(href),
        Err(_) => None,
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_web_and_relative_links() {
        assert_eq!(
            sanitize_href("https://example.com/a?b=c").as_deref(),
            Some("https://example.com/a?b=c")
        );
        assert_eq!(
            sanitize_href("mailto:team@example.com").as_deref(),
            Some("mailto:team@example.com")
        );
        assert_eq!(sanitize_href("/docs/intro").as_deref(), Some("/docs/intro"));
        assert_eq!(sanitize_href("#summary").as_deref(), Some("#summary"));
    }

    #[test]
    fn rejects_script_and_data_schemes() {
        assert_eq!(sanitize_href("javascript:alert(1)"), None);
        assert_eq!(sanitize_href("JavaScript:alert(1)"), None);
        assert_eq!(sanitize_href("java\tscript:alert(1)"), None);
        assert_eq!(sanitize_href(" vbscript:msgbox(1)"), None);
        assert_eq!(sanitize_href("data:text/html,<script>x</script>"), None);
        assert_eq!(sanitize_href(""), None);
    }

    #[test]
    fn emits_the_checked_destination() {
        assert_eq!(
            sanitize_href("  https://example.com/a  ").as_deref(),
            Some("https://example.com/a")
        );
        assert_eq!(
            sanitize_href("/docs/my page").as_deref(),
            Some("/docs/my%20page")
        );
        assert_eq!(sanitize_href("https://example.com/\u{7}x"), None);
        assert_eq!(sanitize_href("/docs\nintro"), None);
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }
}
