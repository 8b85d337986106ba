// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::model::OutputRange;

const BODY_OPEN: &str = "<body";
const BODY_CLOSE: &str = "</body>";

/// Apply an output range to a compiled HTML document.
pub fn shape_html(document: String, range: OutputRange) -> String {
    match range {
        OutputRange::Full => document,
        OutputRange::Body => match extract_body(&document) {
            Some(body) => body.to_string(),
            None => document,
        },
    }
}

/// Inner content of the `<body>` element, if the document has one.
///
/// Tag matching is ASCII case-insensitive and attributes on the opening tag
/// are skipped. The region runs from the first opening tag to the last
/// closing tag.
pub fn extract_body(document: &str) -> Option<&str> {
    // ASCII lowercasing keeps byte offsets aligned with `document`.
    let lowered = document.to_ascii_lowercase();

    let mut search_from = 0;
    let open = loop {
        let at = search_from + lowered[search_from..].find(BODY_OPEN)?;
        let after = at + BODY_OPEN.len();
        match lowered.as_bytes().get(after) {
            Some(b'>' | b'/') => break at,
            Some(c) if c.is_ascii_whitespace() => break at,
            _ => search_from = after,
        }
    };

    let content_start = open + lowered[open..].find('>')? + 1;
    let content_end = lowered.rfind(BODY_CLOSE)?;
    if content_end < content_start {
        return None;
    }

    Some(&document[content_start..content_end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_body_ignoring_attributes() {
        let html = r#"<html><body class="x">Hi</body></html>"#;
        assert_eq!(extract_body(html), Some("Hi"));
    }

    #[test]
    fn keeps_whitespace_inside_body() {
        let html = "<html>\n<body>\n  <p>Hello</p>\n</body>\n</html>";
        assert_eq!(extract_body(html), Some("\n  <p>Hello</p>\n"));
    }

    #[test]
    fn matches_tags_case_insensitively() {
        let html = "<HTML><BODY Style='margin:0'><h1>T</h1></Body></HTML>";
        assert_eq!(extract_body(html), Some("<h1>T</h1>"));
    }

    #[test]
    fn does_not_mistake_similar_tags_for_body() {
        let html = "<html><bodyguard>no</bodyguard><body>yes</body></html>";
        assert_eq!(extract_body(html), Some("yes"));
    }

    #[test]
    fn missing_body_falls_back_to_full_document() {
        let html = "<html><p>no body here</p></html>";
        assert_eq!(extract_body(html), None);
        assert_eq!(shape_html(html.to_string(), OutputRange::Body), html);
    }

    #[test]
    fn unclosed_body_falls_back_to_full_document() {
        let html = "<html><body>dangling";
        assert_eq!(shape_html(html.to_string(), OutputRange::Body), html);
    }

    #[test]
    fn full_range_is_verbatim() {
        let html = r#"<html><body class="x">Hi</body></html>"#;
        assert_eq!(shape_html(html.to_string(), OutputRange::Full), html);
    }

    #[test]
    fn non_ascii_content_is_preserved() {
        let html = "<body>héllo wörld ✓</body>";
        assert_eq!(extract_body(html), Some("héllo wörld ✓"));
    }
}
