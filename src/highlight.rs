use serde::Serialize;

use crate::search::QueryMatcher;

/// A run of snippet text, flagged when it is an occurrence of the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub is_match: bool,
}

/// Splits `snippet` around every case-insensitive occurrence of `query`.
///
/// Each occurrence becomes its own matched segment, even when two are
/// adjacent. Joining the segment texts gives back `snippet` unchanged.
pub fn highlight<'a>(snippet: &'a str, query: &str) -> Vec<Segment<'a>> {
    highlight_with(QueryMatcher::new(query).as_ref(), snippet)
}

pub fn highlight_with<'a>(matcher: Option<&QueryMatcher>, snippet: &'a str) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    if let Some(matcher) = matcher {
        for range in matcher.find_iter(snippet) {
            if range.start > cursor {
                segments.push(Segment {
                    text: &snippet[cursor..range.start],
                    is_match: false,
                });
            }
            segments.push(Segment {
                text: &snippet[range.clone()],
                is_match: true,
            });
            cursor = range.end;
        }
    }

    if cursor < snippet.len() {
        segments.push(Segment {
            text: &snippet[cursor..],
            is_match: false,
        });
    }

    segments
}

/// Renders segments as escaped HTML, wrapping matches in `<mark>`.
pub fn to_html(segments: &[Segment<'_>]) -> String {
    let mut html = String::new();
    for segment in segments {
        if segment.is_match {
            html.push_str("<mark>");
            html.push_str(&html_escape::encode_text(segment.text));
            html.push_str("</mark>");
        } else {
            html.push_str(&html_escape::encode_text(segment.text));
        }
    }
    html
}

pub fn highlight_html(snippet: &str, query: &str) -> String {
    to_html(&highlight(snippet, query))
}
