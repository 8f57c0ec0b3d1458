use anyhow::{bail, Result};
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::collections::HashSet;
use std::ops::Range;

/// Maximum number of characters kept from the record text in a snippet.
pub const SNIPPET_MAX_CHARS: usize = 140;

/// Characters of leading context kept before the first match.
pub const SNIPPET_LEADING_CONTEXT: usize = 30;

const ELLIPSIS: &str = "...";

/// Page a searchable record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SourceCategory {
    Home,
    About,
    Resume,
}

impl SourceCategory {
    pub fn label(&self) -> &'static str {
        match self {
            SourceCategory::Home => "Home",
            SourceCategory::About => "About",
            SourceCategory::Resume => "Resume",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRecord {
    pub id: String,
    pub source: SourceCategory,
    pub title: String,
    pub full_text: String,
    pub link_target: String,
}

impl SearchRecord {
    pub fn new(
        id: impl Into<String>,
        source: SourceCategory,
        title: impl Into<String>,
        full_text: impl Into<String>,
        link_target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source,
            title: title.into(),
            full_text: full_text.into(),
            link_target: link_target.into(),
        }
    }
}

/// A matching record together with the snippet computed for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult<'a> {
    #[serde(flatten)]
    pub record: &'a SearchRecord,
    pub snippet: String,
}

/// Case-insensitive literal matcher for a single query string.
///
/// The query is escaped before compilation, so characters such as `+`, `(`
/// or `*` are matched as plain text. Offsets returned are byte offsets into
/// the haystack and always fall on char boundaries.
#[derive(Debug, Clone)]
pub struct QueryMatcher {
    pattern: Pattern,
}

#[derive(Debug, Clone)]
enum Pattern {
    Regex(Regex),
    /// Char-by-char scan for queries too large to compile.
    Literal(Vec<char>),
}

impl QueryMatcher {
    /// Returns `None` for an empty query, which matches nothing.
    pub fn new(query: &str) -> Option<Self> {
        if query.is_empty() {
            return None;
        }

        let pattern = match RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
        {
            Ok(re) => Pattern::Regex(re),
            Err(e) => {
                tracing::debug!(
                    "Query of {} bytes not compiled ({}), using literal scan",
                    query.len(),
                    e
                );
                Pattern::Literal(query.chars().collect())
            }
        };

        Some(Self { pattern })
    }

    /// Byte range of the first occurrence in `text`.
    pub fn find(&self, text: &str) -> Option<Range<usize>> {
        match &self.pattern {
            Pattern::Regex(re) => re.find(text).map(|m| m.range()),
            Pattern::Literal(needle) => find_literal(needle, text, 0),
        }
    }

    /// Byte ranges of every non-overlapping occurrence, left to right.
    pub fn find_iter<'t>(
        &'t self,
        text: &'t str,
    ) -> Box<dyn Iterator<Item = Range<usize>> + 't> {
        match &self.pattern {
            Pattern::Regex(re) => Box::new(re.find_iter(text).map(|m| m.range())),
            Pattern::Literal(needle) => {
                let mut cursor = 0;
                Box::new(std::iter::from_fn(move || {
                    let found = find_literal(needle, text, cursor)?;
                    cursor = found.end;
                    Some(found)
                }))
            }
        }
    }
}

fn chars_match(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Leftmost occurrence of `needle` in `text` at or after byte `from`.
fn find_literal(needle: &[char], text: &str, from: usize) -> Option<Range<usize>> {
    let rest = text.get(from..)?;

    for (offset, _) in rest.char_indices() {
        let start = from + offset;
        // every char is at least one byte
        if text.len() - start < needle.len() {
            break;
        }
        let mut end = start;
        let mut hay = text[start..].chars();

        let matched = needle.iter().all(|&n| match hay.next() {
            Some(c) if chars_match(c, n) => {
                end += c.len_utf8();
                true
            }
            _ => false,
        });

        if matched {
            return Some(start..end);
        }
    }

    None
}

/// The immutable, ordered set of searchable records.
///
/// Built once at startup and shared by reference; `search` never mutates it.
#[derive(Debug, Clone)]
pub struct ContentIndex {
    records: Vec<SearchRecord>,
}

impl ContentIndex {
    /// Fails if a record has empty text or an id is used twice.
    pub fn new(records: Vec<SearchRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if record.full_text.is_empty() {
                bail!("Search record '{}' has no searchable text", record.id);
            }
            if !seen.insert(record.id.as_str()) {
                bail!("Duplicate search record id '{}'", record.id);
            }
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[SearchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&SearchRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Returns every record whose text contains `query`, ignoring case,
    /// in index order. An empty query returns nothing.
    pub fn search(&self, query: &str) -> Vec<SearchResult<'_>> {
        let Some(matcher) = QueryMatcher::new(query) else {
            return Vec::new();
        };

        let results: Vec<SearchResult<'_>> = self
            .records
            .iter()
            .filter_map(|record| {
                let first = matcher.find(&record.full_text)?;
                Some(SearchResult {
                    record,
                    snippet: build_snippet(&record.full_text, first.start, SNIPPET_MAX_CHARS),
                })
            })
            .collect();

        tracing::debug!(
            "Query '{}' matched {}/{} records",
            query,
            results.len(),
            self.records.len()
        );

        results
    }
}

/// Excerpt of `text` around the first case-insensitive occurrence of
/// `query`, at most `max_chars` characters plus ellipsis markers.
///
/// When the query does not occur, the excerpt starts at the beginning of
/// the text.
pub fn generate_snippet(text: &str, query: &str, max_chars: usize) -> String {
    let match_start = QueryMatcher::new(query)
        .and_then(|m| m.find(text))
        .map(|range| range.start)
        .unwrap_or(0);

    build_snippet(text, match_start, max_chars)
}

fn build_snippet(text: &str, match_start: usize, max_chars: usize) -> String {
    let match_char = text[..match_start].chars().count();
    let start_char = match_char.saturating_sub(SNIPPET_LEADING_CONTEXT);
    let start = byte_offset(text, start_char);

    let rest = &text[start..];
    let body = &rest[..byte_offset(rest, max_chars)];

    let mut snippet = String::with_capacity(body.len() + 2 * ELLIPSIS.len());
    if start > 0 {
        snippet.push_str(ELLIPSIS);
    }
    snippet.push_str(body);
    if start + body.len() < text.len() {
        snippet.push_str(ELLIPSIS);
    }

    snippet
}

/// Byte offset of the `n`th char of `text`, or its length if shorter.
fn byte_offset(text: &str, n: usize) -> usize {
    text.char_indices()
        .nth(n)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}
