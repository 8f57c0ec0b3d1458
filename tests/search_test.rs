use anyhow::Result;

use portfolio_app::content;
use portfolio_app::search::{generate_snippet, ContentIndex, SearchRecord, SourceCategory, SNIPPET_MAX_CHARS};

fn record(id: &str, text: &str) -> SearchRecord {
    SearchRecord::new(id, SourceCategory::Home, id, text, "/")
}

#[test]
fn test_empty_query_returns_nothing() -> Result<()> {
    let index = content::build_index()?;
    assert!(index.search("").is_empty());
    Ok(())
}

#[test]
fn test_every_substring_finds_its_record() -> Result<()> {
    let index = content::build_index()?;

    for record in index.records() {
        let chars: Vec<char> = record.full_text.chars().collect();
        for start in (0..chars.len()).step_by(11) {
            for len in [1, 4, 9] {
                if start + len > chars.len() {
                    continue;
                }
                let needle: String = chars[start..start + len].iter().collect();

                for query in [needle.clone(), needle.to_uppercase(), needle.to_lowercase()] {
                    let results = index.search(&query);
                    assert!(
                        results.iter().any(|r| r.record.id == record.id),
                        "Query {:?} should find record {}",
                        query,
                        record.id
                    );
                }
            }
        }
    }

    Ok(())
}

#[test]
fn test_absent_query_returns_nothing() -> Result<()> {
    let index = content::build_index()?;
    assert!(index.search("zzqxj").is_empty());
    assert!(index.search("TypeScriptX").is_empty());
    assert!(index.search(".*").is_empty(), "Patterns must not act as wildcards");
    Ok(())
}

#[test]
fn test_results_keep_index_order() -> Result<()> {
    let index = content::build_index()?;
    let position = |id: &str| index.records().iter().position(|r| r.id == id);

    for query in ["e", "a", "React", "php", "Computer Science", " "] {
        let positions: Vec<usize> = index
            .search(query)
            .iter()
            .filter_map(|r| position(&r.record.id))
            .collect();
        assert!(
            positions.windows(2).all(|w| w[0] < w[1]),
            "Results for {:?} out of order: {:?}",
            query,
            positions
        );
    }

    Ok(())
}

#[test]
fn test_index_starts_with_projects() -> Result<()> {
    let index = content::build_index()?;
    let ids: Vec<&str> = index.records().iter().map(|r| r.id.as_str()).collect();

    assert_eq!(
        &ids[..8],
        &[
            "project-1",
            "project-2",
            "project-3",
            "project-4",
            "home-profile",
            "resume-summary",
            "resume-skills",
            "resume-experience",
        ]
    );
    assert!(ids[8..].iter().all(|id| id.starts_with("about-")));

    let skills = index.get("resume-skills").expect("skills record");
    assert_eq!(skills.source, SourceCategory::Resume);
    assert_eq!(skills.link_target, "/resume");
    Ok(())
}

#[test]
fn test_project_text_includes_tags() -> Result<()> {
    let index = content::build_index()?;
    let results = index.search("mamp");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].record.id, "project-4");
    assert_eq!(results[0].record.title, "SportsPro Technical Support Web App");
    Ok(())
}

#[test]
fn test_typescript_snippet_has_leading_context() -> Result<()> {
    let index = content::build_index()?;
    let results = index.search("TypeScript");

    let skills = results
        .iter()
        .find(|r| r.record.id == "resume-skills")
        .expect("skills record should match");

    assert!(skills.snippet.contains("TypeScript"));
    // match at char 41, so the excerpt starts 30 chars earlier
    assert!(skills.snippet.starts_with("...kills. Languages: JavaScript, TypeScript"));
    assert!(skills.snippet.ends_with("..."));
    Ok(())
}

#[test]
fn test_snippet_body_is_bounded() -> Result<()> {
    let index = content::build_index()?;

    for record in index.records() {
        for word in record.full_text.split_whitespace().step_by(5) {
            for result in index.search(word) {
                let body = result.snippet.strip_prefix("...").unwrap_or(&result.snippet);
                let body = body.strip_suffix("...").unwrap_or(body);
                assert!(
                    body.chars().count() <= SNIPPET_MAX_CHARS,
                    "Snippet for {:?} is too long: {}",
                    word,
                    result.snippet
                );
            }
        }
    }

    Ok(())
}

#[test]
fn test_snippet_edges() {
    let digits = "0123456789".repeat(20);
    assert_eq!(
        generate_snippet(&digits, "5678", 140),
        format!("{}...", &digits[..140])
    );

    let text = format!("{}NEEDLE{}", "a".repeat(100), "b".repeat(100));
    assert_eq!(
        generate_snippet(&text, "needle", 140),
        format!("...{}NEEDLE{}", "a".repeat(30), "b".repeat(100))
    );

    // Short text is returned whole
    assert_eq!(generate_snippet("Hello world", "WORLD", 140), "Hello world");

    // Missing query falls back to the start of the text
    assert_eq!(generate_snippet(&digits, "xyz", 10), "0123456789...");
}

#[test]
fn test_query_longer_than_snippet() {
    let text = format!("{}{}", "a".repeat(40), "b".repeat(150));
    let query = "B".repeat(150);

    // the body stops at 140 chars, cutting the match short
    assert_eq!(
        generate_snippet(&text, &query, SNIPPET_MAX_CHARS),
        format!("...{}{}...", "a".repeat(30), "b".repeat(110))
    );
}

#[test]
fn test_very_long_queries_still_match() -> Result<()> {
    let text = "abcdefghij".repeat(20_000);
    let index = ContentIndex::new(vec![record("long", &text)])?;

    let results = index.search(&text);
    assert_eq!(results.len(), 1, "A record must match its own full text");
    assert_eq!(results[0].snippet, format!("{}...", &text[..SNIPPET_MAX_CHARS]));

    let results = index.search(&text.to_uppercase());
    assert_eq!(results.len(), 1, "Case must be ignored for long queries too");

    let longer = format!("{}x", text);
    assert!(index.search(&longer).is_empty());

    let cyrillic = "Привет мир ".repeat(20_000);
    let index = ContentIndex::new(vec![record("cyrillic", &cyrillic)])?;
    assert_eq!(index.search(&cyrillic.to_uppercase()).len(), 1);
    Ok(())
}

#[test]
fn test_query_with_metacharacters_is_literal() -> Result<()> {
    let index = content::build_index()?;

    let results = index.search("C++");
    let ids: Vec<&str> = results.iter().map(|r| r.record.id.as_str()).collect();
    assert!(ids.contains(&"resume-skills"));
    assert!(ids.contains(&"about-languages"));
    assert!(results.iter().all(|r| r.record.full_text.contains("C++")));

    for query in ["(", "[", "\\", "a|b", "^", "$", "C#", "?", "{2}"] {
        // must not panic on unbalanced or special syntax
        let _ = index.search(query);
    }
    assert!(!index.search("C#").is_empty());
    Ok(())
}

#[test]
fn test_search_is_idempotent() -> Result<()> {
    let index = content::build_index()?;

    for query in ["react", "QUT", "C++", "2024"] {
        assert_eq!(index.search(query), index.search(query));
    }
    Ok(())
}

#[test]
fn test_utf8_safety() -> Result<()> {
    let text = format!(
        "{} Привет мир! Hello world! 你好世界！ Эмодзи: 🦀⚡🔍 {}",
        "🚀".repeat(50),
        "Ж".repeat(200)
    );
    let index = ContentIndex::new(vec![record("utf8", &text)])?;

    // This should not panic with "byte index is not a char boundary"
    for query in ["ПРИВЕТ", "世界", "🦀", "Ж", "world"] {
        let results = index.search(query);
        assert_eq!(results.len(), 1, "Should find UTF-8 text for {:?}", query);

        let body = results[0].snippet.trim_start_matches("...");
        let body = body.strip_suffix("...").unwrap_or(body);
        assert!(body.chars().count() <= SNIPPET_MAX_CHARS);
    }

    let results = index.search("привет");
    assert!(results[0].snippet.starts_with("..."));
    assert!(results[0].snippet.contains("Привет"));
    Ok(())
}

#[test]
fn test_index_rejects_invalid_records() {
    let duplicate = ContentIndex::new(vec![record("a", "one"), record("a", "two")]);
    assert!(duplicate.is_err());

    let empty = ContentIndex::new(vec![record("a", "")]);
    assert!(empty.is_err());

    let index = ContentIndex::new(Vec::new()).expect("empty index is valid");
    assert!(index.is_empty());
    assert!(index.search("anything").is_empty());
}
