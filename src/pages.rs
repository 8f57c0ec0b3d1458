//! Server-side rendering of the four portfolio tabs.

use anyhow::Result;
use askama::Template;
use pulldown_cmark::{html, Options, Parser};

use crate::content::{ABOUT_SECTIONS, PORTFOLIO_LINKS, PROFILE, PROJECTS};
use crate::contact;
use crate::highlight;
use crate::location::{self, Coordinates, CAMPUS_MAP_URL};
use crate::repos::Repository;
use crate::search::{ContentIndex, QueryMatcher};
use crate::templates::*;

/// Longest query the Home page will evaluate; longer input is cut here.
pub const MAX_PAGE_QUERY_CHARS: usize = 200;

fn page(title: &str, active: &str, content: String) -> Result<String> {
    Ok(BaseTemplate {
        title,
        active,
        content,
    }
    .render()?)
}

pub fn render_home(
    index: &ContentIndex,
    contact_email: &str,
    query: &str,
    user_position: Option<Coordinates>,
) -> Result<String> {
    let query: String = query.chars().take(MAX_PAGE_QUERY_CHARS).collect();
    let matcher = QueryMatcher::new(&query);

    let results = index
        .search(&query)
        .into_iter()
        .map(|r| ResultView {
            source: r.record.source.label(),
            title: r.record.title.clone(),
            link_target: r.record.link_target.clone(),
            snippet_html: highlight::to_html(&highlight::highlight_with(
                matcher.as_ref(),
                &r.snippet,
            )),
        })
        .collect();

    let maps = vec![
        MapEmbed {
            title: "QUT Brisbane Campus".to_string(),
            subtitle: "Queensland University of Technology (QUT) – Brisbane City".to_string(),
            src: Some(CAMPUS_MAP_URL.to_string()),
            element_id: "campus-map",
        },
        MapEmbed {
            title: "Your Location".to_string(),
            subtitle: user_position
                .map(|c| c.label())
                .unwrap_or_else(|| "Fetching location...".to_string()),
            src: user_position.map(|c| location::embed_url(Some(c))),
            element_id: "user-map",
        },
    ];

    let content = HomeTemplate {
        profile: &PROFILE,
        hire_me_url: contact::hire_me_url(contact_email),
        query: &query,
        results,
        projects: PROJECTS,
        maps,
    }
    .render()?;

    page("Home", "/", content)
}

pub fn render_about() -> Result<String> {
    let sections = ABOUT_SECTIONS
        .iter()
        .map(|s| SectionView {
            title: s.title,
            html: render_markdown(s.markdown),
        })
        .collect();

    page("About", "/about", AboutTemplate { sections }.render()?)
}

pub fn render_resume() -> Result<String> {
    let viewer = DocumentViewer {
        title: "Resume PDF",
        src: "/resume.pdf",
        download_url: "/resume/download",
    };

    page("Resume", "/resume", ResumeTemplate { viewer }.render()?)
}

/// `notice` is shown instead of failing the page when the listing is unavailable.
pub fn render_portfolio(
    github_user: &str,
    repositories: &[Repository],
    notice: Option<String>,
) -> Result<String> {
    let content = PortfolioTemplate {
        links: PORTFOLIO_LINKS,
        github_user,
        repositories,
        notice,
    }
    .render()?;

    page("Portfolio", "/portfolio", content)
}

pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(markdown, options);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}
