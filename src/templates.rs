use askama::Template;

use crate::content::{PortfolioLink, Profile, Project};
use crate::repos::Repository;

#[derive(Template)]
#[template(path = "base.html")]
pub struct BaseTemplate<'a> {
    pub title: &'a str,
    /// Path of the tab to mark active in the navigation bar.
    pub active: &'a str,
    pub content: String,
}

/// Embedded OpenStreetMap frame.
#[derive(Debug, Clone)]
pub struct MapEmbed {
    pub title: String,
    pub subtitle: String,
    /// `None` renders the "not available" placeholder.
    pub src: Option<String>,
    pub element_id: &'static str,
}

/// In-page PDF viewer.
#[derive(Debug, Clone)]
pub struct DocumentViewer {
    pub title: &'static str,
    pub src: &'static str,
    pub download_url: &'static str,
}

#[derive(Debug, Clone)]
pub struct ResultView {
    pub source: &'static str,
    pub title: String,
    pub link_target: String,
    pub snippet_html: String,
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate<'a> {
    pub profile: &'a Profile,
    pub hire_me_url: String,
    pub query: &'a str,
    pub results: Vec<ResultView>,
    pub projects: &'a [Project],
    pub maps: Vec<MapEmbed>,
}

#[derive(Debug, Clone)]
pub struct SectionView {
    pub title: &'static str,
    pub html: String,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub sections: Vec<SectionView>,
}

#[derive(Template)]
#[template(path = "resume.html")]
pub struct ResumeTemplate {
    pub viewer: DocumentViewer,
}

#[derive(Template)]
#[template(path = "portfolio.html")]
pub struct PortfolioTemplate<'a> {
    pub links: &'a [PortfolioLink],
    pub github_user: &'a str,
    pub repositories: &'a [Repository],
    pub notice: Option<String>,
}
