//! Compiled-in portfolio content and the search index built from it.

use anyhow::Result;

use crate::search::{ContentIndex, SearchRecord, SourceCategory};

#[derive(Debug, Clone, Copy)]
pub struct Profile {
    pub name: &'static str,
    pub role: &'static str,
    pub tagline: &'static str,
    pub location: &'static str,
}

pub const PROFILE: Profile = Profile {
    name: "James McCann",
    role: "Full Stack Developer",
    tagline: "Ready for hire.",
    location: "Queensland University of Technology (QUT) Brisbane",
};

#[derive(Debug, Clone, Copy)]
pub struct Project {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
}

impl Project {
    /// Title, description and tags as one searchable string.
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.title, self.description, self.tags.join(" "))
    }
}

pub const PROJECTS: &[Project] = &[
    Project {
        id: 1,
        title: "CFMEU Meetings Web App",
        description: "Sign in portal for users attending various meetings at the CFMEU. Designed with a clean and minimalistic UI. Simplicity and ease of use was a priority. User sign in data is stored on a server and can be viewed and retrieved by staff.",
        tags: &["PHP", "MySQL", "HTML", "CSS"],
    },
    Project {
        id: 2,
        title: "Software Developer Portfolio",
        description: "A multi page web app created with the React framework. This program is compatible with mobile as it was developed as both a web and mobile app.",
        tags: &["React Native", "TypeScript", "Node", "CSS", "JavaScript"],
    },
    Project {
        id: 3,
        title: "Lumenari",
        description: "My personally owned e-commerce website that sells stylish and interesting lighting gadgets. Developed from scratch as a PHP fullstack web app. Work in progress as the site grows.",
        tags: &["PHP", "HTML", "CSS", "JavaScript"],
    },
    Project {
        id: 4,
        title: "SportsPro Technical Support Web App",
        description: "A CRUD app developed with the LAMP stack. This was an assignment that I completed in uni. Awarded a high distinction for this project.",
        tags: &["Linux", "Apache", "MAMP", "PHP"],
    },
];

pub const RESUME_SUMMARY: &str = "Highly motivated and dedicated graduate-level developer with a passion for IT and computer science. Specialising in building full-stack web applications using cutting-edge technologies. Proficient in a wide range of programming languages, with a strong foundation in software development methodologies and best practices. I believe that I possess excellent problem-solving abilities and thrive in collaborative, diverse team environments, consistently delivering high quality solutions. I am a 2024 graduate from USQ, I am currently pursuing a Postgraduate Certificate in Computer Science through QUT Online";

pub const RESUME_SKILLS: &str = "Technical Skills. Languages: JavaScript, TypeScript, Python, C#, C++. Frameworks: MVC with ASP.NET and Laravel, React, React Native, Node.js, Express. Databases: MongoDB, PostgreSQL. Mobile Dev: Kotlin, Expo. IT Skills Support: Microsoft Enterprise IT ecosystems: SCCM, Active Directory, Intune, M365 admin, RSAT, Bash Scripting. Remote Support Tools. Networking: CISCO CCNA training.";

pub const RESUME_EXPERIENCE: &str = "Work Experience. Senior Software Engineer at TechCorp 2021-Present, developed internal tooling using GraphQL and React. Led migration to TypeScript. Bachelor of IT - Double Majoring in Computer Science and IT management from University of Southern Queensland (UniSQ). Graduated in 2024. GPA of 6. Studying a Graduate Certificate in Computer Science from QUT Online. Graduating late 2025. Cert. II in Business from North Metro TAFE. Graduated 2014.";

/// A collapsible section of the About page, written in Markdown.
#[derive(Debug, Clone, Copy)]
pub struct AboutSection {
    pub id: &'static str,
    pub title: &'static str,
    pub markdown: &'static str,
}

pub const ABOUT_SECTIONS: &[AboutSection] = &[
    AboutSection {
        id: "about-personal",
        title: "Get to know me",
        markdown: "\
- Lives in Brisbane.
- 28 years old.
- Gym junkie.
- NRL fan.
- Guitar player.
- Gamer.
- Game Developer on Unreal Engine 5.
- Car enthusiast.
- Surfer, skateboarder, snowboarder.
",
    },
    AboutSection {
        id: "about-education",
        title: "Education",
        markdown: "\
- Bachelor of Information Technology – Computer Science & IT Management (2024)
- Graduate Certificate in Computer Science – QUT (2025)
- Graduated High School – St. Marks Anglican Community School (2014)
",
    },
    AboutSection {
        id: "about-languages",
        title: "Languages I can speak",
        markdown: "\
**Front End**

- HTML
- CSS
- JavaScript
- React
- Python

**Middle-ware**

- PHP
- REST API
- JSON
- Express

**Back End**

- MySQL
- SQL
- Node.js
- Azure
- AWS
- MongoDB

**Engineering**

- C++
- C#
- Java

**Frameworks**

- MVC with ASP.NET
- Laravel

**Mobile Development**

- Kotlin
- Expo
",
    },
    AboutSection {
        id: "about-experience",
        title: "Experience",
        markdown: "\
- CFMEU IT Support Office – Full Stack App Development
- [CFMEU Sign-in App Project](https://www.cfmeu-online.com.au)
- E-commerce website development on Shopify & WordPress
- University Full-Stack Assignment Projects: [Visit GitHub Portfolio](https://www.github.com/JamesMcCannCoding)
",
    },
];

#[derive(Debug, Clone, Copy)]
pub struct PortfolioLink {
    pub description: &'static str,
    pub label: &'static str,
    pub url: &'static str,
}

pub const PORTFOLIO_LINKS: &[PortfolioLink] = &[
    PortfolioLink {
        description: "CFMEU IT Support Office - Full Stack App Development.",
        label: "CFMEU Sign-in App Project",
        url: "https://www.cfmeu-online.com.au",
    },
    PortfolioLink {
        description: "E-commerce website development on Shopify and WordPress.",
        label: "Lumenari.com.au",
        url: "https://www.lumenari.com.au/Products/USB_Sunset_Lamp/p1.php",
    },
    PortfolioLink {
        description: "University Full Stack Assignment Projects.",
        label: "Github Portfolio",
        url: "https://www.github.com/JamesMcCannCoding",
    },
];

/// Builds the search index over every page's content.
///
/// Order: projects, home profile, resume sections, about sections.
pub fn build_index() -> Result<ContentIndex> {
    let mut records: Vec<SearchRecord> = PROJECTS
        .iter()
        .map(|p| {
            SearchRecord::new(
                format!("project-{}", p.id),
                SourceCategory::Home,
                p.title,
                p.search_text(),
                "/",
            )
        })
        .collect();

    records.push(SearchRecord::new(
        "home-profile",
        SourceCategory::Home,
        "Profile Section",
        format!(
            "Profile Section. {} {}. {} Contact me. Location QUT (Default) {}.",
            PROFILE.name, PROFILE.role, PROFILE.tagline, PROFILE.location
        ),
        "/",
    ));
    records.push(SearchRecord::new(
        "resume-summary",
        SourceCategory::Resume,
        "Resume Summary",
        RESUME_SUMMARY,
        "/resume",
    ));
    records.push(SearchRecord::new(
        "resume-skills",
        SourceCategory::Resume,
        "Technical Skills",
        RESUME_SKILLS,
        "/resume",
    ));
    records.push(SearchRecord::new(
        "resume-experience",
        SourceCategory::Resume,
        "Work Experience",
        RESUME_EXPERIENCE,
        "/resume",
    ));

    for section in ABOUT_SECTIONS {
        records.push(SearchRecord::new(
            section.id,
            SourceCategory::About,
            section.title,
            format!("{}. {}", section.title, plain_text(section.markdown)),
            "/about",
        ));
    }

    let index = ContentIndex::new(records)?;
    tracing::info!("Indexed {} content records", index.len());
    Ok(index)
}

/// Flattens Markdown list/emphasis/link syntax into one searchable line.
fn plain_text(markdown: &str) -> String {
    use pulldown_cmark::{Event, Parser, TagEnd};

    let mut text = String::new();
    for event in Parser::new(markdown) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak
            | Event::HardBreak
            | Event::End(TagEnd::Item | TagEnd::Paragraph) => {
                if !text.ends_with(' ') {
                    text.push(' ');
                }
            }
            _ => {}
        }
    }
    text.trim_end().to_string()
}
