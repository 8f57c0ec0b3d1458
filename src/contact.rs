use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

pub const MAIL_SUBJECT: &str = "Portfolio Contact Form Submission";

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z]+$").unwrap());
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$").unwrap());

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    #[error("Please fill in all mandatory fields ({0} is missing)")]
    MissingField(&'static str),

    #[error("Names must contain only letters")]
    InvalidName,

    #[error("Please enter a valid email address")]
    InvalidEmail,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    /// Checks mandatory fields first, then name and email formats.
    pub fn validate(&self) -> Result<(), ContactError> {
        let mandatory = [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("email", &self.email),
            ("message", &self.message),
        ];
        if let Some((field, _)) = mandatory.iter().find(|(_, value)| value.is_empty()) {
            return Err(ContactError::MissingField(*field));
        }

        if !NAME_RE.is_match(&self.first_name) || !NAME_RE.is_match(&self.last_name) {
            return Err(ContactError::InvalidName);
        }

        if !EMAIL_RE.is_match(&self.email) {
            return Err(ContactError::InvalidEmail);
        }

        Ok(())
    }

    pub fn body(&self) -> String {
        let mobile = self
            .mobile
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or("N/A");

        format!(
            "First Name: {}\nLast Name: {}\nE-mail: {}\nMobile: {}\nMessage:\n{}",
            self.first_name, self.last_name, self.email, mobile, self.message
        )
    }

    /// Validates the form and composes a `mailto:` URL addressed to `recipient`.
    pub fn mailto_url(&self, recipient: &str) -> Result<String, ContactError> {
        self.validate()?;

        Ok(format!(
            "mailto:{}?subject={}&body={}",
            recipient,
            encode_component(MAIL_SUBJECT),
            encode_component(&self.body())
        ))
    }
}

/// Bare `mailto:` link used by the "Hire Me" button.
pub fn hire_me_url(recipient: &str) -> String {
    format!("mailto:{}", recipient)
}

/// Percent-encodes like `encodeURIComponent`: spaces become `%20`, not `+`.
fn encode_component(value: &str) -> String {
    // form encoding escapes a literal '+' as %2B, so any '+' left is a space
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
