//! Welcome text for returning visitors.

use serde::Serialize;

use crate::domain::{Partner, Profile};

/// Two-line greeting shown on the welcome view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Greeting {
    pub title: String,
    pub company: String,
}

/// Build the greeting for a partner and, when known, the redeeming profile.
///
/// # Examples
/// ```
/// use backend::domain::Partner;
/// use backend::presentation::greeting;
///
/// let text = greeting(&Partner::new("Terveystalo", "Health first", "#005b8e"), None);
/// assert_eq!(text.title, "Welcome");
/// assert_eq!(text.company, "Greetings from Terveystalo — Health first");
/// ```
pub fn greeting(partner: &Partner, profile: Option<&Profile>) -> Greeting {
    let title = match profile {
        Some(profile) => format!("Welcome back, {}", profile.first_name),
        None => "Welcome".to_owned(),
    };

    let company = match (partner.name.trim(), partner.tagline.trim()) {
        ("", _) => "Greetings!".to_owned(),
        (name, "") => format!("Greetings from {name}"),
        (name, tagline) => format!("Greetings from {name} — {tagline}"),
    };

    Greeting { title, company }
}
