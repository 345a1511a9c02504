//! Coach identities.
//!
//! Coaches are named after the persona files the server keeps, e.g.
//! `wellness_warrior.json` is presented as "Wellness Warrior" and addressed as
//! `wellnesswarrior` in URLs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coach {
    /// Name shown to the user and sent as `coach_name`
    pub name: String,
    /// Lower-case name without spaces
    pub url_name: String,
}

impl Coach {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let url_name = url_name(&name);
        Self { name, url_name }
    }

    /// Build a coach from a persona file stem such as `career_catalyst`
    pub fn from_file_stem(stem: &str) -> Self {
        Self::new(title_case(&stem.replace('_', " ")))
    }

    /// Persona file name the server looks up for this coach
    pub fn persona_file_name(&self) -> String {
        format!("{}.json", self.name.to_lowercase().replace(' ', "_"))
    }
}

fn url_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "")
}

/// Upper-case the first letter of every word and lower-case the rest
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file_stem() {
        let coach = Coach::from_file_stem("wellness_warrior");
        assert_eq!(coach.name, "Wellness Warrior");
        assert_eq!(coach.url_name, "wellnesswarrior");
    }

    #[test]
    fn test_title_case_lowers_inner_letters() {
        assert_eq!(Coach::from_file_stem("AIYODA").name, "Aiyoda");
        assert_eq!(Coach::from_file_stem("personal_growth_guru").name, "Personal Growth Guru");
    }

    #[test]
    fn test_persona_file_name() {
        let coach = Coach::new("Executive Coach");
        assert_eq!(coach.persona_file_name(), "executive_coach.json");
        assert_eq!(coach.url_name, "executivecoach");
    }
}
