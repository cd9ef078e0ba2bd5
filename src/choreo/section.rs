//! Content sections and the order the page walks through them

use std::fmt;

use serde::{Deserialize, Serialize};

/// A content section reached by focusing its body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    AboutMe,
    Experience,
    Projects,
    Testimonials,
    Education,
}

impl Section {
    /// Every section, in page order
    pub const ALL: [Section; 5] = [
        Section::AboutMe,
        Section::Experience,
        Section::Projects,
        Section::Testimonials,
        Section::Education,
    ];

    /// Label of the body that leads to this section
    pub fn label(&self) -> &'static str {
        match self {
            Section::AboutMe => "About Me",
            Section::Experience => "Experience",
            Section::Projects => "Projects",
            Section::Testimonials => "Testimonials",
            Section::Education => "Education",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.label().eq_ignore_ascii_case(label))
    }

    /// DOM id of the section container
    pub fn element_id(&self) -> &'static str {
        match self {
            Section::AboutMe => "about-me-section",
            Section::Experience => "experience-section",
            Section::Projects => "projects-section",
            Section::Testimonials => "testimonials-section",
            Section::Education => "education-section",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Section::AboutMe => 0,
            Section::Experience => 1,
            Section::Projects => 2,
            Section::Testimonials => 3,
            Section::Education => 4,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A stop in the page ring: the hero or one of the sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stop {
    Hero,
    Section(Section),
}

impl Stop {
    const RING: [Stop; 6] = [
        Stop::Hero,
        Stop::Section(Section::AboutMe),
        Stop::Section(Section::Experience),
        Stop::Section(Section::Projects),
        Stop::Section(Section::Testimonials),
        Stop::Section(Section::Education),
    ];

    fn position(&self) -> usize {
        match self {
            Stop::Hero => 0,
            Stop::Section(s) => s.index() + 1,
        }
    }

    pub fn next(&self) -> Stop {
        Self::RING[(self.position() + 1) % Self::RING.len()]
    }

    pub fn previous(&self) -> Stop {
        let len = Self::RING.len();
        Self::RING[(self.position() + len - 1) % len]
    }
}

/// Which section is on screen; at most one by construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Visibility {
    pub section: Option<Section>,
    /// The Contact overlay is showing (and suppresses every section)
    pub contact: bool,
}

impl Visibility {
    pub fn is_shown(&self, section: Section) -> bool {
        self.section == Some(section)
    }

    /// One flag per section, in page order
    pub fn flags(&self) -> [(Section, bool); 5] {
        Section::ALL.map(|s| (s, self.is_shown(s)))
    }

    pub fn any_section(&self) -> bool {
        self.section.is_some()
    }
}
