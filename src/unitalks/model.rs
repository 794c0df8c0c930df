use serde::{Deserialize, Serialize};

use crate::alloc::{IdAllocator, IdKind};

pub const DEFAULT_VARIATION_LABEL: &str = "Questions";
pub const DEFAULT_SECTION_NAME: &str = "New Section";
pub const DEFAULT_SECTION_TIME: u32 = 5;

/// The block type of a section within an interview outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Intro,
    Qa,
    Topic,
    Outro,
}

impl Default for SectionKind {
    fn default() -> Self {
        SectionKind::Qa
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub tip: String,
}

impl Question {
    pub fn new(ids: &mut IdAllocator, text: impl Into<String>, tip: impl Into<String>) -> Self {
        Self {
            id: ids.next(IdKind::Question),
            text: text.into(),
            tip: tip.into(),
        }
    }

    pub fn empty(ids: &mut IdAllocator) -> Self {
        Self::new(ids, "", "")
    }
}

/// An alternative phrasing/grouping of questions within a section. All
/// variations are stored; which one is "in use" is a UI concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Variation {
    /// A fresh variation seeded with exactly one empty question.
    pub fn new(ids: &mut IdAllocator, label: impl Into<String>) -> Self {
        let questions = vec![Question::empty(ids)];
        Self::with_questions(ids, label, questions)
    }

    pub fn with_questions(
        ids: &mut IdAllocator,
        label: impl Into<String>,
        questions: Vec<Question>,
    ) -> Self {
        Self {
            id: ids.next(IdKind::Variation),
            label: label.into(),
            collapsed: false,
            questions,
        }
    }
}

/// A named, timed block of the interview. Owns its variations exclusively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    /// Planned duration in minutes.
    #[serde(default)]
    pub time: u32,
    #[serde(rename = "type", default)]
    pub kind: SectionKind,
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default)]
    pub variations: Vec<Variation>,
}

impl Section {
    /// A fresh section seeded with one default variation (which in turn
    /// holds one empty question).
    pub fn new(
        ids: &mut IdAllocator,
        name: impl Into<String>,
        time: u32,
        kind: SectionKind,
    ) -> Self {
        let variations = vec![Variation::new(ids, DEFAULT_VARIATION_LABEL)];
        Self::with_variations(ids, name, time, kind, variations)
    }

    pub fn with_variations(
        ids: &mut IdAllocator,
        name: impl Into<String>,
        time: u32,
        kind: SectionKind,
        variations: Vec<Variation>,
    ) -> Self {
        Self {
            id: ids.next(IdKind::Section),
            name: name.into(),
            time,
            kind,
            collapsed: false,
            variations,
        }
    }
}

/// The interviewee a script is written for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub achievements: Vec<String>,
}

impl Guest {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            achievements: Vec::new(),
        }
    }
}
