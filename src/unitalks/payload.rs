//! Snapshotting the editing state into a versioned, timestamped payload.
//!
//! A [`Payload`] is one complete script document: guest, sections, and
//! derived metadata. It owns independent copies of its inputs, so later
//! edits to the in-memory state never reach a payload that was already
//! persisted or exported. A [`ManifestEntry`] is the projection of a payload
//! used for listing scripts without loading their section bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Guest, Section};
use crate::util::script_filename;

/// Schema version stamped into every payload.
pub const SCRIPT_VERSION: u32 = 1;

/// Derived totals, recomputed on every build. Never hand-edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptMeta {
    #[serde(default)]
    pub total_questions: usize,
    /// Sum of section times, in minutes.
    #[serde(default)]
    pub total_time: u32,
    #[serde(default)]
    pub section_count: usize,
}

impl ScriptMeta {
    pub fn compute(sections: &[Section]) -> Self {
        Self {
            total_questions: sections
                .iter()
                .flat_map(|s| &s.variations)
                .map(|v| v.questions.len())
                .sum(),
            total_time: sections.iter().map(|s| s.time).sum(),
            section_count: sections.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    #[serde(default)]
    pub guest: Guest,
    pub sections: Vec<Section>,
    #[serde(default)]
    pub meta: ScriptMeta,
}

/// Manifest index record: everything needed to list a script except its
/// section bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub id: String,
    pub filename: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub notes: String,
    pub saved_at: DateTime<Utc>,
    #[serde(default)]
    pub meta: ScriptMeta,
    #[serde(default)]
    pub guest: Guest,
}

impl ManifestEntry {
    pub fn from_payload(payload: &Payload) -> Self {
        Self {
            id: payload.id.clone(),
            filename: script_filename(&payload.title),
            title: payload.title.clone(),
            notes: payload.notes.clone(),
            saved_at: payload.saved_at,
            meta: payload.meta.clone(),
            guest: payload.guest.clone(),
        }
    }
}

/// Optional overrides for [`build_payload`]. Anything left `None` is
/// generated.
#[derive(Debug, Clone, Default)]
pub struct PayloadOptions {
    pub id: Option<String>,
    pub title: Option<String>,
    pub notes: Option<String>,
}

/// A fresh payload id: `ut-` plus the current epoch milliseconds.
pub fn generate_script_id() -> String {
    format!("ut-{}", Utc::now().timestamp_millis())
}

/// Snapshot `guest` and `sections` into a payload. Metadata is recomputed
/// from the section tree; the inputs are cloned in, never borrowed, so the
/// returned payload is isolated from later mutation of the editing state.
pub fn build_payload(guest: &Guest, sections: &[Section], options: PayloadOptions) -> Payload {
    Payload {
        id: options.id.unwrap_or_else(generate_script_id),
        title: options
            .title
            .unwrap_or_else(|| format!("{} — UniTalks", guest.name)),
        notes: options.notes.unwrap_or_default(),
        version: SCRIPT_VERSION,
        saved_at: Utc::now(),
        guest: guest.clone(),
        sections: sections.to_vec(),
        meta: ScriptMeta::compute(sections),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::IdAllocator;
    use crate::model::{Question, SectionKind, Variation};

    fn sample_sections(ids: &mut IdAllocator) -> Vec<Section> {
        let mut qa = Section::new(ids, "Main", 10, SectionKind::Qa);
        let alt_questions = vec![
            Question::new(ids, "First?", ""),
            Question::new(ids, "Second?", "follow up"),
        ];
        qa.variations
            .push(Variation::with_questions(ids, "Alt", alt_questions));
        let outro = Section::new(ids, "Wrap", 3, SectionKind::Outro);
        vec![qa, outro]
    }

    #[test]
    fn meta_counts_questions_across_all_variations() {
        let mut ids = IdAllocator::new();
        let sections = sample_sections(&mut ids);
        let meta = ScriptMeta::compute(&sections);
        // 1 seeded + 2 in the alternative variation + 1 seeded in the outro.
        assert_eq!(meta.total_questions, 4);
        assert_eq!(meta.total_time, 13);
        assert_eq!(meta.section_count, 2);
    }

    #[test]
    fn intro_scenario_yields_expected_meta_and_title() {
        let mut ids = IdAllocator::new();
        let section = Section::new(&mut ids, "Intro", 2, SectionKind::Intro);
        let guest = Guest::new("Anna", "Author");
        let payload = build_payload(
            &guest,
            &[section],
            PayloadOptions {
                title: Some("T".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(payload.meta.total_questions, 1);
        assert_eq!(payload.meta.total_time, 2);
        assert_eq!(payload.meta.section_count, 1);
        assert_eq!(payload.title, "T");
        assert_eq!(payload.version, SCRIPT_VERSION);
    }

    #[test]
    fn generated_defaults_for_id_and_title() {
        let guest = Guest::new("Anna", "Author");
        let payload = build_payload(&guest, &[], PayloadOptions::default());
        assert!(payload.id.starts_with("ut-"));
        assert_eq!(payload.title, "Anna — UniTalks");
        assert_eq!(payload.notes, "");
    }

    #[test]
    fn payload_is_isolated_from_later_input_mutation() {
        let mut ids = IdAllocator::new();
        let mut sections = sample_sections(&mut ids);
        let guest = Guest::new("Anna", "Author");
        let payload = build_payload(&guest, &sections, PayloadOptions::default());

        sections[0].name = "Renamed".to_string();
        sections[0].variations[0].questions[0].text = "Changed?".to_string();

        assert_eq!(payload.sections[0].name, "Main");
        assert_eq!(payload.sections[0].variations[0].questions[0].text, "");
    }

    #[test]
    fn serialize_parse_round_trip_is_lossless() {
        let mut ids = IdAllocator::new();
        let sections = sample_sections(&mut ids);
        let guest = Guest::new("Анна", "Автор");
        let payload = build_payload(&guest, &sections, PayloadOptions::default());

        let json = serde_json::to_string_pretty(&payload).unwrap();
        let parsed: Payload = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, payload);
    }

    #[test]
    fn manifest_entry_projects_without_sections() {
        let mut ids = IdAllocator::new();
        let sections = sample_sections(&mut ids);
        let guest = Guest::new("Anna", "Author");
        let payload = build_payload(
            &guest,
            &sections,
            PayloadOptions {
                title: Some("My Show / Ep 1".to_string()),
                ..Default::default()
            },
        );

        let entry = ManifestEntry::from_payload(&payload);
        assert_eq!(entry.id, payload.id);
        assert_eq!(entry.filename, "My-Show-Ep-1.json");
        assert_eq!(entry.meta, payload.meta);
        assert_eq!(entry.guest, payload.guest);

        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("sections").is_none());
        assert!(json.get("savedAt").is_some());
    }
}
