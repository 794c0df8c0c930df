//! # Persistence layer
//!
//! Scripts are persisted in two tables over a plain key-value medium:
//!
//! - the **manifest** key holds a JSON array of [`ManifestEntry`], newest
//!   first, so the UI can list every known script without loading bodies;
//! - the **bodies** key holds a JSON object mapping script id to full
//!   [`Payload`].
//!
//! The medium itself is abstracted behind [`StorageMedium`] so the same
//! store logic runs against an in-memory map in tests and a directory of
//! files in production; see [`memory::MemoryMedium`] and [`fs::FileMedium`].
//!
//! The two tables are written independently; the medium offers no
//! transactions. A failure between the manifest write and the body write can
//! leave a manifest entry whose body lookup returns `None`, and callers must
//! treat such an entry as deleted. Corrupted table JSON is swallowed and
//! replaced with an empty default so the editor stays usable; only medium
//! I/O faults surface as errors.

use std::collections::HashMap;

use chrono::Utc;
use serde_json::Value;

use crate::error::{Result, ScriptError};
use crate::payload::{generate_script_id, ManifestEntry, Payload};

pub mod fs;
pub mod memory;

/// Key under which the manifest array is stored.
pub const MANIFEST_KEY: &str = "unitalks-manifest";
/// Key under which the id → payload body map is stored.
pub const BODIES_KEY: &str = "unitalks-scripts";

/// Abstract key-value medium. `get` of an unset key yields `Ok(None)`;
/// `remove` of an unset key is a no-op.
pub trait StorageMedium {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Script persistence over a [`StorageMedium`].
pub struct ScriptStore<M: StorageMedium> {
    medium: M,
}

impl<M: StorageMedium> ScriptStore<M> {
    pub fn new(medium: M) -> Self {
        Self { medium }
    }

    /// The manifest, newest first. Unset or corrupted table → empty.
    pub fn manifest(&self) -> Result<Vec<ManifestEntry>> {
        let raw = self.medium.get(MANIFEST_KEY)?;
        Ok(raw
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default())
    }

    /// The full id → payload map. Unset or corrupted table → empty.
    pub fn bodies(&self) -> Result<HashMap<String, Payload>> {
        let raw = self.medium.get(BODIES_KEY)?;
        Ok(raw
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default())
    }

    /// Upsert the payload's manifest projection: an existing entry with the
    /// same id is replaced in place, a new one is prepended.
    pub fn save_to_manifest(&mut self, payload: &Payload) -> Result<()> {
        let mut manifest = self.manifest()?;
        let entry = ManifestEntry::from_payload(payload);
        if let Some(existing) = manifest.iter_mut().find(|e| e.id == entry.id) {
            *existing = entry;
        } else {
            manifest.insert(0, entry);
        }
        self.write_manifest(&manifest)
    }

    /// Upsert the full payload under its id.
    pub fn save_body(&mut self, payload: &Payload) -> Result<()> {
        let mut bodies = self.bodies()?;
        bodies.insert(payload.id.clone(), payload.clone());
        self.write_bodies(&bodies)
    }

    /// Manifest write, then body write. Not transactional: a fault between
    /// the two leaves an orphaned manifest entry (see module docs).
    pub fn persist(&mut self, payload: &Payload) -> Result<()> {
        self.save_to_manifest(payload)?;
        self.save_body(payload)
    }

    /// Body lookup; `None` is the missing/deleted sentinel.
    pub fn get_script(&self, id: &str) -> Result<Option<Payload>> {
        let mut bodies = self.bodies()?;
        Ok(bodies.remove(id))
    }

    /// Remove both the manifest entry and the body for `id`. Each write is
    /// independent; deleting an unknown id is a no-op.
    pub fn delete_script(&mut self, id: &str) -> Result<()> {
        let mut manifest = self.manifest()?;
        manifest.retain(|e| e.id != id);
        self.write_manifest(&manifest)?;

        let mut bodies = self.bodies()?;
        bodies.remove(id);
        self.write_bodies(&bodies)
    }

    /// Validate a parsed JSON document as a script and persist it. The only
    /// structural requirement checked up front is a `sections` field; absent
    /// `id`/`savedAt` are filled in before decoding. Nothing is written
    /// unless validation and decoding both succeed.
    pub fn import_payload(&mut self, mut value: Value) -> Result<Payload> {
        let obj = value.as_object_mut().ok_or(ScriptError::NotAScript)?;
        if !obj.contains_key("sections") {
            return Err(ScriptError::NotAScript);
        }

        if !obj.get("id").map_or(false, Value::is_string) {
            obj.insert("id".to_string(), Value::String(generate_script_id()));
        }
        if !obj.contains_key("savedAt") {
            obj.insert("savedAt".to_string(), serde_json::to_value(Utc::now())?);
        }

        let payload: Payload =
            serde_json::from_value(value).map_err(|_| ScriptError::NotAScript)?;
        self.persist(&payload)?;
        Ok(payload)
    }

    fn write_manifest(&mut self, manifest: &[ManifestEntry]) -> Result<()> {
        let raw = serde_json::to_string(manifest)?;
        self.medium.set(MANIFEST_KEY, &raw)
    }

    fn write_bodies(&mut self, bodies: &HashMap<String, Payload>) -> Result<()> {
        let raw = serde_json::to_string(bodies)?;
        self.medium.set(BODIES_KEY, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::IdAllocator;
    use crate::model::{Guest, Section, SectionKind};
    use crate::payload::{build_payload, PayloadOptions};
    use super::memory::MemoryMedium;

    fn store() -> ScriptStore<MemoryMedium> {
        ScriptStore::new(MemoryMedium::new())
    }

    fn payload_titled(title: &str) -> Payload {
        let mut ids = IdAllocator::new();
        let sections = vec![Section::new(&mut ids, "Main", 10, SectionKind::Qa)];
        build_payload(
            &Guest::new("Anna", "Author"),
            &sections,
            PayloadOptions {
                id: Some(format!("ut-{}", title)),
                title: Some(title.to_string()),
                ..Default::default()
            },
        )
    }

    #[test]
    fn persist_then_get_returns_deep_equal_payload() {
        let mut store = store();
        let payload = payload_titled("A");
        store.persist(&payload).unwrap();

        let loaded = store.get_script(&payload.id).unwrap();
        assert_eq!(loaded, Some(payload));
    }

    #[test]
    fn persist_keeps_manifest_and_bodies_in_sync() {
        let mut store = store();
        let a = payload_titled("A");
        let b = payload_titled("B");
        store.persist(&a).unwrap();
        store.persist(&b).unwrap();

        let manifest = store.manifest().unwrap();
        let bodies = store.bodies().unwrap();
        assert_eq!(manifest.len(), 2);
        for entry in &manifest {
            assert!(bodies.contains_key(&entry.id));
        }
    }

    #[test]
    fn new_entries_prepend_existing_update_in_place() {
        let mut store = store();
        let a = payload_titled("A");
        let b = payload_titled("B");
        store.persist(&a).unwrap();
        store.persist(&b).unwrap();
        // Newest first.
        let manifest = store.manifest().unwrap();
        assert_eq!(manifest[0].id, b.id);
        assert_eq!(manifest[1].id, a.id);

        // Re-saving A must not move it back to the front.
        let mut a2 = a.clone();
        a2.notes = "updated".to_string();
        store.persist(&a2).unwrap();
        let manifest = store.manifest().unwrap();
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest[0].id, b.id);
        assert_eq!(manifest[1].id, a.id);
        assert_eq!(manifest[1].notes, "updated");
    }

    #[test]
    fn delete_removes_manifest_entry_and_body() {
        let mut store = store();
        let payload = payload_titled("A");
        store.persist(&payload).unwrap();
        store.delete_script(&payload.id).unwrap();

        assert_eq!(store.get_script(&payload.id).unwrap(), None);
        assert!(store.manifest().unwrap().is_empty());
    }

    #[test]
    fn corrupted_tables_fail_soft_to_empty() {
        let mut medium = MemoryMedium::new();
        medium.set(MANIFEST_KEY, "not json at all").unwrap();
        medium.set(BODIES_KEY, "{ truncated").unwrap();
        let store = ScriptStore::new(medium);

        assert!(store.manifest().unwrap().is_empty());
        assert!(store.bodies().unwrap().is_empty());
    }

    #[test]
    fn import_without_sections_fails_and_writes_nothing() {
        let mut store = store();
        let err = store
            .import_payload(serde_json::json!({ "notes": "x" }))
            .unwrap_err();
        assert!(matches!(err, ScriptError::NotAScript));
        assert!(store.manifest().unwrap().is_empty());
        assert!(store.bodies().unwrap().is_empty());
    }

    #[test]
    fn import_fills_missing_id_and_saved_at() {
        let mut store = store();
        let imported = store
            .import_payload(serde_json::json!({
                "title": "Borrowed",
                "sections": [
                    { "id": 1, "name": "Main", "time": 4, "type": "topic",
                      "variations": [ { "id": 1, "label": "Questions",
                        "questions": [ { "id": 1, "text": "Q?" } ] } ] }
                ]
            }))
            .unwrap();

        assert!(imported.id.starts_with("ut-"));
        assert_eq!(imported.title, "Borrowed");
        assert_eq!(store.get_script(&imported.id).unwrap(), Some(imported));
    }

    #[test]
    fn import_preserves_existing_id() {
        let mut store = store();
        let imported = store
            .import_payload(serde_json::json!({
                "id": "ut-123",
                "savedAt": "2024-05-01T10:00:00Z",
                "sections": []
            }))
            .unwrap();
        assert_eq!(imported.id, "ut-123");
        assert!(store.get_script("ut-123").unwrap().is_some());
    }
}
