//! # API facade
//!
//! [`ScriptApi`] is the single entry point a UI layer talks to. It owns the
//! persistence store and the editing session's id allocator, dispatches to
//! the core modules, and returns structured `Result` types. It never prints,
//! never assumes a terminal or a browser, and never reaches outside its
//! storage medium.
//!
//! Generic over [`StorageMedium`]:
//! - Production: `ScriptApi<FileMedium>`
//! - Testing: `ScriptApi<MemoryMedium>`
//!
//! The facade also enforces the allocator invariant the UI must never think
//! about: whenever foreign data enters the session (loading a stored script,
//! importing a file), the id counters are resynced past every id in that
//! document before the UI can allocate again.

use std::path::{Path, PathBuf};

use crate::alloc::IdAllocator;
use crate::error::{Result, ScriptError};
use crate::io;
use crate::model::{
    Guest, Question, Section, SectionKind, Variation, DEFAULT_SECTION_NAME, DEFAULT_SECTION_TIME,
    DEFAULT_VARIATION_LABEL,
};
use crate::payload::{build_payload, ManifestEntry, Payload, PayloadOptions};
use crate::store::{ScriptStore, StorageMedium};

pub struct ScriptApi<M: StorageMedium> {
    store: ScriptStore<M>,
    ids: IdAllocator,
}

impl<M: StorageMedium> ScriptApi<M> {
    pub fn new(medium: M) -> Self {
        Self {
            store: ScriptStore::new(medium),
            ids: IdAllocator::new(),
        }
    }

    pub fn new_question(&mut self) -> Question {
        Question::empty(&mut self.ids)
    }

    pub fn new_variation(&mut self) -> Variation {
        Variation::new(&mut self.ids, DEFAULT_VARIATION_LABEL)
    }

    pub fn new_section(&mut self) -> Section {
        Section::new(
            &mut self.ids,
            DEFAULT_SECTION_NAME,
            DEFAULT_SECTION_TIME,
            SectionKind::default(),
        )
    }

    pub fn new_section_with(&mut self, name: &str, time: u32, kind: SectionKind) -> Section {
        Section::new(&mut self.ids, name, time, kind)
    }

    /// Snapshot the editing state and persist it. Returns the stored
    /// payload, whose id the UI should keep for subsequent saves.
    pub fn save_script(
        &mut self,
        guest: &Guest,
        sections: &[Section],
        options: PayloadOptions,
    ) -> Result<Payload> {
        let payload = build_payload(guest, sections, options);
        self.store.persist(&payload)?;
        Ok(payload)
    }

    /// The manifest, newest first, without loading any script bodies.
    pub fn list_scripts(&self) -> Result<Vec<ManifestEntry>> {
        self.store.manifest()
    }

    /// Load a stored script for re-editing and resync the id allocator to
    /// its section tree. A manifest entry whose body is missing (partial
    /// write, corruption) surfaces as `ScriptNotFound`.
    pub fn load_script(&mut self, id: &str) -> Result<Payload> {
        let payload = self
            .store
            .get_script(id)?
            .ok_or_else(|| ScriptError::ScriptNotFound(id.to_string()))?;
        self.ids.resync(&payload.sections);
        Ok(payload)
    }

    pub fn delete_script(&mut self, id: &str) -> Result<()> {
        self.store.delete_script(id)
    }

    /// Write `payload` as a pretty-printed `.json` file into `dir`.
    pub fn export_script(&self, payload: &Payload, dir: &Path) -> Result<PathBuf> {
        io::export_script(payload, dir)
    }

    /// Read a script file, validate and persist it, and resync the id
    /// allocator to the imported tree. Two stages: `io::import_script`
    /// parses, `ScriptStore::import_payload` validates and stores.
    pub fn import_file(&mut self, path: &Path) -> Result<Payload> {
        let value = io::import_script(path)?;
        let payload = self.store.import_payload(value)?;
        self.ids.resync(&payload.sections);
        Ok(payload)
    }

    pub fn ids(&self) -> &IdAllocator {
        &self.ids
    }
}
