//! # UniTalks core
//!
//! UniTalks is an editor for structured interview scripts: a guest, ordered
//! sections, and per-section variations of questions. This crate is the
//! **UI-agnostic core** of that editor — the data model, id allocation,
//! snapshotting, local persistence, and file import/export. Rendering,
//! toasts, modals, and every other presentation concern belong to the
//! consuming UI.
//!
//! ## Layering
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  UI layer (external)                                     │
//! │  - collects edits, shows lists, presents errors          │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  API facade (api.rs)                                     │
//! │  - entity construction with defaults                     │
//! │  - save / list / load / delete / import / export         │
//! │  - resyncs the id allocator when foreign data enters     │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  Core (model, alloc, payload, io, util)                  │
//! │  - pure logic, no I/O assumptions                        │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  Storage (store/)                                        │
//! │  - StorageMedium trait                                   │
//! │  - FileMedium (production), MemoryMedium (testing)       │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persistence shape
//!
//! Two tables over one key-value medium: a **manifest** (array of
//! [`payload::ManifestEntry`], newest first) for listing scripts without
//! loading bodies, and a **bodies** table (id → [`payload::Payload`]).
//! Exported files are single pretty-printed JSON documents named from the
//! sanitized script title.
//!
//! ## Module overview
//!
//! - [`api`]: the facade — entry point for all operations
//! - [`model`]: entities (`Question`, `Variation`, `Section`, `Guest`) and
//!   their factory constructors
//! - [`alloc`]: per-kind monotonic id allocation
//! - [`payload`]: snapshot building, derived metadata, manifest projection
//! - [`store`]: the key-value storage abstraction and the script store
//! - [`io`]: file export and the parse half of import
//! - [`util`]: filename sanitization
//! - [`error`]: error types

pub mod alloc;
pub mod api;
pub mod error;
pub mod io;
pub mod model;
pub mod payload;
pub mod store;
pub mod util;

pub use alloc::{IdAllocator, IdKind};
pub use api::ScriptApi;
pub use error::{Result, ScriptError};
pub use model::{Guest, Question, Section, SectionKind, Variation};
pub use payload::{build_payload, ManifestEntry, Payload, PayloadOptions, ScriptMeta};
pub use store::{fs::FileMedium, memory::MemoryMedium, ScriptStore, StorageMedium};
