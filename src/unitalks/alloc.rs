//! Per-kind id allocation.
//!
//! Sections, variations and questions carry small integer ids that must be
//! unique and strictly increasing per kind within an editing session. The
//! allocator is an explicit value passed by `&mut` into the factory
//! constructors, so independent documents can each own their own sequence.
//! After loading or importing foreign data, call [`IdAllocator::resync`] to
//! raise the counters past every id already present in the document.

use crate::model::Section;

/// The three entity kinds that receive allocator-issued ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdKind {
    Section,
    Variation,
    Question,
}

/// Monotonic id counters, one per [`IdKind`]. The first issued id is 1.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    section: u64,
    variation: u64,
    question: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh id, strictly greater than every id previously issued
    /// for `kind`.
    pub fn next(&mut self, kind: IdKind) -> u64 {
        let counter = match kind {
            IdKind::Section => &mut self.section,
            IdKind::Variation => &mut self.variation,
            IdKind::Question => &mut self.question,
        };
        *counter += 1;
        *counter
    }

    /// Zero all counters.
    pub fn reset_all(&mut self) {
        *self = Self::default();
    }

    /// Rebuild the counters from an existing section tree: each counter is
    /// reset, then raised to the maximum id observed for its kind, so the
    /// next allocation cannot collide with imported data.
    pub fn resync(&mut self, sections: &[Section]) {
        self.reset_all();
        for section in sections {
            self.section = self.section.max(section.id);
            for variation in &section.variations {
                self.variation = self.variation.max(variation.id);
                for question in &variation.questions {
                    self.question = self.question.max(question.id);
                }
            }
        }
    }
}
