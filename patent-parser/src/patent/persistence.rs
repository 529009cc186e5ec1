//! Opt-in persistence of sections
//!
//! Nothing in cleaning or segmentation writes anywhere. A caller that wants the sections on disk
//! hands them to a [`SectionSink`]. Each [`Slot`] holds one text; writing a slot again replaces
//! it. Slots a split did not produce are skipped rather than written empty.

use crate::patent::sections::{PatentSections, Slot};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("cannot create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {slot} text to {path}: {source}")]
    Write {
        slot: Slot,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Destination for section texts
pub trait SectionSink {
    fn write(&mut self, slot: Slot, text: &str) -> Result<(), PersistenceError>;
}

/// Writes each slot to `<dir>/<slot>_text.txt`
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, slot: Slot) -> PathBuf {
        self.dir.join(slot.file_name())
    }
}

impl SectionSink for DirectorySink {
    fn write(&mut self, slot: Slot, text: &str) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.dir).map_err(|source| PersistenceError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path_for(slot);
        fs::write(&path, text).map_err(|source| PersistenceError::Write {
            slot,
            path: path.clone(),
            source,
        })?;
        log::info!("wrote {} text to {}", slot, path.display());
        Ok(())
    }
}

/// Keeps slot texts in memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
    pub slots: BTreeMap<Slot, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: Slot) -> Option<&str> {
        self.slots.get(&slot).map(String::as_str)
    }
}

impl SectionSink for MemorySink {
    fn write(&mut self, slot: Slot, text: &str) -> Result<(), PersistenceError> {
        self.slots.insert(slot, text.to_string());
        Ok(())
    }
}

/// Write every slot `sections` carries, returning the slots written
pub fn persist_sections<S: SectionSink + ?Sized>(
    sections: &PatentSections,
    sink: &mut S,
) -> Result<Vec<Slot>, PersistenceError> {
    let mut written = Vec::new();
    for slot in Slot::ALL {
        if let Some(text) = sections.get(slot) {
            sink.write(slot, text)?;
            written.push(slot);
        }
    }
    Ok(written)
}

/// Write the drawings text produced by a drawings read
pub fn persist_drawings<S: SectionSink + ?Sized>(
    drawings: &str,
    sink: &mut S,
) -> Result<Slot, PersistenceError> {
    sink.write(Slot::Drawings, drawings)?;
    Ok(Slot::Drawings)
}
