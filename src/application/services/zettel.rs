//! Note service
//!
//! Binds the identifier scheme to a directory of note files:
//! `<notes_dir>/<identifier>.<extension>`.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{debug, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{render, Identifier, Note, RenderedNode};
use crate::infrastructure::traits::FileSystem;

/// Breakdown of an identifier for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierInfo {
    pub id: String,
    /// Levels as written, e.g. `["a1", "b"]`
    pub levels: Vec<String>,
    /// Prefix-tree path, e.g. `["a", "1", "b"]`
    pub segments: Vec<String>,
    pub depth: usize,
    pub exists: bool,
    pub next_child: String,
}

/// Service for allocating, reading, writing and listing notes.
pub struct ZettelService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
    // serializes "probe existence -> write" within this process
    allocation: Mutex<()>,
}

impl ZettelService {
    /// Create a new note service.
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self {
            fs,
            settings,
            allocation: Mutex::new(()),
        }
    }

    pub fn notes_dir(&self) -> &Path {
        &self.settings.notes_dir
    }

    /// Path of the note body for `id`.
    pub fn note_path(&self, id: &Identifier) -> PathBuf {
        self.settings
            .notes_dir
            .join(format!("{}.{}", id, self.settings.extension))
    }

    pub fn note(&self, id: &Identifier) -> Note {
        Note::new(id.to_string(), self.note_path(id))
    }

    pub fn exists(&self, id: &Identifier) -> bool {
        self.fs.exists(&self.note_path(id))
    }

    /// Next free child of `parent`, without creating it.
    #[instrument(level = "debug", skip(self, parent), fields(parent = %parent))]
    pub fn next_child(&self, parent: &Identifier) -> Identifier {
        parent.next_child(|candidate| self.exists(candidate))
    }

    /// Allocate the next free child of `parent` and write its body.
    ///
    /// A note created concurrently by another process between probe and write
    /// surfaces as [`ApplicationError::NoteExists`]; nothing is overwritten.
    #[instrument(level = "debug", skip(self, parent, content), fields(parent = %parent))]
    pub fn create_child(&self, parent: &Identifier, content: &str) -> ApplicationResult<Note> {
        let _guard = self
            .allocation
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if !parent.is_root() && !self.exists(parent) {
            warn!("parent {} has no note, creating child anyway", parent);
        }

        let notes_dir = self.notes_dir();
        self.fs
            .create_dir_all(notes_dir)
            .with_path_context("create notes directory", notes_dir)?;

        let id = self.next_child(parent);
        let note = self.note(&id);
        match self.fs.write_new(&note.path, content) {
            Ok(()) => {
                debug!("created note {}", note.id);
                Ok(note)
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                Err(ApplicationError::NoteExists(note.id))
            }
            Err(e) => Err(e).with_path_context("write note", &note.path),
        }
    }

    /// Read the body of an existing note.
    pub fn read(&self, id: &Identifier) -> ApplicationResult<String> {
        let path = self.note_path(id);
        if !self.fs.exists(&path) {
            return Err(ApplicationError::NoteNotFound(id.to_string()));
        }
        self.fs
            .read_to_string(&path)
            .with_path_context("read note", &path)
    }

    /// Write (create or replace) the body of a note.
    pub fn write(&self, id: &Identifier, content: &str) -> ApplicationResult<Note> {
        let note = self.note(id);
        self.fs
            .ensure_parent(&note.path)
            .with_path_context("create notes directory", &note.path)?;
        self.fs
            .write(&note.path, content)
            .with_path_context("write note", &note.path)?;
        Ok(note)
    }

    /// Delete a note file.
    pub fn discard(&self, note: &Note) -> ApplicationResult<()> {
        debug!("discarding note {}", note.id);
        self.fs
            .remove_file(&note.path)
            .with_path_context("remove note", &note.path)
    }

    /// First line of a note body; empty if the note cannot be read.
    pub fn preview(&self, note: &Note) -> String {
        self.fs
            .read_to_string(&note.path)
            .ok()
            .and_then(|content| content.lines().next().map(str::to_string))
            .unwrap_or_default()
    }

    /// All notes below the notes directory, keyed by identifier.
    ///
    /// Only files with the configured extension count. Hidden files and
    /// excluded names are skipped. File stems are taken as-is, even if they do
    /// not parse as identifiers.
    #[instrument(level = "debug", skip(self))]
    pub fn enumerate(&self) -> ApplicationResult<BTreeMap<String, Note>> {
        let notes_dir = self.notes_dir();
        if !self.fs.is_dir(notes_dir) {
            debug!("notes directory missing: {}", notes_dir.display());
            return Ok(BTreeMap::new());
        }

        let files = self
            .fs
            .list_files(notes_dir)
            .with_path_context("list notes", notes_dir)?;

        let mut notes = BTreeMap::new();
        for path in files {
            let Some(id) = self.note_id(&path) else {
                continue;
            };
            notes.insert(id.clone(), Note::new(id, path));
        }
        debug!("found {} notes", notes.len());
        Ok(notes)
    }

    fn note_id(&self, path: &Path) -> Option<String> {
        let extension = path.extension()?.to_str()?;
        if extension != self.settings.extension {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        if stem.is_empty() || stem.starts_with('.') {
            return None;
        }
        if self.settings.exclude.iter().any(|name| name == stem) {
            return None;
        }
        Some(stem.to_string())
    }

    /// The whole note collection as a tree, ready to print line by line.
    pub fn tree(&self) -> ApplicationResult<Vec<RenderedNode<Note>>> {
        Ok(render(self.enumerate()?))
    }

    pub fn inspect(&self, id: &Identifier) -> IdentifierInfo {
        IdentifierInfo {
            id: id.to_string(),
            levels: id.levels().iter().map(|l| l.to_string()).collect(),
            segments: id.segments(),
            depth: id.depth(),
            exists: self.exists(id),
            next_child: self.next_child(id).to_string(),
        }
    }
}
