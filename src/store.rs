//! File-backed note store.
//!
//! The store is the only component that touches note files. It maps
//! `(section, id)` pairs to `<root>/<section>/<id>.md` and implements the
//! note lifecycle: create, write, move to trash, restore, delete forever.
//! Lifecycle moves are single `rename` calls and never mutate the caller's
//! [`Note`]; a failed move leaves both the file and the caller's value as
//! they were.

use crate::error::{StoreError, StoreResult};
use crate::note::{
    NOTE_TEMPLATE, Note, Section, UNTITLED, display_title, generate_id,
    id_from_path, is_note_file, modified_at, note_path, read_title,
};
use crate::paths::Paths;
use chrono::Local;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const FILE_MODE: u32 = 0o644;

#[derive(Debug, Clone)]
pub struct Store {
    paths: Paths,
}

impl Store {
    pub fn new(paths: Paths) -> Self {
        Store { paths }
    }

    pub fn paths(&self) -> &Paths {
        &self.paths
    }

    pub fn dir_for(&self, section: Section) -> PathBuf {
        self.paths.dir_for(section)
    }

    /// Writes the note template to a fresh `<id>.md` in `section`.
    pub fn create(&self, section: Section) -> StoreResult<Note> {
        let dir = self.dir_for(section);
        let id = generate_id(|candidate| self.id_taken(candidate));
        let path = note_path(&dir, &id);

        write_new_file(&path, NOTE_TEMPLATE)
            .map_err(|e| StoreError::io("create note", &path, e))?;
        let meta = fs::metadata(&path)
            .map_err(|e| StoreError::io("stat new note", &path, e))?;
        let updated_at = modified_at(&meta)
            .map_err(|e| StoreError::io("stat new note", &path, e))?;

        log::debug!("created note {id} in {section}");
        Ok(Note {
            id,
            title: UNTITLED.to_string(),
            path,
            section,
            updated_at,
        })
    }

    /// Lists the notes of a section, most recently modified first.
    ///
    /// A single unreadable note aborts the whole listing. Symlinked notes
    /// are listed like regular files.
    pub fn list(&self, section: Section) -> StoreResult<Vec<Note>> {
        let dir = self.dir_for(section);
        let entries = fs::read_dir(&dir)
            .map_err(|e| StoreError::io("read section dir", &dir, e))?;

        let mut notes = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| StoreError::io("read section dir", &dir, e))?;
            let path = entry.path();
            if !is_note_file(&path) {
                continue;
            }
            // follows symlinks; a dangling link is an unreadable note
            let meta = fs::metadata(&path)
                .map_err(|e| StoreError::io("read file info", &path, e))?;
            if meta.is_dir() {
                continue;
            }
            let updated_at = modified_at(&meta)
                .map_err(|e| StoreError::io("read file info", &path, e))?;
            let title = read_title(&path)
                .map_err(|e| StoreError::io("read note", &path, e))?;

            notes.push(Note {
                id: id_from_path(&path),
                title: display_title(title),
                path,
                section,
                updated_at,
            });
        }

        // stable: equal timestamps keep directory order
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        log::debug!("listed {} note(s) in {section}", notes.len());
        Ok(notes)
    }

    /// Reads the whole body. Invalid UTF-8 is replaced rather than
    /// rejected.
    pub fn read_body(&self, path: &Path) -> StoreResult<String> {
        let bytes =
            fs::read(path).map_err(|e| StoreError::io("read note", path, e))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Replaces the whole body. The new content is written to a temporary
    /// file next to the note and renamed over it.
    pub fn write_body(&self, path: &Path, content: &str) -> StoreResult<()> {
        write_atomic(path, content.as_bytes())
            .map_err(|e| StoreError::io("write note", path, e))?;
        log::debug!("wrote {} byte(s) to {}", content.len(), path.display());
        Ok(())
    }

    pub fn move_to_trash(&self, note: &Note) -> StoreResult<Note> {
        if note.section.is_trash() {
            return Ok(note.clone());
        }
        let moved = self
            .relocate(note, Section::Trash)
            .map_err(|e| StoreError::io("move note to trash", &note.path, e))?;
        log::info!("moved note {} from {} to trash", note.id, note.section);
        Ok(moved)
    }

    /// Moves a trashed note back into `target`. Asking to restore into the
    /// trash itself restores into the default active section.
    pub fn restore_from_trash(
        &self,
        note: &Note,
        target: Section,
    ) -> StoreResult<Note> {
        if !note.section.is_trash() {
            return Ok(note.clone());
        }
        let target =
            if target.is_trash() { Section::DEFAULT_ACTIVE } else { target };
        let restored = self
            .relocate(note, target)
            .map_err(|e| StoreError::io("restore note", &note.path, e))?;
        log::info!("restored note {} to {target}", note.id);
        Ok(restored)
    }

    pub fn delete_forever(&self, note: &Note) -> StoreResult<()> {
        if !note.section.is_trash() {
            return Err(StoreError::InvalidState(format!(
                "delete forever requires the trash section, note {} is in {}",
                note.id, note.section
            )));
        }
        fs::remove_file(&note.path).map_err(|e| {
            StoreError::io("delete note from trash", &note.path, e)
        })?;
        log::info!("deleted note {} permanently", note.id);
        Ok(())
    }

    fn relocate(&self, note: &Note, target: Section) -> io::Result<Note> {
        let dst = note_path(&self.dir_for(target), &note.id);
        if dst.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", dst.display()),
            ));
        }
        fs::rename(&note.path, &dst)?;

        Ok(Note {
            id: note.id.clone(),
            title: note.title.clone(),
            path: dst,
            section: target,
            updated_at: Local::now(),
        })
    }

    fn id_taken(&self, id: &str) -> bool {
        Section::ALL
            .iter()
            .any(|s| note_path(&self.dir_for(*s), id).exists())
    }
}

#[cfg(unix)]
fn write_new_file(path: &Path, content: &str) -> io::Result<()> {
    use std::os::unix::fs::OpenOptionsExt;
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(FILE_MODE)
        .open(path)?;
    file.write_all(content.as_bytes())
}

#[cfg(not(unix))]
fn write_new_file(path: &Path, content: &str) -> io::Result<()> {
    let mut file =
        fs::OpenOptions::new().write(true).create_new(true).open(path)?;
    file.write_all(content.as_bytes())
}

fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let dir = path.parent().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "note path has no parent")
    })?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    set_file_mode(tmp.path())?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(unix)]
fn set_file_mode(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(FILE_MODE))
}

#[cfg(not(unix))]
fn set_file_mode(_path: &Path) -> io::Result<()> {
    Ok(())
}
