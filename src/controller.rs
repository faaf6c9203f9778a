//! Browse/edit state machine sitting between the terminal front end and the
//! note store.
//!
//! The controller owns the current section, the loaded note list, the
//! selection and the edit session. Front ends translate input into the
//! event methods below and render from the accessors. Store failures never
//! escape: they are logged, turned into a status line, and the state stays
//! as it was before the event.

use crate::error::EditorError;
use crate::note::{Note, Section, derive_title, display_title};
use crate::store::Store;
use std::fmt::Display;
use std::path::PathBuf;

/// Picks the list index to select after a reload: the previously selected
/// note when it is still listed, otherwise the first note.
pub fn resync_selection(
    notes: &[Note],
    previous_id: Option<&str>,
) -> Option<usize> {
    if notes.is_empty() {
        return None;
    }
    previous_id
        .and_then(|id| notes.iter().position(|n| n.id == id))
        .or(Some(0))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    note: Note,
    original: String,
    draft: String,
    dirty: bool,
}

impl EditSession {
    fn new(note: Note, body: String) -> Self {
        EditSession { note, draft: body.clone(), original: body, dirty: false }
    }

    pub fn note(&self) -> &Note {
        &self.note
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Title the note will get once the draft is saved.
    pub fn draft_title(&self) -> String {
        display_title(derive_title(&self.draft))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Browse,
    Edit(EditSession),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    Empty,
    Body(String),
    Error(String),
}

pub struct Controller {
    store: Store,
    sections: Vec<Section>,
    section_idx: usize,
    notes: Vec<Note>,
    selected: Option<usize>,
    mode: Mode,
    preview: Preview,
    status: String,
    quit: bool,
}

impl Controller {
    /// Starts in browse mode on the first configured section.
    pub fn new(store: Store) -> Self {
        let sections = store.paths().sections().to_vec();
        let mut ctl = Controller {
            store,
            sections,
            section_idx: 0,
            notes: Vec::new(),
            selected: None,
            mode: Mode::Browse,
            preview: Preview::Empty,
            status: String::new(),
            quit: false,
        };
        ctl.refresh_and_reselect(None);
        ctl
    }

    // ---------- accessors ----------

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section_index(&self) -> usize {
        self.section_idx
    }

    pub fn current_section(&self) -> Section {
        self.sections
            .get(self.section_idx)
            .copied()
            .unwrap_or(Section::DEFAULT_ACTIVE)
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.selected.and_then(|i| self.notes.get(i))
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, Mode::Edit(_))
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        match &self.mode {
            Mode::Edit(session) => Some(session),
            Mode::Browse => None,
        }
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn in_trash(&self) -> bool {
        self.current_section().is_trash()
    }

    /// Label of the trash/delete command for the current section. The same
    /// command soft-deletes outside the trash and hard-deletes inside it.
    pub fn delete_label(&self) -> &'static str {
        if self.in_trash() { "delete forever" } else { "to trash" }
    }

    pub fn can_create(&self) -> bool {
        !self.is_editing() && !self.in_trash()
    }

    pub fn can_edit(&self) -> bool {
        self.can_create() && self.selected.is_some()
    }

    pub fn can_restore(&self) -> bool {
        !self.is_editing() && self.in_trash() && self.selected.is_some()
    }

    // ---------- browse events ----------

    pub fn next_section(&mut self) {
        self.set_section(self.section_idx.saturating_add(1));
    }

    pub fn prev_section(&mut self) {
        self.set_section(self.section_idx.saturating_sub(1));
    }

    /// Switches to the section at `idx`, clamped to the configured list.
    pub fn set_section(&mut self, idx: usize) {
        if self.is_editing() || self.sections.is_empty() {
            return;
        }
        let idx = idx.min(self.sections.len() - 1);
        let previous = self.section_idx;
        self.section_idx = idx;
        if let Err(msg) = self.reload() {
            self.section_idx = previous;
            self.status = msg;
            return;
        }
        self.resync(None);
    }

    pub fn move_selection(&mut self, delta: isize) {
        if self.is_editing() || self.notes.is_empty() {
            return;
        }
        let last = self.notes.len() as isize - 1;
        let current = self.selected.unwrap_or(0) as isize;
        self.select_index((current + delta).clamp(0, last) as usize);
    }

    pub fn select_first(&mut self) {
        if !self.is_editing() && !self.notes.is_empty() {
            self.select_index(0);
        }
    }

    pub fn select_last(&mut self) {
        if !self.is_editing() && !self.notes.is_empty() {
            self.select_index(self.notes.len() - 1);
        }
    }

    pub fn refresh(&mut self) {
        if self.is_editing() {
            return;
        }
        let previous = self.selected_id();
        self.refresh_and_reselect(previous.as_deref());
    }

    /// Creates a note in the current section and opens it for editing.
    pub fn new_note(&mut self) {
        if self.is_editing() {
            return;
        }
        if self.in_trash() {
            self.status = "trashed notes are read-only; restore first".into();
            return;
        }
        let note = match self.store.create(self.current_section()) {
            Ok(note) => note,
            Err(e) => return self.report("create", e),
        };
        self.refresh_and_reselect(Some(&note.id));
        if self.begin_edit(note) {
            self.status = "Created".into();
        }
    }

    pub fn edit_selected(&mut self) {
        if self.is_editing() {
            return;
        }
        if self.in_trash() {
            self.status = "trashed notes are read-only; restore first".into();
            return;
        }
        if let Some(note) = self.selected_note().cloned() {
            self.begin_edit(note);
        }
    }

    /// Trash/delete command: moves the selection to the trash, or removes it
    /// permanently when the trash section is being viewed.
    pub fn trash_or_delete(&mut self) {
        if self.is_editing() {
            return;
        }
        let Some(note) = self.selected_note().cloned() else {
            return;
        };

        if self.in_trash() {
            if let Err(e) = self.store.delete_forever(&note) {
                return self.report("delete", e);
            }
            self.status = format!("Deleted permanently: {}", note.title);
        } else {
            let moved = match self.store.move_to_trash(&note) {
                Ok(moved) => moved,
                Err(e) => return self.report("trash", e),
            };
            self.status = format!("Moved to Trash: {}", moved.title);
        }
        self.refresh_and_reselect(Some(&note.id));
    }

    pub fn restore_selected(&mut self) {
        if self.is_editing() {
            return;
        }
        let Some(note) = self.selected_note().cloned() else {
            return;
        };
        if !self.in_trash() {
            self.status = "restore works only in Trash".into();
            return;
        }
        let target = Section::DEFAULT_ACTIVE;
        let restored = match self.store.restore_from_trash(&note, target) {
            Ok(restored) => restored,
            Err(e) => return self.report("restore", e),
        };
        self.status = format!("Restored: {}", restored.title);
        self.refresh_and_reselect(Some(&note.id));
    }

    /// File to hand to the external editor, when the selection may be
    /// edited.
    pub fn external_edit_target(&self) -> Option<PathBuf> {
        if !self.can_edit() {
            return None;
        }
        self.selected_note().map(|n| n.path.clone())
    }

    /// Records the outcome of an external editor run and picks up whatever
    /// it wrote.
    pub fn finish_external_edit(&mut self, result: Result<(), EditorError>) {
        if let Err(e) = result {
            return self.report("editor", e);
        }
        let previous = self.selected_id();
        self.refresh_and_reselect(previous.as_deref());
        if let Some(title) = self.selected_note().map(|n| n.title.clone()) {
            self.status = format!("Updated {title}");
        }
    }

    // ---------- edit events ----------

    /// Replaces the draft with the editor content.
    pub fn update_draft(&mut self, text: impl Into<String>) {
        if let Mode::Edit(session) = &mut self.mode {
            session.draft = text.into();
            session.dirty = session.draft != session.original;
        }
    }

    pub fn save(&mut self) {
        let Mode::Edit(session) = &self.mode else {
            return;
        };
        let id = session.note.id.clone();
        let written = self.store.write_body(&session.note.path, &session.draft);
        if let Err(e) = written {
            // stay in edit mode so the draft is not lost
            return self.report("save", e);
        }
        self.mode = Mode::Browse;
        self.status = "Saved".into();
        self.refresh_and_reselect(Some(&id));
    }

    pub fn cancel_edit(&mut self) {
        if !self.is_editing() {
            return;
        }
        self.mode = Mode::Browse;
        self.status = "Canceled".into();
        let previous = self.selected_id();
        self.resync(previous.as_deref());
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }

    // ---------- helpers ----------

    fn selected_id(&self) -> Option<String> {
        self.selected_note().map(|n| n.id.clone())
    }

    fn begin_edit(&mut self, note: Note) -> bool {
        match self.store.read_body(&note.path) {
            Ok(body) => {
                self.mode = Mode::Edit(EditSession::new(note, body));
                true
            }
            Err(e) => {
                self.report("read", e);
                false
            }
        }
    }

    fn reload(&mut self) -> Result<(), String> {
        match self.store.list(self.current_section()) {
            Ok(notes) => {
                self.notes = notes;
                Ok(())
            }
            Err(e) => {
                log::warn!("load error: {e}");
                Err(format!("load error: {e}"))
            }
        }
    }

    fn refresh_and_reselect(&mut self, previous_id: Option<&str>) {
        if let Err(msg) = self.reload() {
            self.status = msg;
            return;
        }
        self.resync(previous_id);
    }

    fn resync(&mut self, previous_id: Option<&str>) {
        self.selected = resync_selection(&self.notes, previous_id);
        self.load_preview();
    }

    fn select_index(&mut self, idx: usize) {
        self.selected = Some(idx);
        self.load_preview();
    }

    fn load_preview(&mut self) {
        self.preview = match self.selected_note() {
            None => Preview::Empty,
            Some(note) => match self.store.read_body(&note.path) {
                Ok(body) => Preview::Body(body),
                Err(e) => Preview::Error(e.to_string()),
            },
        };
    }

    fn report(&mut self, op: &str, err: impl Display) {
        log::warn!("{op} error: {err}");
        self.status = format!("{op} error: {err}");
    }
}
