use std::{fs, io};
use tempfile::TempDir;
use tenote::controller::{Controller, Mode, Preview};
use tenote::error::EditorError;
use tenote::note::{Section, UNTITLED};
use tenote::paths::Paths;
use tenote::store::Store;

fn controller(temp: &TempDir) -> Controller {
    let sections = [Section::Notes, Section::Trash];
    let paths = Paths::resolve(temp.path(), &sections).unwrap();
    Controller::new(Store::new(paths))
}

/// Creates a note through the controller, saves `body` and returns its id.
fn add_note(ctl: &mut Controller, body: &str) -> String {
    ctl.new_note();
    let id = ctl.edit_session().expect("editing").note().id.clone();
    ctl.update_draft(body);
    ctl.save();
    id
}

#[test]
fn starts_browsing_empty_notes() {
    let temp = TempDir::new().unwrap();
    let ctl = controller(&temp);
    assert_eq!(ctl.mode(), &Mode::Browse);
    assert_eq!(ctl.current_section(), Section::Notes);
    assert!(ctl.notes().is_empty());
    assert_eq!(ctl.selected_index(), None);
    assert_eq!(ctl.preview(), &Preview::Empty);
    assert_eq!(ctl.status(), "");
    assert!(!ctl.should_quit());
}

#[test]
fn new_note_opens_editor_on_template() {
    let temp = TempDir::new().unwrap();
    let mut ctl = controller(&temp);
    ctl.new_note();

    assert!(ctl.is_editing());
    assert_eq!(ctl.status(), "Created");
    assert_eq!(ctl.notes().len(), 1);
    assert_eq!(ctl.notes()[0].title, UNTITLED);
    let session = ctl.edit_session().unwrap();
    assert_eq!(session.draft(), "# \n\n");
    assert!(!session.is_dirty());
    let selected = ctl.selected_note().map(|n| n.id.clone());
    assert_eq!(selected, Some(session.note().id.clone()));
}

#[test]
fn save_writes_draft_and_returns_to_browse() {
    let temp = TempDir::new().unwrap();
    let mut ctl = controller(&temp);
    ctl.new_note();
    ctl.update_draft("# Shopping\nmilk, eggs");
    assert!(ctl.edit_session().unwrap().is_dirty());
    assert_eq!(ctl.edit_session().unwrap().draft_title(), "Shopping");
    ctl.save();

    assert_eq!(ctl.mode(), &Mode::Browse);
    assert_eq!(ctl.status(), "Saved");
    assert_eq!(ctl.notes()[0].title, "Shopping");
    assert_eq!(ctl.preview(), &Preview::Body("# Shopping\nmilk, eggs".into()));
}

#[test]
fn draft_back_to_original_is_clean() {
    let temp = TempDir::new().unwrap();
    let mut ctl = controller(&temp);
    ctl.new_note();
    ctl.update_draft("changed");
    ctl.update_draft("# \n\n");
    assert!(!ctl.edit_session().unwrap().is_dirty());
}

#[test]
fn cancel_discards_draft() {
    let temp = TempDir::new().unwrap();
    let mut ctl = controller(&temp);
    let id = add_note(&mut ctl, "# Original\n");
    ctl.edit_selected();
    ctl.update_draft("# Replaced\n");
    ctl.cancel_edit();

    assert_eq!(ctl.mode(), &Mode::Browse);
    assert_eq!(ctl.status(), "Canceled");
    let note = ctl.selected_note().unwrap();
    assert_eq!(note.id, id);
    assert_eq!(fs::read_to_string(&note.path).unwrap(), "# Original\n");
}

#[test]
fn browse_commands_are_ignored_while_editing() {
    let temp = TempDir::new().unwrap();
    let mut ctl = controller(&temp);
    ctl.new_note();
    ctl.next_section();
    ctl.trash_or_delete();
    ctl.new_note();
    ctl.refresh();

    assert!(ctl.is_editing());
    assert_eq!(ctl.current_section(), Section::Notes);
    assert_eq!(ctl.notes().len(), 1);
}

#[test]
fn selection_moves_within_bounds() {
    let temp = TempDir::new().unwrap();
    let mut ctl = controller(&temp);
    for body in ["# a", "# b", "# c"] {
        add_note(&mut ctl, body);
    }
    ctl.select_first();
    assert_eq!(ctl.selected_index(), Some(0));
    ctl.move_selection(-1);
    assert_eq!(ctl.selected_index(), Some(0));
    ctl.move_selection(5);
    assert_eq!(ctl.selected_index(), Some(2));
    ctl.select_last();
    assert_eq!(ctl.selected_index(), Some(2));
    ctl.move_selection(-1);
    assert_eq!(ctl.selected_index(), Some(1));

    let body = fs::read_to_string(&ctl.selected_note().unwrap().path).unwrap();
    assert_eq!(ctl.preview(), &Preview::Body(body));
}

#[test]
fn sections_switch_and_clamp() {
    let temp = TempDir::new().unwrap();
    let mut ctl = controller(&temp);
    assert_eq!(ctl.sections(), &[Section::Notes, Section::Trash]);
    ctl.prev_section();
    assert_eq!(ctl.current_section(), Section::Notes);
    ctl.next_section();
    assert_eq!(ctl.current_section(), Section::Trash);
    assert!(ctl.in_trash());
    assert_eq!(ctl.delete_label(), "delete forever");
    ctl.next_section();
    assert_eq!(ctl.current_section(), Section::Trash);
    ctl.set_section(0);
    assert_eq!(ctl.delete_label(), "to trash");
}

#[test]
fn trash_restore_and_delete_flow() {
    let temp = TempDir::new().unwrap();
    let mut ctl = controller(&temp);
    let id = add_note(&mut ctl, "# Shopping\nmilk, eggs");

    ctl.trash_or_delete();
    assert_eq!(ctl.status(), "Moved to Trash: Shopping");
    assert!(ctl.notes().is_empty());
    assert_eq!(ctl.selected_index(), None);

    ctl.next_section();
    assert_eq!(ctl.notes().len(), 1);
    assert_eq!(ctl.selected_note().unwrap().id, id);
    ctl.restore_selected();
    assert_eq!(ctl.status(), "Restored: Shopping");
    assert!(ctl.notes().is_empty());

    ctl.prev_section();
    assert_eq!(ctl.selected_note().unwrap().id, id);
    ctl.trash_or_delete();
    ctl.next_section();
    ctl.trash_or_delete();
    assert_eq!(ctl.status(), "Deleted permanently: Shopping");
    assert!(ctl.notes().is_empty());
    assert!(fs::read_dir(temp.path().join("trash")).unwrap().next().is_none());
    assert!(fs::read_dir(temp.path().join("notes")).unwrap().next().is_none());
}

#[test]
fn restore_outside_trash_only_sets_hint() {
    let temp = TempDir::new().unwrap();
    let mut ctl = controller(&temp);
    let id = add_note(&mut ctl, "# Keep");
    ctl.restore_selected();
    assert_eq!(ctl.status(), "restore works only in Trash");
    assert_eq!(ctl.selected_note().unwrap().id, id);
}

#[test]
fn trash_is_read_only() {
    let temp = TempDir::new().unwrap();
    let mut ctl = controller(&temp);
    add_note(&mut ctl, "# Gone");
    ctl.trash_or_delete();
    ctl.next_section();

    assert!(!ctl.can_create());
    assert!(!ctl.can_edit());
    assert!(ctl.can_restore());
    ctl.new_note();
    assert!(!ctl.is_editing());
    assert_eq!(ctl.notes().len(), 1);
    ctl.edit_selected();
    assert!(!ctl.is_editing());
    assert!(ctl.external_edit_target().is_none());
}

#[test]
fn empty_section_commands_do_nothing() {
    let temp = TempDir::new().unwrap();
    let mut ctl = controller(&temp);
    ctl.trash_or_delete();
    ctl.edit_selected();
    ctl.move_selection(1);
    assert_eq!(ctl.status(), "");
    assert!(!ctl.is_editing());
    assert_eq!(ctl.selected_index(), None);
}

#[test]
fn failed_save_keeps_draft() {
    let temp = TempDir::new().unwrap();
    let mut ctl = controller(&temp);
    ctl.new_note();
    ctl.update_draft("# Draft");
    fs::remove_dir_all(temp.path().join("notes")).unwrap();
    ctl.save();

    assert!(ctl.status().starts_with("save error: "), "{}", ctl.status());
    assert!(ctl.is_editing());
    assert_eq!(ctl.edit_session().unwrap().draft(), "# Draft");
}

#[test]
fn failed_trash_reports_and_keeps_note() {
    let temp = TempDir::new().unwrap();
    let mut ctl = controller(&temp);
    let id = add_note(&mut ctl, "# Safe");
    let trash = temp.path().join("trash");
    fs::remove_dir(&trash).unwrap();
    fs::write(&trash, "").unwrap();

    ctl.trash_or_delete();
    assert!(ctl.status().starts_with("trash error: "), "{}", ctl.status());
    assert_eq!(ctl.selected_note().unwrap().id, id);
    assert!(ctl.selected_note().unwrap().path.exists());
}

#[test]
fn unreadable_section_keeps_current_one() {
    let temp = TempDir::new().unwrap();
    let mut ctl = controller(&temp);
    let trash = temp.path().join("trash");
    fs::remove_dir(&trash).unwrap();
    fs::write(&trash, "").unwrap();

    ctl.next_section();
    assert!(ctl.status().starts_with("load error: "), "{}", ctl.status());
    assert_eq!(ctl.current_section(), Section::Notes);
}

#[test]
fn external_edit_results_update_status() {
    let temp = TempDir::new().unwrap();
    let mut ctl = controller(&temp);
    add_note(&mut ctl, "# Before");

    let path = ctl.external_edit_target().expect("editable selection");
    fs::write(&path, "# After\n").unwrap();
    ctl.finish_external_edit(Ok(()));
    assert_eq!(ctl.status(), "Updated After");
    assert_eq!(ctl.notes()[0].title, "After");

    ctl.finish_external_edit(Err(EditorError::EmptyCommand));
    assert_eq!(ctl.status(), "editor error: EDITOR is empty");
}

#[test]
fn terminal_hand_off_failure_is_only_reported() {
    let temp = TempDir::new().unwrap();
    let mut ctl = controller(&temp);
    let id = add_note(&mut ctl, "# Before");

    let boom = io::Error::other("boom");
    ctl.finish_external_edit(Err(EditorError::Terminal(boom)));
    assert_eq!(ctl.status(), "editor error: terminal hand-off: boom");
    assert!(!ctl.should_quit());
    assert!(!ctl.is_editing());
    assert_eq!(ctl.selected_note().unwrap().id, id);
}

#[test]
fn refresh_picks_up_outside_changes() {
    let temp = TempDir::new().unwrap();
    let mut ctl = controller(&temp);
    let id = add_note(&mut ctl, "# One");
    fs::write(temp.path().join("notes").join("zzzzzzzzz.md"), "# Two").unwrap();
    ctl.refresh();
    assert_eq!(ctl.notes().len(), 2);
    assert_eq!(ctl.selected_note().unwrap().id, id);
}

#[test]
fn quit_sets_flag() {
    let temp = TempDir::new().unwrap();
    let mut ctl = controller(&temp);
    ctl.quit();
    assert!(ctl.should_quit());
}

#[cfg(unix)]
#[test]
fn unreadable_note_keeps_previous_list() {
    let temp = TempDir::new().unwrap();
    let mut ctl = controller(&temp);
    let id = add_note(&mut ctl, "# Kept");
    std::os::unix::fs::symlink(
        temp.path().join("missing.md"),
        temp.path().join("notes").join("broken.md"),
    )
    .unwrap();

    ctl.refresh();
    assert!(ctl.status().starts_with("load error: "), "{}", ctl.status());
    assert_eq!(ctl.notes().len(), 1);
    assert_eq!(ctl.selected_note().unwrap().id, id);
}
