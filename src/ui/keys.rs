//! Key bindings for browse and edit mode.

use crate::controller::Controller;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Up,
    Down,
    Top,
    Bottom,
    ToggleFocus,
    FocusSidebar,
    FocusPreview,
    NextSection,
    PrevSection,
    New,
    Edit,
    ExternalEdit,
    TrashOrDelete,
    Restore,
    Refresh,
    ToggleHelp,
    Save,
    Cancel,
}

struct Binding {
    code: KeyCode,
    ctrl: bool,
    action: Action,
}

const fn key(c: char, action: Action) -> Binding {
    Binding { code: KeyCode::Char(c), ctrl: false, action }
}

const fn ctrl(c: char, action: Action) -> Binding {
    Binding { code: KeyCode::Char(c), ctrl: true, action }
}

const fn special(code: KeyCode, action: Action) -> Binding {
    Binding { code, ctrl: false, action }
}

const BROWSE: &[Binding] = &[
    key('q', Action::Quit),
    ctrl('c', Action::Quit),
    key('?', Action::ToggleHelp),
    key('k', Action::Up),
    special(KeyCode::Up, Action::Up),
    key('j', Action::Down),
    special(KeyCode::Down, Action::Down),
    key('g', Action::Top),
    special(KeyCode::Home, Action::Top),
    key('G', Action::Bottom),
    special(KeyCode::End, Action::Bottom),
    special(KeyCode::Tab, Action::ToggleFocus),
    key('h', Action::FocusSidebar),
    special(KeyCode::Left, Action::FocusSidebar),
    key('l', Action::FocusPreview),
    special(KeyCode::Right, Action::FocusPreview),
    key('J', Action::NextSection),
    key('K', Action::PrevSection),
    key('n', Action::New),
    key('e', Action::Edit),
    special(KeyCode::Enter, Action::Edit),
    key('E', Action::ExternalEdit),
    key('d', Action::TrashOrDelete),
    special(KeyCode::Delete, Action::TrashOrDelete),
    key('r', Action::Restore),
    ctrl('r', Action::Refresh),
];

const EDIT: &[Binding] = &[
    ctrl('s', Action::Save),
    special(KeyCode::Esc, Action::Cancel),
    ctrl('c', Action::Quit),
];

fn lookup(table: &[Binding], ev: &KeyEvent) -> Option<Action> {
    let ctrl = ev.modifiers.contains(KeyModifiers::CONTROL);
    let code = match ev.code {
        KeyCode::Char(c) if ctrl => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };
    table
        .iter()
        .find(|b| b.code == code && b.ctrl == ctrl)
        .map(|b| b.action)
}

pub fn browse_action(ev: &KeyEvent) -> Option<Action> {
    lookup(BROWSE, ev)
}

/// Edit-mode commands. Anything else goes to the text area.
pub fn edit_action(ev: &KeyEvent) -> Option<Action> {
    lookup(EDIT, ev)
}

/// Short key hints for the footer, depending on what the controller allows.
pub fn hints(ctl: &Controller) -> Vec<(&'static str, &'static str)> {
    if ctl.is_editing() {
        return vec![("ctrl+s", "save"), ("esc", "cancel")];
    }
    let mut out = vec![("j/k", "move"), ("tab", "focus"), ("J/K", "section")];
    if ctl.can_create() {
        out.push(("n", "new"));
    }
    if ctl.can_edit() {
        out.push(("e", "edit"));
    }
    if ctl.selected_note().is_some() {
        out.push(("d", ctl.delete_label()));
    }
    if ctl.can_restore() {
        out.push(("r", "restore"));
    }
    out.push(("?", "help"));
    out.push(("q", "quit"));
    out
}

/// Full binding list shown in the help overlay.
pub fn help_entries(ctl: &Controller) -> Vec<(&'static str, &'static str)> {
    vec![
        ("j / k, ↓ / ↑", "move selection or scroll preview"),
        ("g / G", "first / last note"),
        ("tab", "switch focus"),
        ("h / l, ← / →", "focus list / preview"),
        ("J / K", "next / previous section"),
        ("n", "new note"),
        ("e, enter", "edit in place"),
        ("E", "edit with $EDITOR"),
        ("d, del", ctl.delete_label()),
        ("r", "restore from trash"),
        ("ctrl+r", "reload from disk"),
        ("ctrl+s", "save draft"),
        ("esc", "cancel edit"),
        ("?", "toggle help"),
        ("q, ctrl+c", "quit"),
    ]
}
