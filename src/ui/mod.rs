//! Full-screen terminal front end over [`Controller`].
//!
//! The loop blocks on key events, maps them through [`keys`] and feeds the
//! controller. The only state kept here is presentational: which pane has
//! focus, the list and preview scroll positions, the help overlay and the
//! text area backing an edit session.

mod keys;
mod markdown;
mod render;
mod theme;

use crate::controller::Controller;
use crate::editor;
use crate::error::EditorError;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use keys::Action;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::widgets::ListState;
use std::io::{self, Stdout};
use tui_textarea::TextArea;

type Term = Terminal<CrosstermBackend<Stdout>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Preview,
}

pub struct App {
    ctl: Controller,
    list_state: ListState,
    editor: Option<TextArea<'static>>,
    show_help: bool,
    focus: Focus,
    preview_scroll: u16,
}

pub fn run(ctl: Controller) -> io::Result<()> {
    let mut terminal = setup_terminal()?;
    let mut app = App::new(ctl);
    let result = event_loop(&mut terminal, &mut app);
    let restored = teardown_terminal(&mut terminal);
    result.and(restored)
}

fn setup_terminal() -> io::Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn teardown_terminal(terminal: &mut Term) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

fn resume_terminal(terminal: &mut Term) -> io::Result<()> {
    enable_raw_mode()?;
    execute!(terminal.backend_mut(), EnterAlternateScreen)?;
    terminal.clear()
}

fn event_loop(terminal: &mut Term, app: &mut App) -> io::Result<()> {
    while !app.ctl.should_quit() {
        app.sync_editor();
        terminal.draw(|f| render::draw(f, app))?;
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.handle_key(key) == Some(Action::ExternalEdit) {
                run_external_editor(terminal, &mut app.ctl);
            }
        }
    }
    Ok(())
}

/// Hands the terminal to `$EDITOR` for the selected note, then takes it
/// back. Hand-off failures end up in the status line; the browser keeps
/// running.
fn run_external_editor(terminal: &mut Term, ctl: &mut Controller) {
    let Some(path) = ctl.external_edit_target() else {
        return;
    };
    let result = match teardown_terminal(terminal) {
        Ok(()) => editor::edit_file(&path),
        Err(err) => Err(EditorError::Terminal(err)),
    };
    let resumed = resume_terminal(terminal);
    ctl.finish_external_edit(result);
    if let Err(err) = resumed {
        log::warn!("could not take the terminal back: {err}");
        ctl.finish_external_edit(Err(EditorError::Terminal(err)));
    }
}

impl App {
    fn new(ctl: Controller) -> Self {
        App {
            ctl,
            list_state: ListState::default(),
            editor: None,
            show_help: false,
            focus: Focus::Sidebar,
            preview_scroll: 0,
        }
    }

    /// Opens or drops the text area when the controller enters or leaves
    /// edit mode.
    fn sync_editor(&mut self) {
        match (self.ctl.edit_session(), self.editor.is_some()) {
            (Some(session), false) => {
                let lines =
                    session.draft().split('\n').map(str::to_string).collect();
                let mut area = TextArea::new(lines);
                area.set_cursor_line_style(ratatui::style::Style::default());
                self.editor = Some(area);
                self.focus = Focus::Preview;
            }
            (None, true) => self.editor = None,
            _ => {}
        }
    }

    /// Section and note id the preview currently shows.
    fn shown_note(&self) -> (usize, Option<String>) {
        let id = self.ctl.selected_note().map(|n| n.id.clone());
        (self.ctl.section_index(), id)
    }

    fn move_or_scroll(&mut self, delta: i16) {
        match self.focus {
            Focus::Sidebar => self.ctl.move_selection(delta.into()),
            Focus::Preview => {
                self.preview_scroll =
                    self.preview_scroll.saturating_add_signed(delta);
            }
        }
    }

    /// Applies a key press. Returns the action when it needs the terminal
    /// itself, which only the event loop can hand out.
    fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if self.show_help {
            self.show_help = false;
            return None;
        }
        if self.ctl.is_editing() {
            return self.handle_edit_key(key);
        }
        let action = keys::browse_action(&key)?;
        let shown = self.shown_note();
        match action {
            Action::Quit => self.ctl.quit(),
            Action::Up => self.move_or_scroll(-1),
            Action::Down => self.move_or_scroll(1),
            Action::Top => self.ctl.select_first(),
            Action::Bottom => self.ctl.select_last(),
            Action::ToggleFocus => {
                self.focus = match self.focus {
                    Focus::Sidebar => Focus::Preview,
                    Focus::Preview => Focus::Sidebar,
                }
            }
            Action::FocusSidebar => self.focus = Focus::Sidebar,
            Action::FocusPreview => self.focus = Focus::Preview,
            Action::NextSection => self.ctl.next_section(),
            Action::PrevSection => self.ctl.prev_section(),
            Action::New => self.ctl.new_note(),
            Action::Edit => self.ctl.edit_selected(),
            Action::TrashOrDelete => self.ctl.trash_or_delete(),
            Action::Restore => self.ctl.restore_selected(),
            Action::Refresh => self.ctl.refresh(),
            Action::ToggleHelp => self.show_help = true,
            Action::ExternalEdit => return Some(action),
            Action::Save | Action::Cancel => {}
        }
        if self.shown_note() != shown {
            self.preview_scroll = 0;
        }
        None
    }

    fn handle_edit_key(&mut self, key: KeyEvent) -> Option<Action> {
        match keys::edit_action(&key) {
            Some(Action::Save) => self.ctl.save(),
            Some(Action::Cancel) => self.ctl.cancel_edit(),
            Some(Action::Quit) => self.ctl.quit(),
            Some(_) => {}
            None => {
                if let Some(editor) = self.editor.as_mut() {
                    if editor.input(key) {
                        self.ctl.update_draft(editor.lines().join("\n"));
                    }
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::Section;
    use crate::paths::Paths;
    use crate::store::Store;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::backend::TestBackend;
    use tempfile::TempDir;

    fn app(temp: &TempDir) -> App {
        let sections = [Section::Notes, Section::Trash];
        let paths = Paths::resolve(temp.path(), &sections).unwrap();
        App::new(Controller::new(Store::new(paths)))
    }

    fn add_note(app: &mut App, body: &str) {
        app.ctl.new_note();
        app.ctl.update_draft(body);
        app.ctl.save();
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn tab_and_h_l_move_focus() {
        let temp = TempDir::new().unwrap();
        let mut app = app(&temp);
        assert_eq!(app.focus, Focus::Sidebar);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Preview);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Sidebar);
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.focus, Focus::Preview);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.focus, Focus::Sidebar);
        assert_eq!(app.ctl.current_section(), Section::Notes);
    }

    #[test]
    fn preview_focus_scrolls_instead_of_moving() {
        let temp = TempDir::new().unwrap();
        let mut app = app(&temp);
        add_note(&mut app, "# one");
        add_note(&mut app, "# two");
        app.ctl.select_first();

        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Down);
        assert_eq!(app.preview_scroll, 2);
        assert_eq!(app.ctl.selected_index(), Some(0));

        for _ in 0..3 {
            press(&mut app, KeyCode::Char('k'));
        }
        assert_eq!(app.preview_scroll, 0);
        assert_eq!(app.ctl.selected_index(), Some(0));
    }

    #[test]
    fn new_selection_or_section_resets_scroll() {
        let temp = TempDir::new().unwrap();
        let mut app = app(&temp);
        add_note(&mut app, "# one");
        add_note(&mut app, "# two");
        app.ctl.select_first();

        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('h'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.ctl.selected_index(), Some(1));
        assert_eq!(app.preview_scroll, 0);

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.preview_scroll, 1);
        app.handle_key(KeyEvent::new(KeyCode::Char('J'), KeyModifiers::SHIFT));
        assert_eq!(app.ctl.current_section(), Section::Trash);
        assert_eq!(app.preview_scroll, 0);
    }

    #[test]
    fn editing_moves_focus_to_preview() {
        let temp = TempDir::new().unwrap();
        let mut app = app(&temp);
        add_note(&mut app, "# one");
        press(&mut app, KeyCode::Char('e'));
        app.sync_editor();
        assert!(app.editor.is_some());
        assert_eq!(app.focus, Focus::Preview);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Preview);
        assert!(app.ctl.is_editing());
    }

    #[test]
    fn drawing_clamps_scroll_to_preview_length() {
        let temp = TempDir::new().unwrap();
        let mut app = app(&temp);
        add_note(&mut app, "# T\nline");
        press(&mut app, KeyCode::Char('l'));
        for _ in 0..50 {
            press(&mut app, KeyCode::Char('j'));
        }
        assert_eq!(app.preview_scroll, 50);

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| render::draw(f, &mut app)).unwrap();
        // id line, blank, "# T", blank, "line"
        assert_eq!(app.preview_scroll, 4);
    }
}
