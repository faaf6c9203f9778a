use super::markdown::render_markdown;
use super::{App, Focus, keys, theme};
use crate::controller::{Controller, Preview};
use crate::formatting::{TIME_LAYOUT, TimeFormatter};
use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap,
};

const SIDEBAR_MIN: u16 = 28;
const SIDEBAR_MAX: u16 = 44;

pub fn sidebar_width(total: u16) -> u16 {
    (total / 3).clamp(SIDEBAR_MIN, SIDEBAR_MAX).min(total)
}

/// Limits a preview offset so the last line stays on screen.
pub fn clamp_scroll(offset: u16, line_count: usize) -> u16 {
    let last = line_count.saturating_sub(1);
    offset.min(u16::try_from(last).unwrap_or(u16::MAX))
}

pub fn draw(frame: &mut Frame, app: &mut App) {
    let [body, status, help] = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());
    let [side, main] = Layout::horizontal([
        Constraint::Length(sidebar_width(body.width)),
        Constraint::Min(0),
    ])
    .areas(body);

    draw_sidebar(frame, app, side);
    draw_main(frame, app, main);
    draw_status(frame, &app.ctl, status);
    draw_hints(frame, &app.ctl, help);
    if app.show_help {
        draw_help(frame, &app.ctl);
    }
}

fn draw_sidebar(frame: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.focus == Focus::Sidebar && !app.ctl.is_editing();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border(focused))
        .title(Span::styled(" tenote ", theme::heading()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [tabs_area, list_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(0)])
            .areas(inner);

    let titles: Vec<Line> = app
        .ctl
        .sections()
        .iter()
        .map(|s| Line::from(s.label()))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.ctl.section_index())
        .style(Style::default().fg(theme::MUTED))
        .highlight_style(theme::heading().add_modifier(Modifier::UNDERLINED))
        .divider("│");
    frame.render_widget(tabs, tabs_area);

    if app.ctl.notes().is_empty() {
        let msg = if app.ctl.in_trash() {
            "Trash is empty."
        } else {
            "No notes yet. Press n to create one."
        };
        frame.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(theme::MUTED))
                .wrap(Wrap { trim: true }),
            list_area,
        );
        return;
    }

    let times = TimeFormatter::new(true, Local::now());
    let items: Vec<ListItem> = app
        .ctl
        .notes()
        .iter()
        .map(|note| {
            ListItem::new(vec![
                Line::from(note.title.clone()),
                Line::from(Span::styled(
                    times.format(&note.updated_at),
                    Style::default().fg(theme::TIMESTAMP),
                )),
            ])
        })
        .collect();
    let list = List::new(items)
        .highlight_style(theme::selected())
        .highlight_symbol("▌ ");
    app.list_state.select(app.ctl.selected_index());
    frame.render_stateful_widget(list, list_area, &mut app.list_state);
}

fn draw_main(frame: &mut Frame, app: &mut App, area: Rect) {
    let editing = (app.ctl.edit_session(), app.editor.as_mut());
    if let (Some(session), Some(editor)) = editing {
        let marker = if session.is_dirty() { " *" } else { "" };
        editor.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::border(true))
                .title(Span::styled(
                    format!(" {}{marker} ", session.draft_title()),
                    theme::heading(),
                )),
        );
        frame.render_widget(&*editor, area);
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border(app.focus == Focus::Preview));
    let Some(note) = app.ctl.selected_note() else {
        frame.render_widget(block, area);
        return;
    };
    let title = Span::styled(format!(" {} ", note.title), theme::heading());
    let block = block.title(title);

    let mut text = Text::from(vec![
        Line::from(vec![
            Span::styled(note.id.clone(), Style::default().fg(theme::MUTED)),
            Span::raw("  "),
            Span::styled(
                note.updated_at.format(TIME_LAYOUT).to_string(),
                Style::default().fg(theme::TIMESTAMP),
            ),
        ]),
        Line::default(),
    ]);
    match app.ctl.preview() {
        Preview::Body(body) => text.lines.extend(render_markdown(body).lines),
        Preview::Error(err) => text.lines.push(Line::from(Span::styled(
            format!("cannot read note: {err}"),
            Style::default().fg(theme::DANGER),
        ))),
        Preview::Empty => {}
    }
    app.preview_scroll = clamp_scroll(app.preview_scroll, text.height());
    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((app.preview_scroll, 0)),
        area,
    );
}

fn draw_status(frame: &mut Frame, ctl: &Controller, area: Rect) {
    let status = ctl.status();
    let style = if status.contains("error") {
        Style::default().fg(theme::DANGER)
    } else {
        Style::default().fg(theme::ACCENT)
    };
    let section = format!(
        " {} ({}) ",
        ctl.current_section().label(),
        ctl.notes().len()
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(section, Style::default().fg(theme::HEADER)),
            Span::styled(status.to_string(), style),
        ])),
        area,
    );
}

fn draw_hints(frame: &mut Frame, ctl: &Controller, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for (key, label) in keys::hints(ctl) {
        spans.push(Span::styled(key, theme::bullet()));
        let muted = Style::default().fg(theme::MUTED);
        spans.push(Span::styled(format!(" {label}  "), muted));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_help(frame: &mut Frame, ctl: &Controller) {
    let entries = keys::help_entries(ctl);
    let width = 52.min(frame.area().width);
    let height = (entries.len() as u16 + 2).min(frame.area().height);
    let area = centered(frame.area(), width, height);

    let lines: Vec<Line> = entries
        .into_iter()
        .map(|(key, label)| {
            Line::from(vec![
                Span::styled(format!("{key:<16}"), theme::bullet()),
                Span::raw(label),
            ])
        })
        .collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border(true))
        .title(Span::styled(" keys ", theme::heading()));
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn centered(outer: Rect, width: u16, height: u16) -> Rect {
    Rect {
        x: outer.x + outer.width.saturating_sub(width) / 2,
        y: outer.y + outer.height.saturating_sub(height) / 2,
        width,
        height,
    }
}
