//! Markdown preview: turns a note body into styled ratatui lines.

use super::theme;
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

pub fn render_markdown(input: &str) -> Text<'static> {
    let mut r = Renderer::default();
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    for event in Parser::new_ext(input, options) {
        r.event(event);
    }
    r.finish()
}

#[derive(Default)]
struct Renderer {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    styles: Vec<Style>,
    lists: Vec<Option<u64>>,
    in_code_block: bool,
    quote_depth: usize,
}

impl Renderer {
    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, patch: Style) {
        let next = self.style().patch(patch);
        self.styles.push(next);
    }

    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let mut spans = Vec::new();
        if self.quote_depth > 0 {
            spans.push(Span::styled(
                "│ ".repeat(self.quote_depth),
                Style::default().fg(theme::MUTED),
            ));
        }
        spans.append(&mut self.current);
        self.lines.push(Line::from(spans));
    }

    fn blank(&mut self) {
        self.flush();
        if self.lines.last().is_some_and(|l| !l.spans.is_empty()) {
            self.lines.push(Line::default());
        }
    }

    fn text(&mut self, text: &str) {
        let style = self.style();
        self.current.push(Span::styled(text.to_string(), style));
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                self.flush();
                let mark = match level {
                    HeadingLevel::H1 => "# ",
                    HeadingLevel::H2 => "## ",
                    HeadingLevel::H3 => "### ",
                    HeadingLevel::H4 => "#### ",
                    HeadingLevel::H5 => "##### ",
                    _ => "###### ",
                };
                self.push_style(theme::heading());
                self.text(mark);
            }
            Event::End(TagEnd::Heading(_)) => {
                self.styles.pop();
                self.blank();
            }
            Event::End(TagEnd::Paragraph) => {
                if self.lists.is_empty() {
                    self.blank();
                } else {
                    self.flush();
                }
            }
            Event::Start(Tag::List(start)) => {
                self.flush();
                self.lists.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            Event::Start(Tag::Item) => {
                self.flush();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let m = format!("{indent}{n}. ");
                        *n += 1;
                        m
                    }
                    _ => format!("{indent}• "),
                };
                self.current.push(Span::styled(marker, theme::bullet()));
            }
            Event::End(TagEnd::Item) => self.flush(),
            Event::Start(Tag::CodeBlock(_)) => {
                self.flush();
                self.in_code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => {
                self.in_code_block = false;
                self.blank();
            }
            Event::Start(Tag::BlockQuote { .. }) => {
                self.flush();
                self.quote_depth += 1;
                self.push_style(
                    Style::default().add_modifier(Modifier::ITALIC),
                );
            }
            Event::End(TagEnd::BlockQuote { .. }) => {
                self.flush();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.styles.pop();
            }
            Event::Start(Tag::Emphasis) => {
                self.push_style(Style::default().add_modifier(Modifier::ITALIC))
            }
            Event::Start(Tag::Strong) => {
                self.push_style(Style::default().add_modifier(Modifier::BOLD))
            }
            Event::Start(Tag::Strikethrough) => self.push_style(
                Style::default().add_modifier(Modifier::CROSSED_OUT),
            ),
            Event::End(TagEnd::Emphasis)
            | Event::End(TagEnd::Strong)
            | Event::End(TagEnd::Strikethrough) => {
                self.styles.pop();
            }
            Event::Text(t) if self.in_code_block => {
                for line in t.lines() {
                    self.lines.push(Line::from(Span::styled(
                        format!("  {line}"),
                        theme::code(),
                    )));
                }
            }
            Event::Text(t) => self.text(&t),
            Event::Code(t) => {
                self.current.push(Span::styled(t.to_string(), theme::code()))
            }
            Event::TaskListMarker(done) => {
                let mark = if done { "[x] " } else { "[ ] " };
                self.current.push(Span::styled(mark, theme::bullet()));
            }
            Event::SoftBreak | Event::HardBreak => self.flush(),
            Event::Rule => {
                self.flush();
                self.lines.push(Line::from(Span::styled(
                    "─".repeat(24),
                    Style::default().fg(theme::MUTED),
                )));
                self.blank();
            }
            Event::Html(t) => self.text(t.trim_end()),
            _ => {}
        }
    }

    fn finish(mut self) -> Text<'static> {
        self.flush();
        while self.lines.last().is_some_and(|l| l.spans.is_empty()) {
            self.lines.pop();
        }
        Text::from(self.lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &Text<'_>) -> Vec<String> {
        text.lines
            .iter()
            .map(|l| l.spans.iter().map(|s| &*s.content).collect())
            .collect()
    }

    #[test]
    fn headings_keep_their_markers() {
        let out = plain(&render_markdown("# Shopping\nmilk, eggs"));
        assert_eq!(out, ["# Shopping", "", "milk, eggs"]);
    }

    #[test]
    fn lists_get_bullets_and_numbers() {
        let out = plain(&render_markdown("- a\n- b\n\n1. one\n2. two\n"));
        assert_eq!(out, ["• a", "• b", "", "1. one", "2. two"]);
    }

    #[test]
    fn code_blocks_are_indented() {
        let out = plain(&render_markdown("```\nlet x = 1;\n```\n"));
        assert_eq!(out, ["  let x = 1;"]);
    }

    #[test]
    fn empty_body_renders_nothing() {
        assert!(render_markdown("").lines.is_empty());
        assert!(render_markdown("\n\n").lines.is_empty());
    }
}
