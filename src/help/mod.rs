use crate::formatting::FormatContext;

mod content;

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Section {
    Command,
    Environment,
    Keys,
}

impl Section {
    fn label(self) -> &'static str {
        match self {
            Section::Command => "Commands",
            Section::Environment => "Environment",
            Section::Keys => "Keys",
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct HelpTopic<'a> {
    pub name: &'a str,
    pub summary: &'a str,
    pub usage: &'a str,
    pub details: &'a [&'a str],
    pub aliases: &'a [&'a str],
    pub section: Section,
}

#[derive(Clone, Copy)]
pub(crate) struct HelpBook<'a> {
    pub title: &'a str,
    pub usage: &'a str,
    pub topics: &'a [HelpTopic<'a>],
    pub footer: &'a [&'a str],
}

impl<'a> HelpBook<'a> {
    fn find(&self, name: &str) -> Option<&HelpTopic<'a>> {
        self.topics.iter().find(|topic| {
            topic.name.eq_ignore_ascii_case(name)
                || topic.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
        })
    }

    fn in_section(
        &self,
        section: Section,
    ) -> impl Iterator<Item = &HelpTopic<'a>> {
        self.topics.iter().filter(move |t| t.section == section)
    }
}

/// Prints the overview, or one topic when `args` names it.
pub fn run(args: &[String]) {
    let book = content::book();
    let width = terminal_columns().clamp(64, 120);
    let printer = HelpPrinter::new(width, FormatContext::from_env());

    let lines = match args.first() {
        None => printer.render_overview(&book),
        Some(name) => match book.find(name) {
            Some(topic) => printer.render_topic(topic),
            None => {
                eprintln!("Unknown help topic: {name}");
                printer.render_overview(&book)
            }
        },
    };
    for line in lines {
        println!("{line}");
    }
}

/// Short usage text for error paths.
pub fn usage() -> String {
    let book = content::book();
    let width = terminal_columns().clamp(64, 120);
    HelpPrinter::new(width, FormatContext::from_env())
        .render_overview(&book)
        .join("\n")
}

fn terminal_columns() -> usize {
    crossterm::terminal::size()
        .map(|(cols, _)| cols as usize)
        .unwrap_or(96)
}

struct HelpPrinter {
    width: usize,
    fmt: FormatContext,
}

impl HelpPrinter {
    fn new(width: usize, fmt: FormatContext) -> Self {
        Self { width, fmt }
    }

    fn render_overview(&self, book: &HelpBook<'_>) -> Vec<String> {
        let mut out = vec![
            self.fmt.format_header(book.title),
            format!("usage: {}", book.usage),
            String::new(),
        ];
        for section in [Section::Command, Section::Environment, Section::Keys] {
            let rows: Vec<(String, String)> = book
                .in_section(section)
                .map(|t| (t.usage.to_string(), t.summary.to_string()))
                .collect();
            out.extend(self.render_block(section.label(), &rows));
        }
        for line in book.footer {
            out.extend(self.wrap(line, self.width));
        }
        out
    }

    fn render_topic(&self, topic: &HelpTopic<'_>) -> Vec<String> {
        let mut out = vec![
            self.fmt
                .format_header(&format!("{}: {}", topic.name, topic.summary)),
            format!("usage: {}", topic.usage),
        ];
        if !topic.aliases.is_empty() {
            out.push(format!("aliases: {}", topic.aliases.join(", ")));
        }
        out.push(String::new());
        for line in topic.details {
            out.extend(self.wrap(line, self.width));
        }
        out
    }

    fn render_block(
        &self,
        title: &str,
        rows: &[(String, String)],
    ) -> Vec<String> {
        if rows.is_empty() {
            return Vec::new();
        }
        let min_desc = self.width / 2;
        let longest = rows.iter().map(|r| r.0.len()).max().unwrap_or(0);
        let mut label_width = longest.min(38);
        if label_width + 4 + min_desc > self.width {
            label_width = self.width.saturating_sub(min_desc + 4);
        }
        let desc_width =
            self.width.saturating_sub(2 + label_width + 2).max(min_desc);

        let mut out = vec![self.fmt.format_header(&format!("{title}:"))];
        for (label, desc) in rows {
            let label_lines = self.wrap(label, label_width);
            let desc_lines = self.wrap(desc, desc_width);
            for idx in 0..label_lines.len().max(desc_lines.len()) {
                let l = label_lines.get(idx).map(String::as_str).unwrap_or("");
                let d = desc_lines.get(idx).map(String::as_str).unwrap_or("");
                let row = format!("  {l:label_width$}  {d}");
                out.push(row.trim_end().to_string());
            }
        }
        out.push(String::new());
        out
    }

    fn wrap(&self, text: &str, width: usize) -> Vec<String> {
        let mut out = Vec::new();
        let mut line = String::new();
        for word in text.split_whitespace() {
            if line.is_empty() {
                line.push_str(word);
            } else if line.len() + 1 + word.len() <= width {
                line.push(' ');
                line.push_str(word);
            } else {
                out.push(std::mem::take(&mut line));
                line.push_str(word);
            }
        }
        if !line.is_empty() || out.is_empty() {
            out.push(line);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printer() -> HelpPrinter {
        HelpPrinter::new(80, FormatContext::new(false))
    }

    #[test]
    fn topics_are_found_by_alias() {
        let book = content::book();
        assert_eq!(book.find("ls").map(|t| t.name), Some("list"));
        assert_eq!(book.find("SET-DIR").map(|t| t.name), Some("set-dir"));
        assert!(book.find("nope").is_none());
    }

    #[test]
    fn overview_lists_every_section() {
        let out = printer().render_overview(&content::book()).join("\n");
        assert!(out.contains("Commands:"));
        assert!(out.contains("Environment:"));
        assert!(out.contains("Keys:"));
        assert!(out.contains("TENOTE_DIR"));
    }

    #[test]
    fn wrap_breaks_on_width() {
        let lines = printer().wrap("aaa bbb ccc", 7);
        assert_eq!(lines, ["aaa bbb", "ccc"]);
        assert_eq!(printer().wrap("", 7), [""]);
    }
}
