use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Mutex, OnceLock};

pub const NOTE_EXT: &str = "md";
pub const UNTITLED: &str = "(untitled)";
/// Body written to a freshly created note: an empty heading and a blank line.
pub const NOTE_TEMPLATE: &str = "# \n\n";
pub const ID_WIDTH: usize = 9;

/// Logical grouping of notes. Each section owns one directory under the
/// storage root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Notes,
    Todo,
    Trash,
}

impl Section {
    pub const ALL: [Section; 3] =
        [Section::Notes, Section::Todo, Section::Trash];

    /// Section used when a note leaves the trash without an explicit target.
    pub const DEFAULT_ACTIVE: Section = Section::Notes;

    pub fn dir_name(self) -> &'static str {
        match self {
            Section::Notes => "notes",
            Section::Todo => "todo",
            Section::Trash => "trash",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::Notes => "Notes",
            Section::Todo => "Todo",
            Section::Trash => "Trash",
        }
    }

    pub fn is_trash(self) -> bool {
        self == Section::Trash
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "notes" | "note" => Ok(Section::Notes),
            "todo" | "todos" => Ok(Section::Todo),
            "trash" => Ok(Section::Trash),
            other => Err(format!("Unknown section: {other}")),
        }
    }
}

/// A note as seen on disk. Values are never mutated in place by the store;
/// lifecycle operations hand back a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub path: PathBuf,
    pub section: Section,
    pub updated_at: DateTime<Local>,
}

pub fn note_path(dir: &Path, id: &str) -> PathBuf {
    dir.join(format!("{id}.{NOTE_EXT}"))
}

pub fn is_note_file(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some(NOTE_EXT)
}

pub fn id_from_path(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}

pub fn modified_at(meta: &fs::Metadata) -> io::Result<DateTime<Local>> {
    meta.modified().map(DateTime::<Local>::from)
}

/// Heading text of a single line, or `None` when the line is blank.
fn title_line(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.trim_start_matches('#').trim().to_string())
}

/// Title of an in-memory body: first non-blank line with heading markers
/// stripped, or an empty string.
pub fn derive_title(body: &str) -> String {
    body.lines().find_map(title_line).unwrap_or_default()
}

/// Same rule as [`derive_title`], reading the file line by line so only the
/// head of large notes is touched. Bytes that are not UTF-8 are replaced,
/// so a stray Latin-1 file still gets listed.
pub fn read_title(path: &Path) -> io::Result<String> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(String::new());
        }
        if let Some(title) = title_line(&String::from_utf8_lossy(&buf)) {
            return Ok(title);
        }
    }
}

pub fn display_title(raw: String) -> String {
    if raw.is_empty() { UNTITLED.to_string() } else { raw }
}

/// Generates a fixed-width base62 id from the current time in microseconds.
/// Ids are strictly increasing within the process, so they sort by creation
/// time; `taken` lets the caller skip ids already present on disk.
pub fn generate_id(taken: impl Fn(&str) -> bool) -> String {
    static LAST_TS: OnceLock<Mutex<i64>> = OnceLock::new();
    let state = LAST_TS.get_or_init(|| Mutex::new(0));

    let mut last = state.lock().unwrap_or_else(|e| e.into_inner());
    loop {
        let now = Utc::now().timestamp_micros();
        let ts = if now <= *last { *last + 1 } else { now };
        *last = ts;

        let id = encode_base62_width(ts.max(0) as u64, ID_WIDTH);
        if !taken(&id) {
            return id;
        }
    }
}

fn encode_base62(num: u64) -> String {
    const ALPHABET: &[u8] =
        b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
    if num == 0 {
        return "0".to_string();
    }
    let mut n = num;
    let base = ALPHABET.len() as u64;
    let mut out = Vec::new();
    while n > 0 {
        let idx = (n % base) as usize;
        out.push(ALPHABET[idx] as char);
        n /= base;
    }
    out.iter().rev().collect()
}

fn encode_base62_width(num: u64, width: usize) -> String {
    let base = encode_base62(num);
    if base.len() >= width {
        base
    } else {
        format!("{}{}", "0".repeat(width - base.len()), base)
    }
}
