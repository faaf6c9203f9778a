use super::{HelpBook, HelpTopic, Section};

pub(crate) fn book() -> HelpBook<'static> {
    HelpBook {
        title: "tenote: terminal notes",
        usage: "tenote [command] [args]",
        topics: ALL_TOPICS,
        footer: &[
            "Run `tenote` without a command to open the browser. `tn` is the \
                same program.",
            "Use `tenote help <topic>` for details, e.g. `tenote help list` or \
                `tenote help keys`.",
        ],
    }
}

const ALL_TOPICS: &[HelpTopic<'static>] = &[
    HelpTopic {
        name: "list",
        summary: "Print the notes of a section, newest first.",
        usage: "tenote list [notes|todo|trash]",
        details: &[
            "Shows id, last update and title for every note in the section \
                (default notes).",
            "The title is the first non-blank line of the body with leading \
                '#' marks removed.",
        ],
        aliases: &["ls"],
        section: Section::Command,
    },
    HelpTopic {
        name: "path",
        summary: "Print the storage root in use.",
        usage: "tenote path",
        details: &[
            "The root is TENOTE_DIR when set, else storage_dir from the config \
                file, else the platform data directory joined with tenote.",
        ],
        aliases: &[],
        section: Section::Command,
    },
    HelpTopic {
        name: "set-dir",
        summary: "Store notes in another existing directory.",
        usage: "tenote set-dir <path>",
        details: &[
            "The directory must already exist. Its absolute path is written to \
                the config file as storage_dir.",
            "Notes already in the old location are not moved.",
        ],
        aliases: &["folder"],
        section: Section::Command,
    },
    HelpTopic {
        name: "config",
        summary: "Show the config file location and its settings.",
        usage: "tenote config",
        details: &[
            "The config file is JSON with two optional keys: storage_dir and \
                sections.",
            "sections picks which tabs the browser shows, e.g. [\"notes\", \
                \"todo\", \"trash\"]; trash must be part of it.",
        ],
        aliases: &[],
        section: Section::Command,
    },
    HelpTopic {
        name: "help",
        summary: "Show this overview or one topic.",
        usage: "tenote help [topic]",
        details: &[],
        aliases: &["-h", "--help"],
        section: Section::Command,
    },
    HelpTopic {
        name: "TENOTE_DIR",
        summary: "Storage root; wins over the config file.",
        usage: "TENOTE_DIR",
        details: &[],
        aliases: &[],
        section: Section::Environment,
    },
    HelpTopic {
        name: "TENOTE_CONFIG",
        summary: "Config file path (default <config-dir>/tenote/config.json).",
        usage: "TENOTE_CONFIG",
        details: &[],
        aliases: &[],
        section: Section::Environment,
    },
    HelpTopic {
        name: "TENOTE_LOG",
        summary: "Log level: trace, debug, info, warn, error, off (info).",
        usage: "TENOTE_LOG / TENOTE_LOG_DIR",
        details: &[
            "Logs are written to TENOTE_LOG_DIR or <state-dir>/tenote/logs.",
        ],
        aliases: &["logs"],
        section: Section::Environment,
    },
    HelpTopic {
        name: "EDITOR",
        summary: "External editor for `E` in the browser (default vi).",
        usage: "EDITOR",
        details: &[],
        aliases: &[],
        section: Section::Environment,
    },
    HelpTopic {
        name: "NO_COLOR",
        summary: "Disable colors in command output.",
        usage: "NO_COLOR",
        details: &[],
        aliases: &[],
        section: Section::Environment,
    },
    HelpTopic {
        name: "keys",
        summary: "j/k move, tab focus, J/K section, n new, e edit, q quit.",
        usage: "browser keys",
        details: &[
            "Browse: j/k or arrows move the list, g/G jump to first/last.",
            "tab toggles focus between list and preview; h/l or left/right \
                pick one.",
            "With the preview focused, j/k scroll it. J/K switch section.",
            "n creates a note and opens it, e or enter edits in place, E opens \
                $EDITOR.",
            "d moves the note to Trash; inside Trash it deletes the note for \
                good. r restores from Trash.",
            "ctrl+r reloads from disk, ? shows all keys, q or ctrl+c quits.",
            "Edit: ctrl+s saves and returns to browsing, esc drops the draft.",
        ],
        aliases: &["bindings"],
        section: Section::Keys,
    },
];
