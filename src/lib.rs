//! tenote: Markdown notes in plain files, browsed from the terminal.
//!
//! Notes live as `<id>.md` files in one directory per section under a
//! storage root. [`store::Store`] owns the file operations,
//! [`controller::Controller`] the browse/edit state machine, and [`ui`] the
//! full-screen front end. [`entry`] is shared by the `tenote` and `tn`
//! binaries.

pub mod config;
pub mod controller;
pub mod editor;
pub mod error;
pub mod formatting;
mod help;
pub mod logging;
pub mod note;
pub mod paths;
pub mod store;
pub mod table;
pub mod ui;

use chrono::Local;
use controller::Controller;
use formatting::{FormatContext, TimeFormatter};
use note::Section;
use paths::Paths;
use std::env;
use std::error::Error;
use std::path::PathBuf;
use store::Store;
use table::Table;

const TITLE_WIDTH: usize = 60;

pub fn entry() -> Result<(), Box<dyn Error>> {
    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        return run_browser();
    }

    let cmd = args.remove(0);
    match cmd.as_str() {
        "list" | "ls" => list_notes(&args)?,
        "path" => println!("{}", open_store()?.paths().root().display()),
        "set-dir" | "folder" => set_dir(&args)?,
        "config" => show_config()?,
        "help" | "-h" | "--help" => help::run(&args),
        other => {
            eprintln!("{}", help::usage());
            return Err(format!("Unknown command: {other}").into());
        }
    }
    Ok(())
}

fn start_logging() {
    let Some(dir) = logging::default_log_dir() else {
        eprintln!("warning: no log directory available, logging disabled");
        return;
    };
    if let Err(err) = logging::init_logging(&logging::level_from_env(), &dir) {
        eprintln!("warning: {err}");
    }
}

fn open_store() -> Result<Store, Box<dyn Error>> {
    let cfg = config::load()?;
    let root = config::storage_root(&cfg)?;
    let paths = Paths::resolve(&root, &cfg.sections()?)?;
    log::debug!("storage root {}", paths.root().display());
    Ok(Store::new(paths))
}

fn run_browser() -> Result<(), Box<dyn Error>> {
    start_logging();
    let store = open_store()
        .inspect_err(|err| log::error!("startup failed: {err}"))?;
    let ctl = Controller::new(store);
    ui::run(ctl)?;
    log::info!("bye");
    Ok(())
}

fn list_notes(args: &[String]) -> Result<(), Box<dyn Error>> {
    let store = open_store()?;
    let section = match args.first() {
        Some(raw) => raw.parse::<Section>()?,
        None => Section::DEFAULT_ACTIVE,
    };
    if !store.paths().sections().contains(&section) {
        let msg = format!("section {section} is not enabled in the config");
        return Err(msg.into());
    }

    let notes = store.list(section)?;
    let fmt = FormatContext::from_env();
    if notes.is_empty() {
        println!("No notes in {}.", section.label());
        return Ok(());
    }

    let times = TimeFormatter::new(false, Local::now());
    let mut table = Table::new([
        fmt.format_header("ID"),
        fmt.format_header("Updated"),
        fmt.format_header("Title"),
    ])
    .max_width(2, TITLE_WIDTH);
    for note in &notes {
        table.push_row(vec![
            fmt.format_id(&note.id),
            fmt.format_timestamp(&times.format(&note.updated_at)),
            note.title.clone(),
        ]);
    }
    println!("{}", table.render());
    Ok(())
}

fn set_dir(args: &[String]) -> Result<(), Box<dyn Error>> {
    let Some(raw) = args.first() else {
        return Err("usage: tenote set-dir <path>".into());
    };
    let config_path = config::config_file_path()?;
    let dir = config::set_storage_dir(&config_path, &PathBuf::from(raw))?;
    let fmt = FormatContext::from_env();
    let shown = fmt.format_path(&dir.display().to_string());
    println!("Storage directory set to {shown}");
    if env::var_os(config::ENV_DIR).is_some() {
        println!("note: {} is set and takes precedence", config::ENV_DIR);
    }
    Ok(())
}

fn show_config() -> Result<(), Box<dyn Error>> {
    let fmt = FormatContext::from_env();
    let path = config::config_file_path()?;
    let cfg = config::load_from(&path)?;
    let sections: Vec<&str> =
        cfg.sections()?.iter().map(|s| s.dir_name()).collect();
    println!("config:   {}", fmt.format_path(&path.display().to_string()));
    println!(
        "storage:  {}",
        fmt.format_path(&config::storage_root(&cfg)?.display().to_string())
    );
    println!("sections: {}", sections.join(", "));
    if let Some(dir) = logging::default_log_dir() {
        println!("logs:     {}", fmt.format_path(&dir.display().to_string()));
    }
    Ok(())
}
