// Tyle: a headless tiling workspace shell.
// Reads commands (or key chords) line by line from stdin, applies them to the
// current workspace, and saves the session on exit.

mod address;
mod pane;
mod session;
mod settings;
mod shell;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tyle_input::{Command, Hotkey, Keymap};

use crate::settings::TyleSettings;
use crate::shell::Shell;

#[derive(Parser)]
#[command(name = "tyle")]
#[command(author, version, about = "Tiling workspace shell", long_about = None)]
struct Cli {
    /// Session file to restore from and save to (default: config dir)
    #[arg(long, value_name = "PATH")]
    session: Option<PathBuf>,

    /// Ignore any saved session and start with fresh workspaces
    #[arg(long)]
    fresh: bool,

    /// Do not write the session on exit
    #[arg(long)]
    no_save: bool,

    /// Write the effective settings to the config dir before starting
    #[arg(long)]
    init_settings: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let settings = settings::load_settings();
    let keymap = settings.keymap();
    if cli.init_settings {
        let mut written = settings.clone();
        written.keybindings = settings::export_keybindings(&keymap);
        settings::save_settings(&written);
    }
    let session_path = cli.session.clone().unwrap_or_else(session::session_path);

    let mut shell = if cli.fresh {
        Shell::new(&settings)
    } else {
        restore(&session_path, &settings)
    };

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    writeln!(out, "{}", shell.describe())?;

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read command")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some(command) = read_command(line, &keymap) else {
            writeln!(out, "? {}", line)?;
            continue;
        };

        match command {
            Command::Quit => break,
            Command::Save => {
                if let Err(e) = session::save_session_to(&shell.to_record(), &session_path) {
                    log::error!("{:#}", e);
                }
            }
            Command::Show => writeln!(out, "{}", shell.describe())?,
            command => {
                if shell.dispatch(command) {
                    writeln!(out, "{}", shell.describe())?;
                }
            }
        }
        out.flush()?;
    }

    if !cli.no_save {
        if let Err(e) = session::save_session_to(&shell.to_record(), &session_path) {
            log::error!("{:#}", e);
        }
    }
    Ok(())
}

/// `key <chord>` goes through the hotkey table; anything else is a typed
/// command.
fn read_command(line: &str, keymap: &Keymap) -> Option<Command> {
    match line.strip_prefix("key ") {
        Some(chord) => {
            let hotkey = Hotkey::parse(chord)?;
            keymap.match_hotkey(hotkey.key, hotkey.modifiers())
        }
        None => Command::parse(line),
    }
}

/// A missing session is a cold start; an unreadable one is logged and also
/// treated as a cold start.
fn restore(path: &Path, settings: &TyleSettings) -> Shell {
    match session::load_session_from(path) {
        Ok(Some(record)) => {
            let shell = Shell::from_record(&record, settings);
            log::info!("Restored session, workspace {} selected", shell.current_id());
            shell
        }
        Ok(None) => Shell::new(settings),
        Err(e) => {
            log::warn!("{:#}", e);
            Shell::new(settings)
        }
    }
}
