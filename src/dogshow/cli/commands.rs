//! # CLI Layer
//!
//! The binary is one UI client for the [`DogShowApi`]: it turns an interactive
//! line-oriented session into API calls and prints what comes back. This is
//! the only place that:
//! - Knows about stdin, stdout and exit codes
//! - Parses arguments (startup flags and session lines, both via clap)
//! - Asks questions (entry form, file paths, exit confirmation)
//! - Formats output (tables, coloured messages)
//!
//! A session reads one command per line. Load, save and report are handed to
//! the API's background worker and the session waits for the completion
//! before reading the next line, so output appears in command order.
//!
//! End of input behaves like closing the window: with unsaved changes there
//! is nobody left to answer the exit question, so the changes are discarded
//! and a warning is logged.

use super::prompt::{self, ask_exit_choice, ask_path, fill_form};
use super::render::{print_messages, render_config, render_status, render_table};
use super::setup::{
    command_help, grouped_help, split_line, Cli, EntryFields, SessionCommand, SessionLine,
};
use clap::Parser;
use directories::ProjectDirs;
use dogshow::api::{
    CmdMessage, CmdResult, ConfigAction, DogShowApi, ExitChoice, ExitDecision, ExitOutcome,
};
use dogshow::error::{DogShowError, Result};
use dogshow::form::EntryForm;
use dogshow::model::Field;
use env_logger::Env;
use log::{debug, info, warn};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const CONFIG_DIR_ENV: &str = "DOGSHOW_CONFIG_DIR";
const PROMPT: &str = "dogshow> ";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_dir = resolve_config_dir(cli.config_dir)?;
    debug!("Using config dir {}", config_dir.display());
    let api = DogShowApi::new(config_dir)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(api, stdin.lock(), stdout.lock());
    if let Some(file) = cli.file {
        if let Err(e) = session.load(Some(file)) {
            session.show_error(&e)?;
        }
    }
    session.run()
}

fn init_logging(verbose: bool) {
    let env = if verbose {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("warn")
    };
    env_logger::Builder::from_env(env)
        .target(env_logger::Target::Stderr)
        .init();
}

fn resolve_config_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("org", "dogshow", "dogshow")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| DogShowError::Config("Could not determine config directory".to_string()))
}

enum Flow {
    Continue,
    Exit,
}

pub(crate) struct Session<R, W> {
    api: DogShowApi,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub(crate) fn new(api: DogShowApi, input: R, out: W) -> Self {
        Self { api, input, out }
    }

    /// Reads and runs commands until quit or end of input.
    pub(crate) fn run(&mut self) -> Result<()> {
        loop {
            write!(self.out, "{}", PROMPT)?;
            self.out.flush()?;

            let Some(line) = prompt::read_line(&mut self.input)? else {
                writeln!(self.out)?;
                if self.api.is_dirty() {
                    warn!("Input closed with unsaved changes; discarding them");
                }
                return Ok(());
            };

            let words = match split_line(&line) {
                Ok(words) if words.is_empty() => continue,
                Ok(words) => words,
                Err(msg) => {
                    self.messages(&[CmdMessage::error(msg)])?;
                    continue;
                }
            };
            let command = match SessionLine::try_parse_from(&words) {
                Ok(parsed) => parsed.command,
                Err(e) => {
                    writeln!(self.out, "{}", e.to_string().trim_end())?;
                    continue;
                }
            };

            match self.dispatch(command) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(()),
                Err(DogShowError::Io(e)) if is_output_gone(&e) => return Err(e.into()),
                Err(e) => self.show_error(&e)?,
            }
        }
    }

    fn dispatch(&mut self, command: SessionCommand) -> Result<Flow> {
        debug!("Session command: {:?}", command);
        match command {
            SessionCommand::Add(fields) => self.add(fields)?,
            SessionCommand::Edit { row, fields } => self.edit(row, fields)?,
            SessionCommand::Delete { rows } => {
                let result = self.api.delete_entries(&rows)?;
                self.messages(&result.messages)?;
            }
            SessionCommand::Select { rows } => {
                let result = self.api.select(&rows)?;
                self.messages(&result.messages)?;
            }
            SessionCommand::List => self.list()?,
            SessionCommand::Search { field, query } => self.search(field, &query.join(" "))?,
            SessionCommand::Load { path } => self.load(path)?,
            SessionCommand::Save { path } => {
                self.save(path)?;
            }
            SessionCommand::Report { path } => self.report(path)?,
            SessionCommand::Status => {
                let status = render_status(&self.api.status());
                write!(self.out, "{}", status)?;
            }
            SessionCommand::Config { key, value } => self.config(key, value)?,
            SessionCommand::Help { command } => self.help(command.as_deref())?,
            SessionCommand::Quit => return self.quit(),
        }
        Ok(Flow::Continue)
    }

    fn add(&mut self, fields: EntryFields) -> Result<()> {
        let mut form = EntryForm::blank();
        for (field, value) in fields.given() {
            form.set(field, value);
        }
        let missing = form.missing();
        match fill_form(&mut self.input, &mut self.out, form, &missing)? {
            Some(entry) => {
                let result = self.api.add_entry(entry)?;
                self.messages(&result.messages)
            }
            None => self.messages(&[CmdMessage::info("Entry cancelled.")]),
        }
    }

    fn edit(&mut self, row: Option<String>, fields: EntryFields) -> Result<()> {
        let (position, current) = self.api.edit_target(row.as_deref())?;
        let mut form = EntryForm::prefilled(&current);

        let to_ask = if fields.is_empty() {
            writeln!(self.out, "Editing row {}: {}", position + 1, current)?;
            Field::ALL.to_vec()
        } else {
            for (field, value) in fields.given() {
                form.set(field, value);
            }
            form.missing()
        };

        match fill_form(&mut self.input, &mut self.out, form, &to_ask)? {
            Some(entry) => {
                let result = self.api.update_entry(position, entry)?;
                self.messages(&result.messages)
            }
            None => self.messages(&[CmdMessage::info("Edit cancelled.")]),
        }
    }

    fn list(&mut self) -> Result<()> {
        let result = self.api.list();
        if !result.listed_entries.is_empty() {
            write!(self.out, "{}", render_table(&result.listed_entries))?;
        }
        self.messages(&result.messages)
    }

    fn search(&mut self, field: Field, query: &str) -> Result<()> {
        let result = self.api.search(field, query)?;
        let matches: Vec<_> = self
            .api
            .list()
            .listed_entries
            .into_iter()
            .filter(|de| de.selected)
            .collect();
        if !matches.is_empty() {
            write!(self.out, "{}", render_table(&matches))?;
        }
        self.messages(&result.messages)
    }

    pub(crate) fn load(&mut self, path: Option<PathBuf>) -> Result<()> {
        let path = match path {
            Some(path) => path,
            None => match ask_path(&mut self.input, &mut self.out, "File to load")? {
                Some(path) => path,
                None => return self.messages(&[CmdMessage::info("Load cancelled.")]),
            },
        };
        info!("Load requested: {}", path.display());
        let result = self.api.load(path)?;
        self.messages(&result.messages)
    }

    /// Saves to `path`, the document path, or an asked-for path.
    /// Returns `false` if the user cancelled.
    fn save(&mut self, path: Option<PathBuf>) -> Result<bool> {
        let Some(path) = self.save_target(path)? else {
            self.messages(&[CmdMessage::info("Save cancelled.")])?;
            return Ok(false);
        };
        info!("Save requested: {}", path.display());
        let result = self.api.save(path)?;
        self.messages(&result.messages)?;
        Ok(true)
    }

    fn save_target(&mut self, path: Option<PathBuf>) -> Result<Option<PathBuf>> {
        if let Some(path) = path.or_else(|| self.api.document_path().map(PathBuf::from)) {
            return Ok(Some(path));
        }
        Ok(ask_path(&mut self.input, &mut self.out, "Save as")?)
    }

    fn report(&mut self, path: Option<PathBuf>) -> Result<()> {
        info!("Report requested");
        match self.api.report(path) {
            Ok(result) => self.messages(&result.messages),
            // The worker has logged the detail.
            Err(_) => self.messages(&[CmdMessage::error(
                "Report could not be created. See the log for details.",
            )]),
        }
    }

    fn config(&mut self, key: Option<String>, value: Vec<String>) -> Result<()> {
        let action = match (key, value.is_empty()) {
            (None, _) => ConfigAction::ShowAll,
            (Some(key), true) => ConfigAction::ShowKey(key),
            (Some(key), false) => ConfigAction::Set(key, value.join(" ")),
        };
        let result: CmdResult = self.api.config(action)?;
        if let (Some(config), true) = (&result.config, result.messages.is_empty()) {
            write!(self.out, "{}", render_config(config))?;
        }
        self.messages(&result.messages)
    }

    fn help(&mut self, command: Option<&str>) -> Result<()> {
        let text = match command {
            None => grouped_help(),
            Some(name) => match command_help(name) {
                Some(help) => help,
                None => format!("Unknown command: {}\n\n{}", name, grouped_help()),
            },
        };
        write!(self.out, "{}", text)?;
        Ok(())
    }

    fn quit(&mut self) -> Result<Flow> {
        if self.api.request_exit() == ExitDecision::Exit {
            return Ok(Flow::Exit);
        }

        let choice = match ask_exit_choice(&mut self.input, &mut self.out)? {
            Some(choice) => choice,
            None => {
                warn!("Input closed at the exit question; discarding unsaved changes");
                return Ok(Flow::Exit);
            }
        };

        let save_path = match choice {
            ExitChoice::Save => match self.save_target(None)? {
                Some(path) => Some(path),
                None => {
                    self.messages(&[CmdMessage::info("Save cancelled.")])?;
                    return Ok(Flow::Continue);
                }
            },
            _ => None,
        };

        let (outcome, saved) = self.api.resolve_exit(choice, save_path)?;
        if let Some(result) = saved {
            self.messages(&result.messages)?;
        }
        match outcome {
            ExitOutcome::Exit => Ok(Flow::Exit),
            ExitOutcome::Stay => Ok(Flow::Continue),
        }
    }

    fn show_error(&mut self, e: &DogShowError) -> Result<()> {
        self.messages(&[CmdMessage::error(e.to_string())])
    }

    fn messages(&mut self, messages: &[CmdMessage]) -> Result<()> {
        print_messages(&mut self.out, messages)?;
        Ok(())
    }
}

fn is_output_gone(e: &io::Error) -> bool {
    e.kind() == io::ErrorKind::BrokenPipe
}
