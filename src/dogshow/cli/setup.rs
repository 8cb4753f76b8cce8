use clap::{Args, CommandFactory, Parser, Subcommand};
use dogshow::model::Field;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dogshow", bin_name = "dogshow", version)]
#[command(about = "Keep the entry roster of a dog show", long_about = None)]
pub struct Cli {
    /// Roster file to load at startup
    pub file: Option<PathBuf>,

    /// Directory holding config.json (default: $DOGSHOW_CONFIG_DIR or the platform config dir)
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Verbose logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// One line typed at the session prompt.
#[derive(Parser, Debug)]
#[command(
    name = "dogshow",
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Add an entry (prompts for fields not given)
    #[command(alias = "a", display_order = 1)]
    Add(EntryFields),

    /// Edit a row, or the first selected row
    #[command(alias = "e", display_order = 2)]
    Edit {
        /// Row number (defaults to the first selected row)
        row: Option<String>,

        #[command(flatten)]
        fields: EntryFields,
    },

    /// Delete rows, or the selected rows
    #[command(alias = "rm", display_order = 3)]
    Delete {
        /// Rows to delete (e.g. 3 5-7)
        #[arg(num_args = 0..)]
        rows: Vec<String>,
    },

    /// Select rows (no rows clears the selection)
    #[command(alias = "sel", display_order = 4)]
    Select {
        /// Rows to select (e.g. 1 4-6)
        #[arg(num_args = 0..)]
        rows: Vec<String>,
    },

    /// Show the table
    #[command(alias = "ls", display_order = 5)]
    List,

    /// Select rows whose field contains the text
    #[command(alias = "find", display_order = 6)]
    Search {
        /// name, breed, owner, judge or award
        field: Field,

        /// Text to look for
        #[arg(num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
        query: Vec<String>,
    },

    /// Replace the table with a roster file
    #[command(display_order = 10)]
    Load { path: Option<PathBuf> },

    /// Write the table to a roster file
    #[command(display_order = 11)]
    Save { path: Option<PathBuf> },

    /// Write the HTML report
    #[command(display_order = 12)]
    Report { path: Option<PathBuf> },

    /// Show whether there are unsaved changes
    #[command(display_order = 20)]
    Status,

    /// Get or set configuration
    #[command(display_order = 21)]
    Config {
        /// Configuration key (e.g. report-title)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        #[arg(num_args = 0.., trailing_var_arg = true)]
        value: Vec<String>,
    },

    /// Print help for the session or a command
    #[command(alias = "?", display_order = 22)]
    Help { command: Option<String> },

    /// Leave the session
    #[command(alias = "exit", alias = "q", display_order = 23)]
    Quit,
}

#[derive(Args, Debug, Default, Clone)]
pub struct EntryFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub breed: Option<String>,
    #[arg(long)]
    pub owner: Option<String>,
    #[arg(long)]
    pub judge: Option<String>,
    #[arg(long)]
    pub award: Option<String>,
}

impl EntryFields {
    /// The fields given on the command line, in column order.
    pub fn given(&self) -> Vec<(Field, &str)> {
        let values = [
            (Field::Name, &self.name),
            (Field::Breed, &self.breed),
            (Field::Owner, &self.owner),
            (Field::Judge, &self.judge),
            (Field::Award, &self.award),
        ];
        values
            .into_iter()
            .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.given().is_empty()
    }
}

/// Splits a session line into words. Single or double quotes group words;
/// a backslash escapes the next character outside single quotes.
pub fn split_line(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('"'), '\\') | (None, '\\') => match chars.next() {
                Some(escaped) => {
                    current.push(escaped);
                    in_word = true;
                }
                None => return Err("Line ends with a lone backslash".to_string()),
            },
            (Some(_), c) => current.push(c),
            (None, '"') | (None, '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err("Unterminated quote".to_string());
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandGroup {
    Entries,
    Files,
    Session,
}

impl CommandGroup {
    fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Entries => "Entry Commands:",
            CommandGroup::Files => "File Commands:",
            CommandGroup::Session => "Session:",
        }
    }

    fn for_command(name: &str) -> Option<Self> {
        match name {
            "add" | "edit" | "delete" | "select" | "list" | "search" => {
                Some(CommandGroup::Entries)
            }
            "load" | "save" | "report" => Some(CommandGroup::Files),
            "status" | "config" | "help" | "quit" => Some(CommandGroup::Session),
            _ => None,
        }
    }

    fn all() -> &'static [CommandGroup] {
        &[
            CommandGroup::Entries,
            CommandGroup::Files,
            CommandGroup::Session,
        ]
    }
}

/// Grouped overview of the session commands.
pub fn grouped_help() -> String {
    let cmd = SessionLine::command();
    let subcommands: Vec<_> = cmd.get_subcommands().collect();

    let mut output = String::from("Commands (rows are numbered from 1; ranges like 2-4 work):\n");
    for group in CommandGroup::all() {
        output.push('\n');
        output.push_str(&format!("{}\n", group.heading()));
        for sc in subcommands
            .iter()
            .filter(|sc| CommandGroup::for_command(sc.get_name()) == Some(*group))
        {
            let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
            output.push_str(&format!("  {:<10} {}\n", sc.get_name(), about));
        }
    }
    output
}

/// Help for one command, or `None` if there is no such command.
pub fn command_help(name: &str) -> Option<String> {
    let mut cmd = SessionLine::command();
    let help = cmd
        .get_subcommands_mut()
        .find(|sc| sc.get_name() == name || sc.get_all_aliases().any(|a| a == name))
        .map(|sc| sc.render_help().to_string());
    help
}
