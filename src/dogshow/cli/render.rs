use chrono::{DateTime, Utc};
use colored::Colorize;
use dogshow::api::{CmdMessage, DocState, MessageLevel, SessionStatus};
use dogshow::config::DogShowConfig;
use dogshow::index::DisplayEntry;
use dogshow::model::Field;
use std::io::{self, Write};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MAX_CELL_WIDTH: usize = 24;
const SELECTED_MARKER: &str = "*";

pub(super) fn print_messages<W: Write>(out: &mut W, messages: &[CmdMessage]) -> io::Result<()> {
    for message in messages {
        match message.level {
            MessageLevel::Info => writeln!(out, "{}", message.content.dimmed())?,
            MessageLevel::Success => writeln!(out, "{}", message.content.green())?,
            MessageLevel::Warning => writeln!(out, "{}", message.content.yellow())?,
            MessageLevel::Error => writeln!(out, "{}", message.content.red())?,
        }
    }
    Ok(())
}

/// Renders rows as an aligned table: marker, row number, then the five fields.
pub(super) fn render_table(entries: &[DisplayEntry]) -> String {
    let cells: Vec<Vec<String>> = entries
        .iter()
        .map(|de| {
            de.entry
                .values()
                .iter()
                .map(|value| truncate_to_width(value, MAX_CELL_WIDTH))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = Field::ALL.iter().map(|f| f.label().width()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }
    let index_width = entries
        .last()
        .map(|de| de.index.to_string().len())
        .unwrap_or(1)
        .max(1);

    let mut output = String::new();
    let header: Vec<String> = Field::ALL
        .iter()
        .zip(&widths)
        .map(|(field, &width)| pad(field.label(), width))
        .collect();
    output.push_str(&format!(
        "  {:>iw$}  {}\n",
        "#",
        header.join("  ").bold(),
        iw = index_width
    ));

    for (de, row) in entries.iter().zip(&cells) {
        let marker = if de.selected {
            SELECTED_MARKER.yellow().to_string()
        } else {
            " ".to_string()
        };
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| pad(cell, width))
            .collect();
        let number = format!("{:>iw$}", de.index.to_string(), iw = index_width);
        let number = if de.selected {
            number.yellow().to_string()
        } else {
            number
        };
        output.push_str(&format!("{} {}  {}\n", marker, number, line.join("  ").trim_end()));
    }
    output
}

pub(super) fn render_status(status: &SessionStatus) -> String {
    let state = match status.state {
        DocState::Clean => "clean".green().to_string(),
        DocState::Dirty => "unsaved changes".yellow().to_string(),
    };
    let file = status
        .document_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none)".to_string());
    let saved = status
        .last_saved_at
        .map(format_time_ago)
        .unwrap_or_else(|| "never".to_string());

    format!(
        "State:      {}\nRows:       {} ({} selected)\nFile:       {}\nLast saved: {}\nConfig:     {}\n",
        state,
        status.rows,
        status.selected,
        file,
        saved,
        status.config_dir.display()
    )
}

pub(super) fn render_config(config: &DogShowConfig) -> String {
    let key_width = DogShowConfig::KEYS.iter().map(|k| k.len()).max().unwrap_or(0);
    config
        .entries()
        .into_iter()
        .map(|(key, value)| format!("{:<kw$} = {}\n", key, value, kw = key_width))
        .collect()
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(fill))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}
