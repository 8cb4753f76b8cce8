//! Interactive questions asked mid-command: the entry form, file paths and
//! the exit confirmation.
//!
//! Everything reads through a `BufRead` and writes through a `Write`, so the
//! session works the same on a terminal, a pipe or a test buffer. End of input
//! is reported as `None`; no prompt ever blocks on a closed stdin.

use dogshow::api::ExitChoice;
use dogshow::error::Result;
use dogshow::form::EntryForm;
use dogshow::model::{DogEntry, Field};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

pub(super) const EXIT_QUESTION: &str =
    "Unsaved changes. Save before exit? [s]ave / [d]iscard / [c]ancel";
pub(super) const FILL_ALL_FIELDS: &str = "All fields must be filled in.";

/// Reads one line without its line ending, or `None` at end of input.
pub(super) fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed_len);
    Ok(Some(line))
}

pub(super) fn ask<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &str,
) -> io::Result<Option<String>> {
    write!(out, "{}: ", question)?;
    out.flush()?;
    read_line(input)
}

/// Asks for each of `fields` in turn and submits the form.
///
/// A field that already has a value shows it as the default, and a blank
/// answer keeps it. A blank answer for an empty field repeats the question.
/// Returns `None` if input ends before the form is complete.
pub(super) fn fill_form<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    mut form: EntryForm,
    fields: &[Field],
) -> Result<Option<DogEntry>> {
    for &field in fields {
        loop {
            let current = form.get(field).to_string();
            let has_value = !current.trim().is_empty();
            let question = if !has_value {
                field.label().to_string()
            } else {
                format!("{} [{}]", field.label(), current)
            };

            let Some(answer) = ask(input, out, &question)? else {
                writeln!(out)?;
                return Ok(None);
            };
            if !answer.trim().is_empty() {
                form.set(field, &answer);
                break;
            }
            if has_value {
                break;
            }
            writeln!(out, "{}", FILL_ALL_FIELDS)?;
        }
    }
    form.submit().map(Some)
}

/// Stands in for a file chooser. A blank answer or end of input cancels.
pub(super) fn ask_path<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &str,
) -> io::Result<Option<PathBuf>> {
    Ok(ask(input, out, question)?
        .map(|answer| answer.trim().to_string())
        .filter(|answer| !answer.is_empty())
        .map(PathBuf::from))
}

/// Asks until the answer is one of save, discard or cancel.
/// Returns `None` at end of input.
pub(super) fn ask_exit_choice<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<ExitChoice>> {
    loop {
        let Some(answer) = ask(input, out, EXIT_QUESTION)? else {
            writeln!(out)?;
            return Ok(None);
        };
        match answer.trim().to_lowercase().as_str() {
            "s" | "save" => return Ok(Some(ExitChoice::Save)),
            "d" | "discard" => return Ok(Some(ExitChoice::Discard)),
            "c" | "cancel" => return Ok(Some(ExitChoice::Cancel)),
            _ => writeln!(out, "Please answer s, d or c.")?,
        }
    }
}
