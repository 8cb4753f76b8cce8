//! # HTML Reports
//!
//! A report is every entry of the store rendered as one table row, plus two
//! parameters: `ReportTitle` and `Author`. Layout belongs to the template, not
//! to this module. The built-in layout ships with the crate; a config value can
//! point at a replacement file, which is read fresh on every run.
//!
//! [`ReportEngine`] is the seam between the controller and the engine, so the
//! worker can be driven by a stub in tests.

use crate::config::DogShowConfig;
use crate::error::{DogShowError, Result};
use crate::model::{DogEntry, Field};
use chrono::Local;
use log::debug;
use minijinja::{context, Environment};
use std::fs;
use std::path::{Path, PathBuf};

const BUILTIN_TEMPLATE: &str = include_str!("../../templates/report.html.jinja");
const TEMPLATE_NAME: &str = "report.html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportParams {
    pub title: String,
    pub author: String,
}

impl ReportParams {
    pub fn from_config(config: &DogShowConfig) -> Self {
        Self {
            title: config.report_title.clone(),
            author: config.report_author.clone(),
        }
    }
}

pub trait ReportEngine: Send {
    /// Renders the whole report document.
    fn render(&self, entries: &[DogEntry], params: &ReportParams) -> Result<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TemplateSource {
    BuiltIn,
    File(PathBuf),
}

/// Jinja-templated report engine.
#[derive(Debug, Clone)]
pub struct TemplateReport {
    source: TemplateSource,
}

impl TemplateReport {
    pub fn builtin() -> Self {
        Self {
            source: TemplateSource::BuiltIn,
        }
    }

    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: TemplateSource::File(path.into()),
        }
    }

    pub fn from_config(config: &DogShowConfig) -> Self {
        match &config.report_template {
            Some(path) => Self::from_file(path),
            None => Self::builtin(),
        }
    }

    fn template_source(&self) -> Result<String> {
        match &self.source {
            TemplateSource::BuiltIn => Ok(BUILTIN_TEMPLATE.to_string()),
            TemplateSource::File(path) => fs::read_to_string(path).map_err(|e| {
                DogShowError::ReportGeneration(format!(
                    "cannot read template {}: {}",
                    path.display(),
                    e
                ))
            }),
        }
    }
}

impl ReportEngine for TemplateReport {
    fn render(&self, entries: &[DogEntry], params: &ReportParams) -> Result<String> {
        let source = self.template_source()?;
        let report_err = |e: minijinja::Error| DogShowError::ReportGeneration(e.to_string());

        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, &source)
            .map_err(report_err)?;
        let template = env.get_template(TEMPLATE_NAME).map_err(report_err)?;

        let columns: Vec<&str> = Field::ALL.iter().map(|f| f.label()).collect();
        let generated_at = Local::now().format("%Y-%m-%d %H:%M").to_string();

        template
            .render(context! {
                ReportTitle => params.title,
                Author => params.author,
                columns,
                rows => entries,
                generated_at,
            })
            .map_err(report_err)
    }
}

/// Renders the report and writes it to `output`.
pub fn generate(
    engine: &dyn ReportEngine,
    entries: &[DogEntry],
    params: &ReportParams,
    output: &Path,
) -> Result<()> {
    let html = engine.render(entries, params)?;
    fs::write(output, html)?;
    debug!(
        "Report with {} rows written to {}",
        entries.len(),
        output.display()
    );
    Ok(())
}
