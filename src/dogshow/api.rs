//! # API Facade
//!
//! [`DogShowApi`] is the application controller and the single entry point
//! for every UI. It owns everything the UI thread may touch:
//!
//! - the shared [`RecordStore`](crate::store::RecordStore)
//! - the selection (zero-based row positions)
//! - the document state, [`DocState::Clean`] or [`DocState::Dirty`]
//! - the document path and the time of the last save
//! - the loaded [`DogShowConfig`]
//!
//! Business logic lives in `commands/*.rs`. The facade parses row references,
//! picks the rows a command acts on, and moves the document state:
//!
//! ```text
//!   add / edit / delete          -> Dirty
//!   save ok, load ok             -> Clean
//!   exit while Clean             -> exit
//!   exit while Dirty             -> ask: save / discard / cancel
//! ```
//!
//! ## Background tasks
//!
//! Load, save and report run on the [`TaskWorker`]. `start_*` queues a task
//! and returns its ticket; [`DogShowApi::poll`] and [`DogShowApi::wait`]
//! collect completions and apply them here, on the caller's thread. A save or
//! load marks the document clean only if the store revision has not moved
//! since the task finished, so an edit that lands after a save keeps the
//! document dirty.
//!
//! Nothing in this module prints. Results are [`CmdResult`] values and errors
//! are [`DogShowError`]s for the UI to present; each error is also logged.

use crate::commands;
use crate::config::DogShowConfig;
use crate::error::{DogShowError, Result};
use crate::index::{parse_rows, RowIndex};
use crate::model::{DogEntry, Field};
use crate::report::{ReportEngine, ReportParams, TemplateReport};
use crate::store::{lock, shared, RecordStore, SharedStore};
use crate::worker::{Completion, Task, TaskKind, TaskWorker};
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocState {
    Clean,
    Dirty,
}

/// What happens when the user asks to leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitDecision {
    Exit,
    /// Unsaved changes; the user has to pick an [`ExitChoice`].
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitChoice {
    Save,
    Discard,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    Exit,
    Stay,
}

#[derive(Debug, Clone)]
pub struct SessionStatus {
    pub state: DocState,
    pub rows: usize,
    pub selected: usize,
    pub document_path: Option<PathBuf>,
    pub last_saved_at: Option<DateTime<Utc>>,
    pub config_dir: PathBuf,
}

pub struct DogShowApi {
    store: SharedStore,
    worker: TaskWorker,
    state: DocState,
    selection: BTreeSet<usize>,
    document_path: Option<PathBuf>,
    last_saved_at: Option<DateTime<Utc>>,
    config: DogShowConfig,
    config_dir: PathBuf,
}

impl DogShowApi {
    /// Starts a session with an empty store, reading config from `config_dir`.
    pub fn new(config_dir: impl Into<PathBuf>) -> Result<Self> {
        let config_dir = config_dir.into();
        let config = DogShowConfig::load(&config_dir)?;
        Self::with_config(config, config_dir)
    }

    pub fn with_config(config: DogShowConfig, config_dir: impl Into<PathBuf>) -> Result<Self> {
        let store = shared(RecordStore::new());
        let worker = TaskWorker::spawn(store.clone())?;
        Ok(Self {
            store,
            worker,
            state: DocState::Clean,
            selection: BTreeSet::new(),
            document_path: None,
            last_saved_at: None,
            config,
            config_dir: config_dir.into(),
        })
    }

    // --- Record editing ---

    pub fn add_entry(&mut self, entry: DogEntry) -> Result<CmdResult> {
        debug!("Add requested");
        let result = commands::add::run(&mut lock(&self.store), entry);
        self.mark_dirty();
        Ok(result)
    }

    /// Picks the row an edit applies to: `row` if given, otherwise the first
    /// selected row. Returns the zero-based position and a copy of the entry.
    pub fn edit_target(&self, row: Option<&str>) -> Result<(usize, DogEntry)> {
        let position = match row {
            Some(text) => RowIndex::from_str(text)
                .map_err(DogShowError::InvalidRow)
                .map(RowIndex::position),
            None => self.selection.iter().next().copied().ok_or_else(|| {
                DogShowError::InvalidSelection("Select a row to edit first.".to_string())
            }),
        }
        .map_err(logged)?;

        let store = lock(&self.store);
        let entry = store
            .get(position)
            .cloned()
            .ok_or(DogShowError::IndexOutOfRange {
                index: position,
                len: store.row_count(),
            })
            .map_err(logged)?;
        Ok((position, entry))
    }

    pub fn update_entry(&mut self, position: usize, entry: DogEntry) -> Result<CmdResult> {
        let result =
            commands::update::run(&mut lock(&self.store), position, entry).map_err(logged)?;
        self.mark_dirty();
        Ok(result)
    }

    /// Deletes the given rows ("3", "2-5"), or the selection when `rows` is empty.
    pub fn delete_entries<I: AsRef<str>>(&mut self, rows: &[I]) -> Result<CmdResult> {
        let positions = if rows.is_empty() {
            self.selection.clone()
        } else {
            let len = lock(&self.store).row_count();
            parse_rows(rows, len).map_err(logged)?
        };
        let result = commands::delete::run(&mut lock(&self.store), &positions).map_err(logged)?;
        self.selection.clear();
        self.mark_dirty();
        Ok(result)
    }

    // --- Selection and search ---

    pub fn select<I: AsRef<str>>(&mut self, rows: &[I]) -> Result<CmdResult> {
        let len = lock(&self.store).row_count();
        let positions = parse_rows(rows, len).map_err(logged)?;
        let result = commands::select::run(&lock(&self.store), &positions).map_err(logged)?;
        self.selection = result.selected_rows.iter().copied().collect();
        Ok(result)
    }

    /// Searches one field and selects the matching rows.
    pub fn search(&mut self, field: Field, query: &str) -> Result<CmdResult> {
        let result = commands::search::run(&lock(&self.store), field, query).map_err(logged)?;
        self.selection = result.selected_rows.iter().copied().collect();
        Ok(result)
    }

    pub fn list(&self) -> CmdResult {
        commands::list::run(&lock(&self.store), &self.selection)
    }

    // --- Background tasks ---

    pub fn start_load(&mut self, path: impl Into<PathBuf>) -> Result<u64> {
        self.worker.dispatch(Task::Load(path.into()))
    }

    pub fn start_save(&mut self, path: impl Into<PathBuf>) -> Result<u64> {
        self.worker.dispatch(Task::Save(path.into()))
    }

    /// Queues a report with the configured engine and parameters. Without a
    /// path the report goes to the configured `report-path`.
    pub fn start_report(&mut self, path: Option<PathBuf>) -> Result<u64> {
        let engine = TemplateReport::from_config(&self.config);
        self.start_report_with(Box::new(engine), path)
    }

    pub fn start_report_with(
        &mut self,
        engine: Box<dyn ReportEngine>,
        path: Option<PathBuf>,
    ) -> Result<u64> {
        let path = path.unwrap_or_else(|| self.config.report_path.clone());
        let params = ReportParams::from_config(&self.config);
        self.worker.dispatch(Task::Report {
            path,
            params,
            engine,
        })
    }

    /// Applies every completion that is already available, without blocking.
    pub fn poll(&mut self) -> Vec<Result<CmdResult>> {
        let mut applied = Vec::new();
        loop {
            match self.worker.try_next() {
                Ok(Some(completion)) => applied.push(self.apply(completion)),
                Ok(None) => break,
                Err(e) => {
                    applied.push(Err(logged(e)));
                    break;
                }
            }
        }
        applied
    }

    /// Blocks until the next task finishes and applies it.
    pub fn wait(&mut self) -> Result<CmdResult> {
        let completion = self.worker.wait_next().map_err(logged)?;
        self.apply(completion)
    }

    pub fn tasks_in_flight(&self) -> usize {
        self.worker.in_flight()
    }

    /// Loads `path` and waits for it.
    pub fn load(&mut self, path: impl Into<PathBuf>) -> Result<CmdResult> {
        let ticket = self.start_load(path)?;
        self.finish(ticket)
    }

    /// Saves to `path` and waits for it.
    pub fn save(&mut self, path: impl Into<PathBuf>) -> Result<CmdResult> {
        let ticket = self.start_save(path)?;
        self.finish(ticket)
    }

    /// Writes the report and waits for it.
    pub fn report(&mut self, path: Option<PathBuf>) -> Result<CmdResult> {
        let ticket = self.start_report(path)?;
        self.finish(ticket)
    }

    fn finish(&mut self, ticket: u64) -> Result<CmdResult> {
        loop {
            let completion = self.worker.wait_next().map_err(logged)?;
            let done = completion.ticket == ticket;
            let outcome = self.apply(completion);
            if done {
                return outcome;
            }
        }
    }

    fn apply(&mut self, completion: Completion) -> Result<CmdResult> {
        let Completion {
            ticket,
            kind,
            path,
            revision,
            outcome,
        } = completion;
        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                error!("{} of {} failed: {}", kind, path.display(), e);
                return Err(e);
            }
        };
        debug!("Applying {} task #{}", kind, ticket);

        match kind {
            TaskKind::Load => {
                self.selection.clear();
                self.document_path = Some(path);
                self.settle(revision);
            }
            TaskKind::Save => {
                self.document_path = Some(path);
                self.last_saved_at = Some(Utc::now());
                self.settle(revision);
            }
            TaskKind::Report => {}
        }
        Ok(result)
    }

    /// Marks the document clean unless the store changed after the task ran.
    fn settle(&mut self, revision: u64) {
        if lock(&self.store).revision() == revision {
            self.state = DocState::Clean;
        } else {
            info!("Store changed while a task ran; document stays dirty");
            self.state = DocState::Dirty;
        }
    }

    fn mark_dirty(&mut self) {
        self.state = DocState::Dirty;
    }

    // --- Exit ---

    pub fn request_exit(&self) -> ExitDecision {
        match self.state {
            DocState::Clean => ExitDecision::Exit,
            DocState::Dirty => ExitDecision::Confirm,
        }
    }

    /// Acts on the user's answer to the exit prompt.
    ///
    /// `Save` writes to `save_path`, falling back to the document path, and
    /// hands back the save's result. With neither path there is nowhere to
    /// save, so the session stays open. A failed save is returned as the
    /// error and the session stays open too.
    pub fn resolve_exit(
        &mut self,
        choice: ExitChoice,
        save_path: Option<PathBuf>,
    ) -> Result<(ExitOutcome, Option<CmdResult>)> {
        match choice {
            ExitChoice::Cancel => {
                debug!("Exit cancelled");
                Ok((ExitOutcome::Stay, None))
            }
            ExitChoice::Discard => {
                warn!("Exiting with unsaved changes discarded");
                Ok((ExitOutcome::Exit, None))
            }
            ExitChoice::Save => {
                let Some(path) = save_path.or_else(|| self.document_path.clone()) else {
                    info!("Save before exit cancelled: no path");
                    return Ok((ExitOutcome::Stay, None));
                };
                let result = self.save(path)?;
                Ok((ExitOutcome::Exit, Some(result)))
            }
        }
    }

    // --- State ---

    pub fn state(&self) -> DocState {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.state == DocState::Dirty
    }

    pub fn selection(&self) -> &BTreeSet<usize> {
        &self.selection
    }

    pub fn document_path(&self) -> Option<&Path> {
        self.document_path.as_deref()
    }

    pub fn entries(&self) -> Vec<DogEntry> {
        lock(&self.store).all().to_vec()
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            state: self.state,
            rows: lock(&self.store).row_count(),
            selected: self.selection.len(),
            document_path: self.document_path.clone(),
            last_saved_at: self.last_saved_at,
            config_dir: self.config_dir.clone(),
        }
    }

    // --- Config ---

    pub fn config(&mut self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&mut self.config, &self.config_dir, action).map_err(logged)
    }

    pub fn current_config(&self) -> &DogShowConfig {
        &self.config
    }
}

fn logged(e: DogShowError) -> DogShowError {
    warn!("{}", e);
    e
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::xml;
    use std::fs;

    const ONE_DOG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<doglist>
  <dog name="Rex" breed="Labrador" owner="Alice" judge="Bob" award="Best in Show"/>
</doglist>
"#;

    struct Fixture {
        dir: tempfile::TempDir,
        api: DogShowApi,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let api = DogShowApi::new(dir.path().join("config")).unwrap();
            Self { dir, api }
        }

        fn path(&self, name: &str) -> PathBuf {
            self.dir.path().join(name)
        }

        fn add(&mut self, name: &str, breed: &str) {
            self.api
                .add_entry(DogEntry::new(name, breed, "Owner", "Judge", "Award"))
                .unwrap();
        }

        fn names(&self) -> Vec<String> {
            self.api.entries().into_iter().map(|e| e.name).collect()
        }
    }

    #[test]
    fn starts_clean_and_empty() {
        let fx = Fixture::new();
        assert_eq!(fx.api.state(), DocState::Clean);
        assert!(fx.api.entries().is_empty());
        assert_eq!(fx.api.request_exit(), ExitDecision::Exit);
    }

    #[test]
    fn add_marks_dirty() {
        let mut fx = Fixture::new();
        fx.add("Rex", "Labrador");
        assert!(fx.api.is_dirty());
        assert_eq!(fx.names(), ["Rex"]);
    }

    #[test]
    fn edit_without_selection_is_invalid_and_changes_nothing() {
        let mut fx = Fixture::new();
        fx.add("Rex", "Labrador");
        let before = fx.api.entries();

        let err = fx.api.edit_target(None).unwrap_err();
        assert!(matches!(err, DogShowError::InvalidSelection(_)));
        assert_eq!(fx.api.entries(), before);
    }

    #[test]
    fn edit_uses_first_selected_row() {
        let mut fx = Fixture::new();
        fx.add("A", "Pug");
        fx.add("B", "Pug");
        fx.add("C", "Pug");
        fx.api.select(&["2-3"]).unwrap();

        let (position, entry) = fx.api.edit_target(None).unwrap();
        assert_eq!(position, 1);
        assert_eq!(entry.name, "B");
    }

    #[test]
    fn edit_explicit_row_out_of_range() {
        let mut fx = Fixture::new();
        fx.add("A", "Pug");
        assert!(matches!(
            fx.api.edit_target(Some("4")),
            Err(DogShowError::IndexOutOfRange { index: 3, len: 1 })
        ));
        assert!(matches!(
            fx.api.edit_target(Some("x")),
            Err(DogShowError::InvalidRow(_))
        ));
    }

    #[test]
    fn update_replaces_entry_and_marks_dirty() {
        let mut fx = Fixture::new();
        fx.add("A", "Pug");
        fx.api.save(fx.path("dogs.xml")).unwrap();
        assert!(!fx.api.is_dirty());

        let (position, mut entry) = fx.api.edit_target(Some("1")).unwrap();
        entry.award = "Reserve".into();
        fx.api.update_entry(position, entry).unwrap();

        assert!(fx.api.is_dirty());
        assert_eq!(fx.api.entries()[0].award, "Reserve");
    }

    #[test]
    fn delete_without_rows_uses_selection() {
        let mut fx = Fixture::new();
        for name in ["A", "B", "C", "D"] {
            fx.add(name, "Pug");
        }
        fx.api.select(&["4", "2"]).unwrap();
        fx.api.delete_entries::<&str>(&[]).unwrap();

        assert_eq!(fx.names(), ["A", "C"]);
        assert!(fx.api.selection().is_empty());
    }

    #[test]
    fn delete_with_nothing_selected_is_invalid() {
        let mut fx = Fixture::new();
        fx.add("A", "Pug");
        fx.api.save(fx.path("dogs.xml")).unwrap();

        let err = fx.api.delete_entries::<&str>(&[]).unwrap_err();
        assert!(matches!(err, DogShowError::InvalidSelection(_)));
        assert_eq!(fx.names(), ["A"]);
        assert!(!fx.api.is_dirty());
    }

    #[test]
    fn delete_explicit_rows_in_any_order() {
        let mut fx = Fixture::new();
        for name in ["A", "B", "C", "D", "E"] {
            fx.add(name, "Pug");
        }
        fx.api.delete_entries(&["4", "2"]).unwrap();
        assert_eq!(fx.names(), ["A", "C", "E"]);
    }

    #[test]
    fn huge_range_is_out_of_range_and_changes_nothing() {
        let mut fx = Fixture::new();
        fx.add("A", "Pug");
        fx.add("B", "Pug");
        fx.api.select(&["2"]).unwrap();
        let huge = format!("1-{}", usize::MAX);

        let err = fx.api.delete_entries(&[huge.as_str()]).unwrap_err();
        assert!(matches!(err, DogShowError::IndexOutOfRange { len: 2, .. }));
        assert!(fx.api.select(&[huge.as_str()]).is_err());

        assert_eq!(fx.names(), ["A", "B"]);
        assert_eq!(fx.api.selection().len(), 1);
    }

    #[test]
    fn search_selects_matches() {
        let mut fx = Fixture::new();
        fx.add("Rex", "Labrador");
        fx.add("Fifi", "Poodle");
        fx.add("Bo", "Labradoodle");

        fx.api.search(Field::Breed, "lab").unwrap();
        assert_eq!(fx.api.selection(), &BTreeSet::from([0, 2]));

        let listed = fx.api.list().listed_entries;
        let marked: Vec<_> = listed.iter().map(|d| d.selected).collect();
        assert_eq!(marked, [true, false, true]);
    }

    #[test]
    fn blank_search_is_rejected_for_every_field() {
        let mut fx = Fixture::new();
        fx.add("Rex", "Labrador");
        for field in Field::ALL {
            assert!(matches!(
                fx.api.search(field, "   "),
                Err(DogShowError::EmptyQuery)
            ));
        }
    }

    #[test]
    fn save_clears_dirty_and_next_mutation_sets_it() {
        let mut fx = Fixture::new();
        fx.add("Rex", "Labrador");
        let path = fx.path("dogs.xml");

        let result = fx.api.save(&path).unwrap();
        assert_eq!(result.written_path.as_deref(), Some(path.as_path()));
        assert_eq!(fx.api.state(), DocState::Clean);
        assert_eq!(fx.api.document_path(), Some(path.as_path()));
        assert!(fx.api.status().last_saved_at.is_some());

        fx.add("Fifi", "Poodle");
        assert_eq!(fx.api.state(), DocState::Dirty);
    }

    #[test]
    fn save_of_an_older_revision_keeps_document_dirty() {
        let mut fx = Fixture::new();
        fx.add("Rex", "Labrador");
        let saved_revision = lock(&fx.api.store).revision();
        fx.add("Late", "Pug");

        let completion = Completion {
            ticket: 7,
            kind: TaskKind::Save,
            path: fx.path("dogs.xml"),
            revision: saved_revision,
            outcome: Ok(CmdResult::default()),
        };
        fx.api.apply(completion).unwrap();

        assert!(fx.api.is_dirty());
        assert!(fx.api.status().last_saved_at.is_some());
    }

    #[test]
    fn load_replaces_store_and_marks_clean() {
        let mut fx = Fixture::new();
        fx.add("Old", "Pug");
        fx.api.select(&["1"]).unwrap();
        let path = fx.path("one.xml");
        fs::write(&path, ONE_DOG).unwrap();

        fx.api.load(&path).unwrap();

        assert_eq!(
            fx.api.entries(),
            [DogEntry::new("Rex", "Labrador", "Alice", "Bob", "Best in Show")]
        );
        assert_eq!(fx.api.state(), DocState::Clean);
        assert!(fx.api.selection().is_empty());
        assert_eq!(fx.api.document_path(), Some(path.as_path()));
    }

    #[test]
    fn malformed_load_leaves_store_and_state_alone() {
        let mut fx = Fixture::new();
        fx.add("Keep", "Pug");
        let path = fx.path("bad.xml");
        fs::write(&path, "<doglist><dog name=\"x\"></doglist>").unwrap();

        let err = fx.api.load(&path).unwrap_err();
        assert!(matches!(err, DogShowError::Parse { .. }));
        assert_eq!(fx.names(), ["Keep"]);
        assert!(fx.api.is_dirty());
        assert_eq!(fx.api.document_path(), None);
    }

    #[test]
    fn poll_applies_finished_tasks() {
        let mut fx = Fixture::new();
        fx.add("Rex", "Labrador");
        fx.api.start_save(fx.path("dogs.xml")).unwrap();

        let mut applied = Vec::new();
        while fx.api.tasks_in_flight() > 0 {
            applied.extend(fx.api.poll());
            std::thread::yield_now();
        }
        assert_eq!(applied.len(), 1);
        assert!(applied[0].is_ok());
        assert!(!fx.api.is_dirty());
    }

    #[test]
    fn report_writes_every_entry_escaped() {
        let mut fx = Fixture::new();
        fx.add("Rex & Co", "Labrador");
        fx.add("<Fifi>", "Poodle");
        let out = fx.path("report.html");

        fx.api.report(Some(out.clone())).unwrap();

        let html = fs::read_to_string(&out).unwrap();
        assert!(html.contains("Rex &amp; Co"));
        assert!(html.contains("&lt;Fifi&gt;"));
        assert!(html.contains("Dog Show Report"));
        assert!(fx.api.is_dirty());
    }

    #[test]
    fn report_with_missing_template_fails() {
        let mut fx = Fixture::new();
        let template = fx.path("gone.jinja");
        fx.api
            .config(ConfigAction::Set(
                "report-template".into(),
                template.display().to_string(),
            ))
            .unwrap();

        let out = fx.path("report.html");
        let err = fx.api.report(Some(out.clone())).unwrap_err();
        assert!(matches!(err, DogShowError::ReportGeneration(_)));
        assert!(!out.exists());
    }

    #[test]
    fn report_uses_configured_parameters() {
        struct Capture;
        impl ReportEngine for Capture {
            fn render(&self, entries: &[DogEntry], params: &ReportParams) -> Result<String> {
                Ok(format!("{}|{}|{}", params.title, params.author, entries.len()))
            }
        }

        let mut fx = Fixture::new();
        fx.add("Rex", "Labrador");
        fx.api
            .config(ConfigAction::Set("report-title".into(), "Spring".into()))
            .unwrap();
        let out = fx.path("r.txt");
        let ticket = fx
            .api
            .start_report_with(Box::new(Capture), Some(out.clone()))
            .unwrap();
        assert_eq!(ticket, 1);
        fx.api.wait().unwrap();

        assert_eq!(
            fs::read_to_string(out).unwrap(),
            "Spring|Dog Show Administration|1"
        );
    }

    #[test]
    fn exit_while_dirty_asks_and_cancel_changes_nothing() {
        let mut fx = Fixture::new();
        fx.add("Rex", "Labrador");
        fx.api.select(&["1"]).unwrap();

        assert_eq!(fx.api.request_exit(), ExitDecision::Confirm);
        let (outcome, _) = fx.api.resolve_exit(ExitChoice::Cancel, None).unwrap();

        assert_eq!(outcome, ExitOutcome::Stay);
        assert!(fx.api.is_dirty());
        assert_eq!(fx.names(), ["Rex"]);
        assert_eq!(fx.api.selection().len(), 1);
    }

    #[test]
    fn exit_discard_exits_without_writing() {
        let mut fx = Fixture::new();
        fx.add("Rex", "Labrador");
        let (outcome, saved) = fx.api.resolve_exit(ExitChoice::Discard, None).unwrap();
        assert_eq!(outcome, ExitOutcome::Exit);
        assert!(saved.is_none());
        assert!(fx.api.is_dirty());
    }

    #[test]
    fn exit_save_writes_then_exits() {
        let mut fx = Fixture::new();
        fx.add("Rex", "Labrador");
        let path = fx.path("dogs.xml");

        let (outcome, saved) = fx
            .api
            .resolve_exit(ExitChoice::Save, Some(path.clone()))
            .unwrap();

        assert_eq!(outcome, ExitOutcome::Exit);
        assert_eq!(xml::read_file(&path).unwrap().len(), 1);
        let saved = saved.unwrap();
        assert_eq!(saved.messages[0].content, "Data saved to dogs.xml");
        assert_eq!(saved.written_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn exit_save_without_any_path_stays() {
        let mut fx = Fixture::new();
        fx.add("Rex", "Labrador");
        let (outcome, saved) = fx.api.resolve_exit(ExitChoice::Save, None).unwrap();
        assert_eq!(outcome, ExitOutcome::Stay);
        assert!(saved.is_none());
        assert!(fx.api.is_dirty());
    }

    #[test]
    fn exit_save_failure_stays_open() {
        let mut fx = Fixture::new();
        fx.add("Rex", "Labrador");
        let path = fx.path("missing-dir/dogs.xml");
        assert!(fx.api.resolve_exit(ExitChoice::Save, Some(path)).is_err());
        assert!(fx.api.is_dirty());
    }

    #[test]
    fn status_reports_session_state() {
        let mut fx = Fixture::new();
        fx.add("A", "Pug");
        fx.add("B", "Pug");
        fx.api.select(&["1"]).unwrap();

        let status = fx.api.status();
        assert_eq!(status.state, DocState::Dirty);
        assert_eq!(status.rows, 2);
        assert_eq!(status.selected, 1);
        assert!(status.document_path.is_none());
        assert!(status.last_saved_at.is_none());
    }

    #[test]
    fn config_set_is_visible_to_later_reports() {
        let mut fx = Fixture::new();
        fx.api
            .config(ConfigAction::Set("report-author".into(), "Kennel Club".into()))
            .unwrap();
        assert_eq!(fx.api.current_config().report_author, "Kennel Club");

        let reopened = DogShowApi::new(fx.dir.path().join("config")).unwrap();
        assert_eq!(reopened.current_config().report_author, "Kennel Club");
    }
}
