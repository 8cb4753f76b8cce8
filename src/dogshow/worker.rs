//! Background worker for load, save and report.
//!
//! One long-lived thread takes jobs from a channel and runs them in order.
//! Every job holds the store lock for its whole run, and the controller's
//! own mutations take the same lock, so at most one operation touches the
//! store at a time. Results come back as [`Completion`]s on a second channel
//! and are applied by whoever owns the [`TaskWorker`], on that owner's thread.
//!
//! Jobs cannot be cancelled once queued.

use crate::commands::{self, CmdResult};
use crate::error::{DogShowError, Result};
use crate::report::{ReportEngine, ReportParams};
use crate::store::{lock, SharedStore};
use log::{debug, error};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

pub enum Task {
    Load(PathBuf),
    Save(PathBuf),
    Report {
        path: PathBuf,
        params: ReportParams,
        engine: Box<dyn ReportEngine>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Load,
    Save,
    Report,
}

impl Task {
    pub fn kind(&self) -> TaskKind {
        match self {
            Task::Load(_) => TaskKind::Load,
            Task::Save(_) => TaskKind::Save,
            Task::Report { .. } => TaskKind::Report,
        }
    }

    pub fn path(&self) -> &PathBuf {
        match self {
            Task::Load(path) | Task::Save(path) => path,
            Task::Report { path, .. } => path,
        }
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TaskKind::Load => "load",
            TaskKind::Save => "save",
            TaskKind::Report => "report",
        };
        f.write_str(name)
    }
}

/// The result of one job.
#[derive(Debug)]
pub struct Completion {
    pub ticket: u64,
    pub kind: TaskKind,
    pub path: PathBuf,
    /// Store revision when the job released the lock.
    pub revision: u64,
    pub outcome: Result<CmdResult>,
}

struct Job {
    ticket: u64,
    task: Task,
}

pub struct TaskWorker {
    jobs: Option<Sender<Job>>,
    completions: Receiver<Completion>,
    handle: Option<JoinHandle<()>>,
    next_ticket: u64,
    in_flight: usize,
}

impl TaskWorker {
    pub fn spawn(store: SharedStore) -> Result<Self> {
        let (job_tx, job_rx) = mpsc::channel::<Job>();
        let (done_tx, done_rx) = mpsc::channel::<Completion>();

        let handle = thread::Builder::new()
            .name("dogshow-worker".to_string())
            .spawn(move || run_jobs(store, job_rx, done_tx))?;

        Ok(Self {
            jobs: Some(job_tx),
            completions: done_rx,
            handle: Some(handle),
            next_ticket: 1,
            in_flight: 0,
        })
    }

    /// Queues a task and returns its ticket.
    pub fn dispatch(&mut self, task: Task) -> Result<u64> {
        let ticket = self.next_ticket;
        let kind = task.kind();
        let sender = self
            .jobs
            .as_ref()
            .ok_or_else(|| DogShowError::Worker("worker has shut down".to_string()))?;
        sender
            .send(Job { ticket, task })
            .map_err(|_| DogShowError::Worker("worker thread is gone".to_string()))?;

        debug!("Dispatched {} task #{}", kind, ticket);
        self.next_ticket += 1;
        self.in_flight += 1;
        Ok(ticket)
    }

    /// Returns a finished job without blocking, if there is one.
    pub fn try_next(&mut self) -> Result<Option<Completion>> {
        match self.completions.try_recv() {
            Ok(completion) => {
                self.in_flight -= 1;
                Ok(Some(completion))
            }
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => {
                Err(DogShowError::Worker("worker thread is gone".to_string()))
            }
        }
    }

    /// Blocks until the next job finishes.
    pub fn wait_next(&mut self) -> Result<Completion> {
        if self.in_flight == 0 {
            return Err(DogShowError::Worker("no task in flight".to_string()));
        }
        let completion = self
            .completions
            .recv()
            .map_err(|_| DogShowError::Worker("worker thread is gone".to_string()))?;
        self.in_flight -= 1;
        Ok(completion)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

impl Drop for TaskWorker {
    fn drop(&mut self) {
        // Closing the job channel ends the loop once queued jobs are done.
        self.jobs.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("Worker thread panicked");
            }
        }
    }
}

fn run_jobs(store: SharedStore, jobs: Receiver<Job>, done: Sender<Completion>) {
    while let Ok(Job { ticket, task }) = jobs.recv() {
        let kind = task.kind();
        let path = task.path().clone();

        let mut guard = lock(&store);
        let outcome = match task {
            Task::Load(path) => commands::load::run(&mut guard, &path),
            Task::Save(path) => commands::save::run(&guard, &path),
            Task::Report {
                path,
                params,
                engine,
            } => commands::report::run(&guard, engine.as_ref(), &params, &path),
        };
        let revision = guard.revision();
        drop(guard);

        if let Err(e) = &outcome {
            error!("{} task #{} failed: {}", kind, ticket, e);
        }

        let completion = Completion {
            ticket,
            kind,
            path,
            revision,
            outcome,
        };
        if done.send(completion).is_err() {
            break;
        }
    }
    debug!("Worker loop finished");
}
