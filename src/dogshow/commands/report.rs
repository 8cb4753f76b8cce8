use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::report::{self, ReportEngine, ReportParams};
use crate::store::RecordStore;
use log::info;
use std::path::Path;

pub fn run(
    store: &RecordStore,
    engine: &dyn ReportEngine,
    params: &ReportParams,
    path: &Path,
) -> Result<CmdResult> {
    report::generate(engine, store.all(), params, path)?;
    info!("Report generated at {}", path.display());

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Report created: {}",
            path.display()
        )))
        .with_written_path(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DogShowError;
    use crate::model::DogEntry;
    use crate::report::TemplateReport;
    use crate::store::fixtures::store_with;

    struct FailingEngine;

    impl ReportEngine for FailingEngine {
        fn render(&self, _: &[DogEntry], _: &ReportParams) -> Result<String> {
            Err(DogShowError::ReportGeneration("fill failed".into()))
        }
    }

    fn params() -> ReportParams {
        ReportParams {
            title: "T".into(),
            author: "A".into(),
        }
    }

    #[test]
    fn writes_report_for_current_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.html");
        let store = store_with(&["Rex", "Fido"]);

        let result = run(&store, &TemplateReport::builtin(), &params(), &path).unwrap();
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("Rex") && html.contains("Fido"));
        assert!(result.messages[0].content.starts_with("Report created"));
    }

    #[test]
    fn engine_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.html");
        let err = run(&store_with(&["Rex"]), &FailingEngine, &params(), &path).unwrap_err();
        assert!(matches!(err, DogShowError::ReportGeneration(_)));
        assert!(!path.exists());
    }
}
