use super::*;
use crate::kernel::WorkspaceState;
use crate::models::NodeId;
use std::collections::VecDeque;

struct ScriptedBackend {
    submitted: Vec<SubmissionRequest>,
    replies: VecDeque<SubmissionResult>,
}

impl ExecutionBackend for ScriptedBackend {
    fn languages(&mut self) -> Result<Vec<ExecutionLanguage>, ExecutionError> {
        Ok(vec![ExecutionLanguage::new(71, "Python (3.10.4)")])
    }

    fn submit(&mut self, request: &SubmissionRequest) -> Result<SubmissionToken, ExecutionError> {
        self.submitted.push(request.clone());
        Ok(SubmissionToken("tok-1".into()))
    }

    fn poll(&mut self, _token: &SubmissionToken) -> Result<SubmissionResult, ExecutionError> {
        self.replies
            .pop_front()
            .ok_or_else(|| ExecutionError::Backend("exhausted".into()))
    }
}

fn status(id: u32, description: &str) -> SubmissionStatus {
    SubmissionStatus {
        id,
        description: description.into(),
    }
}

#[test]
fn request_uses_active_tab_and_input() {
    let mut store = Store::new(WorkspaceState::default());
    store.set_execution_language(54);
    store.set_input("3 4\n");

    let request = SubmissionRequest::from_store(&store).unwrap();
    assert_eq!(request.language_id, 54);
    assert_eq!(request.stdin, "3 4\n");
    assert!(request.source_code.contains("Hello, World!"));
}

#[test]
fn request_prefers_tab_language() {
    let mut store = Store::new(WorkspaceState::default());
    store.set_execution_language(54);
    store
        .set_language(&NodeId::from("file1"), crate::kernel::LanguageTag::C, Some(50))
        .unwrap();

    assert_eq!(SubmissionRequest::from_store(&store).unwrap().language_id, 50);
}

#[test]
fn request_rejects_blank_source_and_missing_language() {
    let mut store = Store::new(WorkspaceState::default());
    assert_eq!(
        SubmissionRequest::from_store(&store),
        Err(ExecutionError::NoLanguage)
    );

    store.set_execution_language(54);
    store.update_content(&NodeId::from("file1"), "  \n").unwrap();
    assert_eq!(
        SubmissionRequest::from_store(&store),
        Err(ExecutionError::EmptySource)
    );
}

#[test]
fn summary_skips_empty_sections() {
    let result = SubmissionResult {
        status: status(3, "Accepted"),
        stdout: Some("7\n".into()),
        stderr: Some(String::new()),
        time: Some("0.002".into()),
        memory: Some(3200),
        ..Default::default()
    };

    assert_eq!(
        result.summary(),
        "Status: Accepted\n\nStandard output:\n7\n\n\nExecution time: 0.002 seconds\nMemory used: 3200 KB\n"
    );
    assert_eq!(result.status_line(), "Execution completed successfully");
}

#[test]
fn summary_reports_compile_errors() {
    let result = SubmissionResult {
        status: status(6, "Compilation Error"),
        compile_output: Some("main.cpp:1: error".into()),
        ..Default::default()
    };

    let summary = result.summary();
    assert!(summary.starts_with("Status: Compilation Error\n\nCompilation output:\nmain.cpp:1: error"));
    assert_eq!(
        result.status_line(),
        "Execution completed with status: Compilation Error"
    );
}

#[test]
fn result_deserializes_runner_payload() {
    let result: SubmissionResult = serde_json::from_str(
        r#"{"status":{"id":2,"description":"Processing"},"stdout":null,"time":null}"#,
    )
    .unwrap();
    assert!(result.status.is_pending());
    assert_eq!(result.summary(), "Status: Processing\n\n");
}

#[test]
fn backend_round_trip_until_finished() {
    let mut backend = ScriptedBackend {
        submitted: Vec::new(),
        replies: VecDeque::from(vec![
            SubmissionResult {
                status: status(1, "In Queue"),
                ..Default::default()
            },
            SubmissionResult {
                status: status(3, "Accepted"),
                stdout: Some("ok".into()),
                ..Default::default()
            },
        ]),
    };

    let mut store = Store::new(WorkspaceState::default());
    let languages = backend.languages().unwrap();
    store.set_execution_languages(languages, None);

    let request = SubmissionRequest::from_store(&store).unwrap();
    assert_eq!(request.language_id, 71);
    let token = backend.submit(&request).unwrap();

    let mut result = backend.poll(&token).unwrap();
    while result.status.is_pending() {
        result = backend.poll(&token).unwrap();
    }
    assert!(result.status.is_accepted());
    assert_eq!(backend.submitted.len(), 1);
}
