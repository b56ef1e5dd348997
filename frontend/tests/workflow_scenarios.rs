//! End-to-end workflow runs against a scripted backend.

use std::time::Duration;

use mrl_frontend::{
    ImportBackend, ImportResponse, MockBackend, NotificationLevel, Phase, RecordingObserver,
    SelectedFile, ServiceError, SubmitResponse, WorkflowController, WorkflowError, WorkflowEvent,
    IMPORT_PATH,
};
use serde_json::json;

const RECORDS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<MRLData><Record><MaterialId>MAT-001</MaterialId><Plant>P100</Plant></Record><Record><MaterialId/></Record></MRLData>"#;

fn controller(backend: MockBackend) -> WorkflowController<MockBackend, RecordingObserver> {
    WorkflowController::new(backend, RecordingObserver::new())
}

fn records_file() -> SelectedFile {
    SelectedFile::new("records.xml", RECORDS_XML)
}

#[tokio::test]
async fn test_import_confirm_submit_dismiss() {
    let backend = MockBackend::new()
        .with_import(Ok(ImportResponse {
            valid: false,
            total_records: Some(4),
            valid_records_count: 3,
            invalid_records_count: 1,
            errors: vec!["row 2: missing id".into()],
            valid_records: vec![json!({"materialId": "MAT-001", "plant": "P100"})],
        }))
        .with_submit(Ok(SubmitResponse {
            success: true,
            message: Some("Successfully appended 3 record(s) to the Excel file.".into()),
            appended_rows: Some(3),
        }));
    let mut c = controller(backend);

    c.on_file_selected(records_file()).await.unwrap();
    assert_eq!(c.phase(), Phase::PreviewReady);

    let preview = c.observer().last_preview().cloned().unwrap();
    assert_eq!(preview.valid_records_count, 3);
    assert_eq!(preview.invalid_records_count, 1);
    assert_eq!(preview.errors, vec!["row 2: missing id".to_string()]);
    assert!(preview.confirm_enabled);
    assert!(preview.pretty_xml.contains("<MaterialId>MAT-001</MaterialId>"));
    assert_eq!(c.backend().last_upload().unwrap().name, "records.xml");

    assert!(c.confirm_preview());
    assert_eq!(c.backend().submit_calls(), 0);

    let ack = c.submit_data().await.unwrap();
    assert_eq!(ack, "Successfully appended 3 record(s) to the Excel file.");
    assert_eq!(c.phase(), Phase::Submitted);
    assert_eq!(c.acknowledgement(), Some(ack.as_str()));
    assert!(c.observer().saw(&WorkflowEvent::Submitted(ack.clone())));

    assert!(c.dismiss_acknowledgement());
    assert_eq!(c.phase(), Phase::Idle);
    assert!(c.session().is_none());

    assert_eq!(c.backend().import_calls(), 1);
    assert_eq!(c.backend().submit_calls(), 1);
}

#[tokio::test]
async fn test_submit_refused_keeps_preview_for_retry() {
    let backend = MockBackend::new().with_submit(Ok(SubmitResponse {
        success: false,
        message: Some("locked".into()),
        appended_rows: None,
    }));
    let mut c = controller(backend);

    c.on_file_selected(records_file()).await.unwrap();
    c.confirm_preview();

    let err = c.submit_data().await.unwrap_err();
    assert_eq!(err, WorkflowError::SubmitRejected("locked".into()));
    assert_eq!(c.phase(), Phase::PreviewReady);
    assert!(c.affordances().submit);
    assert!(c.session().is_some());

    let last = c.observer().last_notification().unwrap();
    assert_eq!(last.level, NotificationLevel::Error);
    assert!(last.message.contains("locked"));

    // Lock released on the server
    c.backend().set_submit(Ok(SubmitResponse {
        success: true,
        message: None,
        appended_rows: None,
    }));
    let ack = c.submit_data().await.unwrap();
    assert_eq!(ack, "Submitted successfully");
    assert_eq!(c.backend().submit_calls(), 2);
}

#[tokio::test]
async fn test_import_rejected_by_server_returns_to_idle() {
    let backend = MockBackend::new().with_import(Err(ServiceError::Status {
        status: 400,
        message: Some("Malformed XML at line 3".into()),
    }));
    let mut c = controller(backend);

    let err = c
        .on_file_selected(SelectedFile::new("records.xml", "<MRLData>"))
        .await
        .unwrap_err();

    assert!(matches!(err, WorkflowError::ImportRequestFailed(ref m) if m.contains("Malformed XML at line 3")));
    assert_eq!(c.phase(), Phase::Idle);
    assert!(c.observer().saw(&WorkflowEvent::FileSelectionCleared));
}

#[tokio::test]
async fn test_backend_down_reports_connection_hint() {
    let mut c = controller(MockBackend::unreachable());

    let err = c.on_file_selected(records_file()).await.unwrap_err();

    match &err {
        WorkflowError::BackendUnreachable { url, .. } => {
            assert_eq!(url, &c.backend().endpoint_url(IMPORT_PATH));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(err.to_string().contains("Please make sure the backend server is running"));
    assert_eq!(c.phase(), Phase::Idle);
    assert!(c.affordances().import);
    assert!(c.observer().saw(&WorkflowEvent::FileSelectionCleared));
}

#[tokio::test]
async fn test_wrong_extension_never_reaches_server() {
    let mut c = controller(MockBackend::new());

    let err = c
        .on_file_selected(SelectedFile::new("records.XML", RECORDS_XML))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        WorkflowError::InvalidFileType {
            file_name: "records.XML".into()
        }
    );
    assert_eq!(c.backend().calls(), 0);
    assert_eq!(c.phase(), Phase::Idle);
}

#[tokio::test]
async fn test_timed_out_import_can_be_retried() {
    let mut c = controller(MockBackend::silent());

    let timed_out =
        tokio::time::timeout(Duration::from_millis(20), c.on_file_selected(records_file())).await;
    assert!(timed_out.is_err());
    assert_eq!(c.phase(), Phase::Idle);
    assert!(c.affordances().import);

    c.backend().set_silent(false);
    c.on_file_selected(records_file()).await.unwrap();
    assert_eq!(c.phase(), Phase::PreviewReady);
    assert_eq!(c.backend().import_calls(), 2);
}
