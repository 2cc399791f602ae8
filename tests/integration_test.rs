use std::fs;
use std::path::{Path, PathBuf};

use mockito::{Matcher, Server, ServerGuard};
use resume_batch_submit::error::StagingError;
use resume_batch_submit::{App, AppError, BatchResult, CandidateInfoDraft, Config, JobId, StagingState};

const JOBS: &str = r#"{"jobs": [{"id": 1, "title": "Backend Engineer", "description": "Rust"}]}"#;

fn write_resume(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("resume of {}", name)).unwrap();
    path
}

fn app_for(server: &ServerGuard, dir: &Path) -> App {
    let config = Config {
        report_log_file: dir.join("upload_report.txt").to_string_lossy().to_string(),
        ..Config::default()
    }
    .with_base_url(server.url());
    App::initialize(config).unwrap()
}

async fn mock_job_listing(server: &mut ServerGuard) -> (mockito::Mock, mockito::Mock) {
    let jobs = server
        .mock("GET", "/api/jobs")
        .with_status(200)
        .with_body(JOBS)
        .create_async()
        .await;
    let candidates = server
        .mock("GET", "/api/jobs/1/candidates")
        .with_status(200)
        .with_body(r#"{"candidates": [{"id": 3, "candidate_id": "a1b2c3d4e5", "name": "Alice", "score": 88.5}]}"#)
        .create_async()
        .await;
    (jobs, candidates)
}

#[tokio::test]
async fn test_single_resume_with_manual_info() {
    let mut server = Server::new_async().await;
    let _listing = mock_job_listing(&mut server).await;
    let upload = server
        .mock("POST", "/api/jobs/1/upload-resume")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"filename="resumeA.pdf""#.to_string()),
            Matcher::Regex(r#"name="name"\r\n\r\nAlice"#.to_string()),
        ]))
        .with_status(200)
        .with_body(r#"{"message": "Resume uploaded successfully"}"#)
        .expect(1)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let resume = write_resume(dir.path(), "resumeA.pdf");
    let mut app = app_for(&server, dir.path());

    app.select_job(&JobId::new("1")).await.unwrap();
    assert_eq!(app.stage_files(&[resume]).await.unwrap(), 1);
    assert_eq!(app.staging().state(), StagingState::Staging);
    app.set_draft(CandidateInfoDraft {
        name: Some("Alice".to_string()),
        ..Default::default()
    })
    .unwrap();

    let result = app.submit().await.unwrap().unwrap();

    upload.assert_async().await;
    assert_eq!(
        result,
        BatchResult {
            success_count: 1,
            skipped_count: 0,
            failed_count: 0,
            skipped_file_names: vec![],
        }
    );
    assert_eq!(app.staging().state(), StagingState::Idle);
    assert!(app.staging().draft().is_empty());
    assert_eq!(app.board().candidates().len(), 1);
}

#[tokio::test]
async fn test_duplicate_is_skipped_and_reported() {
    let mut server = Server::new_async().await;
    let _listing = mock_job_listing(&mut server).await;
    let _duplicate = server
        .mock("POST", "/api/jobs/1/upload-resume")
        .match_body(Matcher::Regex(r#"filename="dup.pdf""#.to_string()))
        .with_status(409)
        .with_body(r#"{"error": "This candidate has already been submitted for this job"}"#)
        .create_async()
        .await;
    let _ok = server
        .mock("POST", "/api/jobs/1/upload-resume")
        .match_body(Matcher::Regex(r#"filename="ok.pdf""#.to_string()))
        .with_status(200)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let resumes = vec![
        write_resume(dir.path(), "dup.pdf"),
        write_resume(dir.path(), "ok.pdf"),
    ];
    let mut app = app_for(&server, dir.path());

    app.select_job(&JobId::new("1")).await.unwrap();
    app.stage_files(&resumes).await.unwrap();
    let result = app.submit().await.unwrap().unwrap();

    assert_eq!(result.success_count, 1);
    assert_eq!(result.skipped_count, 1);
    assert_eq!(result.failed_count, 0);
    assert_eq!(result.skipped_file_names, vec!["dup.pdf"]);
    assert_eq!(app.staging().state(), StagingState::Idle);

    let report = fs::read_to_string(dir.path().join("upload_report.txt")).unwrap();
    assert!(report.contains("  Skipped: 1"));
    assert!(report.contains("  - dup.pdf"));
}

#[tokio::test]
async fn test_submit_with_nothing_staged_is_noop() {
    let mut server = Server::new_async().await;
    let _listing = mock_job_listing(&mut server).await;
    let upload = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut app = app_for(&server, dir.path());
    app.select_job(&JobId::new("1")).await.unwrap();

    assert_eq!(app.submit().await.unwrap(), None);
    assert_eq!(app.staging().state(), StagingState::Idle);
    upload.assert_async().await;
}

#[tokio::test]
async fn test_staging_requires_selected_job() {
    let server = Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();
    let resume = write_resume(dir.path(), "a.pdf");
    let mut app = app_for(&server, dir.path());

    let err = app.stage_files(&[resume]).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<AppError>(),
        Some(AppError::Staging(StagingError::NoJobSelected))
    ));
    assert!(app.staging().is_empty());
}

#[tokio::test]
async fn test_folder_upload_sends_no_manual_info() {
    let mut server = Server::new_async().await;
    let _listing = mock_job_listing(&mut server).await;
    let with_info = server
        .mock("POST", "/api/jobs/1/upload-resume")
        .match_body(Matcher::Regex(r#"name="city""#.to_string()))
        .expect(0)
        .create_async()
        .await;
    let upload = server
        .mock("POST", "/api/jobs/1/upload-resume")
        .with_status(200)
        .expect(2)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let folder = dir.path().join("batch");
    fs::create_dir(&folder).unwrap();
    write_resume(&folder, "a.pdf");
    write_resume(&folder, "b.docx");
    write_resume(&folder, "notes.txt");

    let mut app = app_for(&server, dir.path());
    app.select_job(&JobId::new("1")).await.unwrap();
    assert_eq!(app.stage_files(&[folder]).await.unwrap(), 2);
    app.set_draft(CandidateInfoDraft {
        city: Some("Kunming".to_string()),
        ..Default::default()
    })
    .unwrap();

    let result = app.submit().await.unwrap().unwrap();
    with_info.assert_async().await;
    upload.assert_async().await;
    assert_eq!(result.success_count, 2);
    assert_eq!(result.total(), 2);
}

#[tokio::test]
async fn test_switching_job_resets_staging() {
    let mut server = Server::new_async().await;
    let _listing = mock_job_listing(&mut server).await;

    let dir = tempfile::tempdir().unwrap();
    let resume = write_resume(dir.path(), "a.pdf");
    let mut app = app_for(&server, dir.path());

    app.select_job(&JobId::new("1")).await.unwrap();
    app.stage_files(&[resume]).await.unwrap();
    assert_eq!(app.staging().len(), 1);

    app.select_job(&JobId::new("1")).await.unwrap();
    assert!(app.staging().is_empty());
    assert_eq!(app.staging().state(), StagingState::Idle);
}

#[tokio::test]
async fn test_removing_and_cancelling_staged_files() {
    let mut server = Server::new_async().await;
    let _listing = mock_job_listing(&mut server).await;
    let upload = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let resumes = vec![
        write_resume(dir.path(), "a.pdf"),
        write_resume(dir.path(), "b.pdf"),
    ];
    let mut app = app_for(&server, dir.path());
    app.select_job(&JobId::new("1")).await.unwrap();

    app.stage_files(&resumes).await.unwrap();
    let removed = app.remove_staged(0).unwrap();
    assert_eq!(removed.display_name(), "a.pdf");
    assert_eq!(app.staging().state(), StagingState::Staging);
    assert!(app.remove_staged(5).is_err());

    app.cancel_staging().unwrap();
    assert_eq!(app.staging().state(), StagingState::Idle);
    assert!(app.cancel_staging().is_err());

    assert_eq!(app.submit().await.unwrap(), None);
    upload.assert_async().await;
}
