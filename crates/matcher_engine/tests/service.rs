use std::time::Duration;

use matcher_core::{CandidateId, MatchesView, ResumeFile, Stage};
use matcher_engine::{
    load_jobs, load_matches_view, FailureKind, MatchService, ReqwestMatchService,
    ServiceSettings, WorkflowDriver,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(server: &MockServer) -> ReqwestMatchService {
    let settings = ServiceSettings::parse(&server.uri()).expect("mock server uri");
    ReqwestMatchService::new(settings).expect("client")
}

fn resume() -> ResumeFile {
    ResumeFile::new("jane_doe.pdf", "application/pdf", b"%PDF-1.4 Jane Doe".to_vec())
}

#[tokio::test]
async fn upload_posts_multipart_file_and_reads_candidate_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload_resume"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"jane_doe.pdf\""))
        .and(body_string_contains("%PDF-1.4 Jane Doe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidate_id": 42 })))
        .expect(1)
        .mount(&server)
        .await;

    let id = service_for(&server).upload_resume(&resume()).await.unwrap();
    assert_eq!(id, CandidateId::from(42));
}

#[tokio::test]
async fn upload_sends_plain_pdf_type_for_decorated_media_types() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload_resume"))
        .and(body_string_contains("Content-Type: application/pdf\r\n"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidate_id": 7 })))
        .expect(3)
        .mount(&server)
        .await;

    let service = service_for(&server);
    for media_type in [" application/pdf ", "application/pdf; charset=binary", "APPLICATION/PDF"] {
        let file = ResumeFile::new("cv.pdf", media_type, b"%PDF-1.4".to_vec());
        assert!(file.is_accepted());
        let id = service.upload_resume(&file).await.unwrap();
        assert_eq!(id, CandidateId::from(7));
    }
}

#[tokio::test]
async fn upload_without_candidate_id_is_a_protocol_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload_resume"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "filename": "x.pdf" })))
        .mount(&server)
        .await;

    let err = service_for(&server)
        .upload_resume(&resume())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Protocol);
}

#[tokio::test]
async fn non_success_status_is_reported_with_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze_resume/9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = service_for(&server)
        .analyze_resume(&CandidateId::from(9))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
}

#[tokio::test]
async fn analyze_parses_skills_and_preview() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze_resume/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidate_id": 42,
            "skills": ["Python", "SQL"],
            "resume_text_preview": "Jane Doe, data engineer..."
        })))
        .mount(&server)
        .await;

    let analysis = service_for(&server)
        .analyze_resume(&CandidateId::from(42))
        .await
        .unwrap();
    assert_eq!(analysis.skills, vec!["Python", "SQL"]);
    assert_eq!(analysis.resume_text_preview, "Jane Doe, data engineer...");
}

#[tokio::test]
async fn malformed_analysis_is_a_protocol_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze_resume/42"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = service_for(&server)
        .analyze_resume(&CandidateId::from(42))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Protocol);
}

#[tokio::test]
async fn generate_matches_ignores_response_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/candidates/42/generate-matches"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&server)
        .await;

    service_for(&server)
        .generate_matches(&CandidateId::from(42))
        .await
        .unwrap();
}

#[tokio::test]
async fn slow_service_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!([])),
        )
        .mount(&server)
        .await;

    let settings = ServiceSettings {
        request_timeout: Duration::from_millis(50),
        ..ServiceSettings::parse(&server.uri()).unwrap()
    };
    let service = ReqwestMatchService::new(settings).unwrap();
    let err = service.list_jobs().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn ping_checks_reported_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&server)
        .await;
    service_for(&server).ping().await.unwrap();

    let degraded = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "degraded" })))
        .mount(&degraded)
        .await;
    let err = service_for(&degraded).ping().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Protocol);
}

#[tokio::test]
async fn job_listing_loads_in_service_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 2, "title": "Data Engineer", "description": "Pipelines" },
            { "id": 1, "title": "Rust Developer", "description": "Services" }
        ])))
        .mount(&server)
        .await;

    let listing = load_jobs(&service_for(&server)).await;
    assert!(!listing.is_degraded());
    let ids: Vec<_> = listing.jobs.iter().map(|job| job.id).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[tokio::test]
async fn job_listing_failure_degrades_to_empty_with_warning() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let listing = load_jobs(&service_for(&server)).await;
    assert!(listing.jobs.is_empty());
    assert!(listing.is_degraded());
    assert!(listing.warning.unwrap().contains("500"));
}

#[tokio::test]
async fn unreachable_service_degrades_job_listing() {
    // Nothing listens on the discard port of the loopback address.
    let settings = ServiceSettings::parse("http://127.0.0.1:9").unwrap();
    let service = ReqwestMatchService::new(settings).unwrap();

    let listing = load_jobs(&service).await;
    assert!(listing.jobs.is_empty());
    assert!(listing.is_degraded());
}

#[tokio::test]
async fn matches_view_distinguishes_empty_from_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/candidates/1/matches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/candidates/2/matches"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/candidates/3/matches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "job_id": 7, "job_title": "ML Engineer", "score": 55,
              "matched_skills": ["Python"], "missing_skills": ["PyTorch"] },
            { "job_id": 4, "job_title": "Data Analyst", "score": 80.5,
              "matched_skills": ["SQL", "Python"], "missing_skills": [] }
        ])))
        .mount(&server)
        .await;

    let service = service_for(&server);
    assert_eq!(
        load_matches_view(&service, &CandidateId::from(1)).await,
        MatchesView::NoMatches
    );
    assert!(load_matches_view(&service, &CandidateId::from(2))
        .await
        .is_error());
    match load_matches_view(&service, &CandidateId::from(3)).await {
        MatchesView::MatchesFound(found) => {
            let ids: Vec<_> = found.iter().map(|m| m.job_id).collect();
            assert_eq!(ids, vec![7, 4]);
            assert_eq!(found[0].missing_skills, vec!["PyTorch"]);
        }
        other => panic!("expected matches, got {other:?}"),
    }
}

#[tokio::test]
async fn workflow_runs_end_to_end_against_http_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload_resume"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidate_id": 42 })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/analyze_resume/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidate_id": 42,
            "skills": ["Python"],
            "resume_text_preview": "..."
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/candidates/42/generate-matches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let mut driver = WorkflowDriver::new(std::sync::Arc::new(service_for(&server)));
    driver.select_file(resume()).unwrap();
    driver.submit().await.unwrap();

    let state = driver.state();
    assert_eq!(state.stage(), Stage::Complete);
    assert_eq!(
        state.analysis().map(|a| a.skills.clone()),
        Some(vec!["Python".to_string()])
    );
}

#[tokio::test]
async fn workflow_stops_after_failed_upload_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload_resume"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/analyze_resume/42"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut driver = WorkflowDriver::new(std::sync::Arc::new(service_for(&server)));
    driver.select_file(resume()).unwrap();
    let err = driver.submit().await.unwrap_err();

    assert_eq!(err.to_string(), "Resume upload failed.");
    assert_eq!(driver.state().stage(), Stage::Failed);
}
