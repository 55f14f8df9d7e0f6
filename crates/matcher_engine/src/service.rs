use matcher_core::{AnalysisResult, CandidateId, Job, Match, ResumeFile, ACCEPTED_MEDIA_TYPE};
use matcher_logging::{matcher_debug, matcher_info};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::{FailureKind, ServiceError, ServiceSettings};

/// The remote capabilities the client consumes.
#[async_trait::async_trait]
pub trait MatchService: Send + Sync {
    async fn list_jobs(&self) -> Result<Vec<Job>, ServiceError>;

    /// Uploads the resume and returns the identifier the service assigned.
    async fn upload_resume(&self, file: &ResumeFile) -> Result<CandidateId, ServiceError>;

    async fn analyze_resume(
        &self,
        candidate_id: &CandidateId,
    ) -> Result<AnalysisResult, ServiceError>;

    /// Asks the service to compute and store matches. The response body is ignored.
    async fn generate_matches(&self, candidate_id: &CandidateId) -> Result<(), ServiceError>;

    async fn fetch_matches(&self, candidate_id: &CandidateId) -> Result<Vec<Match>, ServiceError>;

    async fn ping(&self) -> Result<(), ServiceError>;
}

#[derive(Deserialize)]
struct UploadResponse {
    #[serde(default)]
    candidate_id: Option<CandidateId>,
}

#[derive(Deserialize)]
struct PingResponse {
    status: String,
}

#[derive(Debug, Clone)]
pub struct ReqwestMatchService {
    settings: ServiceSettings,
    client: reqwest::Client,
}

impl ReqwestMatchService {
    pub fn new(settings: ServiceSettings) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ServiceError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ServiceError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        matcher_debug!("{} -> {}", response.url(), status);
        if !status.is_success() {
            return Err(ServiceError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        Ok(response)
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ServiceError> {
    let body = response.bytes().await.map_err(map_reqwest_error)?;
    serde_json::from_slice(&body)
        .map_err(|err| ServiceError::new(FailureKind::Protocol, err.to_string()))
}

#[async_trait::async_trait]
impl MatchService for ReqwestMatchService {
    async fn list_jobs(&self) -> Result<Vec<Job>, ServiceError> {
        let url = self.settings.endpoint(&["jobs"])?;
        let response = self.send(self.client.get(url)).await?;
        read_json(response).await
    }

    async fn upload_resume(&self, file: &ResumeFile) -> Result<CandidateId, ServiceError> {
        let url = self.settings.endpoint(&["upload_resume"])?;
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(ACCEPTED_MEDIA_TYPE)
            .map_err(|err| ServiceError::new(FailureKind::Protocol, err.to_string()))?;
        let form = Form::new().part("file", part);

        matcher_info!("Uploading {} ({} bytes) to {}", file.name, file.bytes.len(), url);
        let response = self.send(self.client.post(url).multipart(form)).await?;
        let body: UploadResponse = read_json(response).await?;
        body.candidate_id.ok_or_else(|| {
            ServiceError::new(FailureKind::Protocol, "upload response has no candidate_id")
        })
    }

    async fn analyze_resume(
        &self,
        candidate_id: &CandidateId,
    ) -> Result<AnalysisResult, ServiceError> {
        let url = self
            .settings
            .endpoint(&["analyze_resume", candidate_id.as_str()])?;
        let response = self.send(self.client.post(url)).await?;
        read_json(response).await
    }

    async fn generate_matches(&self, candidate_id: &CandidateId) -> Result<(), ServiceError> {
        let url = self
            .settings
            .endpoint(&["candidates", candidate_id.as_str(), "generate-matches"])?;
        self.send(self.client.post(url)).await?;
        Ok(())
    }

    async fn fetch_matches(&self, candidate_id: &CandidateId) -> Result<Vec<Match>, ServiceError> {
        let url = self
            .settings
            .endpoint(&["candidates", candidate_id.as_str(), "matches"])?;
        let response = self.send(self.client.get(url)).await?;
        read_json(response).await
    }

    async fn ping(&self) -> Result<(), ServiceError> {
        let url = self.settings.endpoint(&["ping"])?;
        let response = self.send(self.client.get(url)).await?;
        let body: PingResponse = read_json(response).await?;
        if body.status == "ok" {
            Ok(())
        } else {
            Err(ServiceError::new(
                FailureKind::Protocol,
                format!("service reported status {:?}", body.status),
            ))
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        return ServiceError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ServiceError::new(FailureKind::Protocol, err.to_string());
    }
    ServiceError::new(FailureKind::Network, err.to_string())
}
