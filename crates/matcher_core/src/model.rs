use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Media type the service accepts for resume uploads.
pub const ACCEPTED_MEDIA_TYPE: &str = "application/pdf";

pub type JobId = u64;

/// Identifier the service assigns to an uploaded resume.
///
/// The service may send it as a JSON number or a string; it is kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CandidateId(String);

impl CandidateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for CandidateId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for CandidateId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Unsigned(u64),
            Signed(i64),
            Text(String),
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Unsigned(id) => Self(id.to_string()),
            Wire::Signed(id) => Self(id.to_string()),
            Wire::Text(id) => Self(id),
        })
    }
}

/// A resume document picked by the user.
#[derive(Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    pub fn is_accepted(&self) -> bool {
        is_accepted_media_type(&self.media_type)
    }
}

// Keep resume bytes out of debug output and logs.
impl fmt::Debug for ResumeFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResumeFile")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("byte_len", &self.bytes.len())
            .finish()
    }
}

/// Returns true when `media_type` names a PDF document, ignoring case and
/// any parameters.
pub fn is_accepted_media_type(media_type: &str) -> bool {
    let essence = media_type.split(';').next().unwrap_or(media_type).trim();
    essence.eq_ignore_ascii_case(ACCEPTED_MEDIA_TYPE)
}

/// Skills extracted from a candidate's resume by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub skills: Vec<String>,
    pub resume_text_preview: String,
    #[serde(default)]
    pub candidate_id: Option<CandidateId>,
}

/// One scored pairing of a candidate and a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub job_id: JobId,
    pub job_title: String,
    pub score: f64,
    #[serde(default)]
    pub matched_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    #[serde(default)]
    pub description: String,
}
