use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::score::Score;
use crate::upload::{FileDescriptor, FileUpload};
use crate::workflow::Workflow;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub file: Option<FileDescriptor>,
    pub job_description: String,
}

/// CV vs job description comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub match_score: Score,
    pub common_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CvAnalyzer {
    pub upload: FileUpload,
    pub job_description: String,
    pub analysis: Workflow<AnalysisResult>,
}

impl CvAnalyzer {
    pub fn upload_mut(&mut self) -> Result<&mut FileUpload, AppError> {
        self.analysis.ensure_editable()?;
        Ok(&mut self.upload)
    }

    pub fn set_job_description(&mut self, text: String) -> Result<(), AppError> {
        self.analysis.ensure_editable()?;
        self.job_description = text;
        Ok(())
    }

    /// Needs a CV or a job description, either one is enough.
    pub fn begin_analysis(&mut self) -> Result<AnalysisRequest, AppError> {
        self.analysis.ensure_editable()?;
        if !self.upload.has_file() && self.job_description.is_empty() {
            return Err(AppError::Validation(
                "Upload a CV or paste a job description first".to_string(),
            ));
        }
        self.analysis.begin()?;
        Ok(AnalysisRequest {
            file: self.upload.selected.clone(),
            job_description: self.job_description.clone(),
        })
    }

    pub fn complete(&mut self, outcome: Result<AnalysisResult, AppError>) -> bool {
        self.analysis.resolve(outcome)
    }

    /// Starts over: result, CV and description are all discarded.
    pub fn reset(&mut self) {
        self.analysis.reset();
        self.upload.clear();
        self.job_description.clear();
    }
}
