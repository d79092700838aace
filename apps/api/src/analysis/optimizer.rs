use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::upload::{FileDescriptor, FileUpload};
use crate::workflow::Workflow;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationRequest {
    pub file: FileDescriptor,
    pub target_role: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadFormat {
    Pdf,
    Latex,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub target_role: String,
    pub applied_improvements: Vec<String>,
    pub download_formats: Vec<DownloadFormat>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AtsOptimizer {
    pub upload: FileUpload,
    pub target_role: String,
    pub optimization: Workflow<OptimizationResult>,
}

impl AtsOptimizer {
    pub fn upload_mut(&mut self) -> Result<&mut FileUpload, AppError> {
        self.optimization.ensure_editable()?;
        Ok(&mut self.upload)
    }

    pub fn set_target_role(&mut self, role: String) -> Result<(), AppError> {
        self.optimization.ensure_editable()?;
        self.target_role = role;
        Ok(())
    }

    /// Needs both a CV and a target role.
    pub fn begin_optimization(&mut self) -> Result<OptimizationRequest, AppError> {
        self.optimization.ensure_editable()?;
        let file = self
            .upload
            .selected
            .clone()
            .ok_or_else(|| AppError::Validation("Upload a CV first".to_string()))?;
        if self.target_role.is_empty() {
            return Err(AppError::Validation("Target role is required".to_string()));
        }
        self.optimization.begin()?;
        Ok(OptimizationRequest {
            file,
            target_role: self.target_role.clone(),
        })
    }

    pub fn complete(&mut self, outcome: Result<OptimizationResult, AppError>) -> bool {
        self.optimization.resolve(outcome)
    }

    /// Drops the result but keeps the CV and role for another run.
    pub fn reset(&mut self) {
        self.optimization.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::UploadPolicy;

    fn with_cv() -> AtsOptimizer {
        let mut page = AtsOptimizer::default();
        page.upload_mut()
            .unwrap()
            .select(
                &UploadPolicy::default(),
                FileDescriptor {
                    name: "cv.docx".to_string(),
                    size_bytes: 4096,
                    mime_type: String::new(),
                },
            )
            .unwrap();
        page
    }

    #[test]
    fn test_file_alone_is_not_enough() {
        let mut page = with_cv();
        assert!(matches!(
            page.begin_optimization(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_role_alone_is_not_enough() {
        let mut page = AtsOptimizer::default();
        page.set_target_role("Data Analyst".to_string()).unwrap();
        assert!(page.begin_optimization().is_err());
    }

    #[test]
    fn test_begin_carries_role_and_file() {
        let mut page = with_cv();
        page.set_target_role("Ingénieur DevOps".to_string()).unwrap();
        let request = page.begin_optimization().unwrap();
        assert_eq!(request.target_role, "Ingénieur DevOps");
        assert_eq!(request.file.name, "cv.docx");
    }

    #[test]
    fn test_reset_keeps_inputs() {
        let mut page = with_cv();
        page.set_target_role("Data Analyst".to_string()).unwrap();
        page.begin_optimization().unwrap();
        page.complete(Ok(OptimizationResult {
            target_role: "Data Analyst".to_string(),
            applied_improvements: vec![],
            download_formats: vec![DownloadFormat::Pdf],
        }));
        page.reset();
        assert!(page.optimization.result().is_none());
        assert!(page.upload.has_file());
        assert_eq!(page.target_role, "Data Analyst");
    }
}
