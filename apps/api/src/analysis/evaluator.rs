use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::score::Score;
use crate::upload::{FileDescriptor, FileUpload};
use crate::workflow::Workflow;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub file: FileDescriptor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationCategory {
    pub name: String,
    pub score: Score,
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub overall_score: Score,
    pub categories: Vec<EvaluationCategory>,
    pub summary: String,
}

impl EvaluationResult {
    /// Overall score is the rounded mean of the category scores.
    pub fn from_categories(categories: Vec<EvaluationCategory>, summary: String) -> Self {
        let overall_score =
            Score::mean(categories.iter().map(|c| c.score)).unwrap_or(Score::new(0));
        Self {
            overall_score,
            categories,
            summary,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AtsEvaluator {
    pub upload: FileUpload,
    pub evaluation: Workflow<EvaluationResult>,
    /// Category whose feedback is unfolded, at most one.
    pub expanded_category: Option<String>,
}

impl AtsEvaluator {
    pub fn upload_mut(&mut self) -> Result<&mut FileUpload, AppError> {
        self.evaluation.ensure_editable()?;
        Ok(&mut self.upload)
    }

    pub fn begin_evaluation(&mut self) -> Result<EvaluationRequest, AppError> {
        self.evaluation.ensure_editable()?;
        let file = self
            .upload
            .selected
            .clone()
            .ok_or_else(|| AppError::Validation("Upload a CV first".to_string()))?;
        self.evaluation.begin()?;
        self.expanded_category = None;
        Ok(EvaluationRequest { file })
    }

    pub fn complete(&mut self, outcome: Result<EvaluationResult, AppError>) -> bool {
        self.evaluation.resolve(outcome)
    }

    /// Expands `name`, or collapses it when it is already expanded.
    pub fn toggle_category(&mut self, name: &str) -> Result<Option<&str>, AppError> {
        let result = self
            .evaluation
            .result()
            .ok_or_else(|| AppError::Validation("No evaluation to inspect".to_string()))?;
        if !result.categories.iter().any(|c| c.name == name) {
            return Err(AppError::NotFound(format!("Category '{name}' not found")));
        }

        if self.expanded_category.as_deref() == Some(name) {
            self.expanded_category = None;
        } else {
            self.expanded_category = Some(name.to_string());
        }
        Ok(self.expanded_category.as_deref())
    }

    pub fn reset(&mut self) {
        self.evaluation.reset();
        self.upload.clear();
        self.expanded_category = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures;
    use crate::upload::UploadPolicy;

    fn evaluated() -> AtsEvaluator {
        let mut page = AtsEvaluator::default();
        page.upload_mut()
            .unwrap()
            .select(
                &UploadPolicy::default(),
                FileDescriptor {
                    name: "cv.pdf".to_string(),
                    size_bytes: 1024,
                    mime_type: "application/pdf".to_string(),
                },
            )
            .unwrap();
        page.begin_evaluation().unwrap();
        page.complete(Ok(EvaluationResult::from_categories(
            fixtures::evaluation_categories(),
            fixtures::EVALUATION_SUMMARY.to_string(),
        )));
        page
    }

    #[test]
    fn test_requires_file() {
        let mut page = AtsEvaluator::default();
        assert!(matches!(
            page.begin_evaluation(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_overall_is_rounded_category_mean() {
        let page = evaluated();
        let result = page.evaluation.result().unwrap();
        assert_eq!(result.categories.len(), 14);
        assert_eq!(result.overall_score.value(), 80);
    }

    #[test]
    fn test_empty_categories_score_zero() {
        let result = EvaluationResult::from_categories(vec![], String::new());
        assert_eq!(result.overall_score.value(), 0);
    }

    #[test]
    fn test_toggle_expands_then_collapses() {
        let mut page = evaluated();
        assert_eq!(page.toggle_category("Projets").unwrap(), Some("Projets"));
        assert_eq!(
            page.toggle_category("Formation").unwrap(),
            Some("Formation")
        );
        assert_eq!(page.toggle_category("Formation").unwrap(), None);
    }

    #[test]
    fn test_toggle_unknown_category() {
        let mut page = evaluated();
        assert!(matches!(
            page.toggle_category("Astrologie"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_toggle_without_result() {
        let mut page = AtsEvaluator::default();
        assert!(page.toggle_category("Projets").is_err());
    }

    #[test]
    fn test_reset_clears_file_and_expansion() {
        let mut page = evaluated();
        page.toggle_category("Projets").unwrap();
        page.reset();
        assert!(page.evaluation.result().is_none());
        assert!(!page.upload.has_file());
        assert!(page.expanded_category.is_none());
    }
}
