//! CV builder: a six-step wizard collecting CV sections, ending on a preview.
//!
//! Navigation is never gated on field content; any step is reachable with
//! empty fields.

pub mod entries;
pub mod handlers;
pub mod wizard;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use entries::{
    EducationEntry, EducationPatch, EntryList, ExperienceEntry, ExperiencePatch, LanguageEntry,
    LanguagePatch, PersonalInfo, PersonalInfoPatch, SkillSet,
};
use wizard::{step_overview, StepInfo, WizardStep};

/// Which repeatable section an entry operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Experience,
    Education,
    Language,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CvBuilder {
    pub step: WizardStep,
    pub personal_info: PersonalInfo,
    pub experiences: EntryList<ExperienceEntry>,
    pub educations: EntryList<EducationEntry>,
    pub skills: SkillSet,
    /// Pending text of the skill field; cleared once committed.
    pub skill_input: String,
    pub languages: EntryList<LanguageEntry>,
}

/// Read-only preview shown on the last step.
#[derive(Debug, Clone, Serialize)]
pub struct CvSummary {
    pub personal_info: PersonalInfo,
    pub experiences: Vec<ExperienceEntry>,
    pub educations: Vec<EducationEntry>,
    pub skills: Vec<String>,
    pub languages: Vec<LanguageEntry>,
}

impl CvBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct jump; only the range is checked.
    pub fn go_to_step(&mut self, ordinal: i64) -> Result<WizardStep, AppError> {
        self.step = WizardStep::new(ordinal)?;
        Ok(self.step)
    }

    pub fn next(&mut self) -> WizardStep {
        self.step = self.step.next();
        self.step
    }

    pub fn prev(&mut self) -> WizardStep {
        self.step = self.step.prev();
        self.step
    }

    pub fn steps(&self) -> Vec<StepInfo> {
        step_overview(self.step)
    }

    pub fn update_personal_info(&mut self, patch: PersonalInfoPatch) {
        self.personal_info.apply(patch);
    }

    pub fn add_entry(&mut self, kind: EntryKind) -> Uuid {
        match kind {
            EntryKind::Experience => self.experiences.add(),
            EntryKind::Education => self.educations.add(),
            EntryKind::Language => self.languages.add(),
        }
    }

    /// No-op when `id` is the only entry left or is unknown.
    pub fn remove_entry(&mut self, kind: EntryKind, id: Uuid) -> bool {
        match kind {
            EntryKind::Experience => self.experiences.remove(id),
            EntryKind::Education => self.educations.remove(id),
            EntryKind::Language => self.languages.remove(id),
        }
    }

    pub fn update_experience(&mut self, id: Uuid, patch: ExperiencePatch) -> Result<(), AppError> {
        self.experiences.update(id, patch).map(|_| ())
    }

    pub fn update_education(&mut self, id: Uuid, patch: EducationPatch) -> Result<(), AppError> {
        self.educations.update(id, patch).map(|_| ())
    }

    pub fn update_language(&mut self, id: Uuid, patch: LanguagePatch) -> Result<(), AppError> {
        self.languages.update(id, patch).map(|_| ())
    }

    pub fn set_skill_input(&mut self, text: String) {
        self.skill_input = text;
    }

    /// Commits the skill field. The field is cleared only when a skill was added.
    pub fn add_skill(&mut self) -> bool {
        let added = self.skills.add(&self.skill_input);
        if added {
            self.skill_input.clear();
        }
        added
    }

    pub fn remove_skill(&mut self, skill: &str) -> bool {
        self.skills.remove(skill)
    }

    pub fn summary(&self) -> CvSummary {
        CvSummary {
            personal_info: self.personal_info.clone(),
            experiences: self.experiences.items().to_vec(),
            educations: self.educations.items().to_vec(),
            skills: self.skills.as_slice().to_vec(),
            languages: self.languages.items().to_vec(),
        }
    }

    // TODO: render the summary to DOCX once a document template exists.
    pub fn download(&self) -> Result<Vec<u8>, AppError> {
        Err(AppError::NotImplemented)
    }
}
