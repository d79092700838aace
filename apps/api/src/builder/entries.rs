//! Repeatable CV sections keyed by generated ids.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// A record that lives in an `EntryList`.
pub trait Entry {
    type Patch;

    fn blank(id: Uuid) -> Self;
    fn id(&self) -> Uuid;
    fn apply(&mut self, patch: Self::Patch);
}

/// Ordered list that always keeps at least one entry.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct EntryList<T> {
    items: Vec<T>,
}

impl<T: Entry> Default for EntryList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entry> EntryList<T> {
    /// Starts with a single blank entry.
    pub fn new() -> Self {
        Self {
            items: vec![T::blank(Uuid::new_v4())],
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Appends a blank entry and returns its id.
    pub fn add(&mut self) -> Uuid {
        let id = Uuid::new_v4();
        self.items.push(T::blank(id));
        id
    }

    /// Removes `id` unless it would empty the list. Returns whether anything was removed.
    pub fn remove(&mut self, id: Uuid) -> bool {
        if self.items.len() <= 1 {
            return false;
        }
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        self.items.len() != before
    }

    pub fn update(&mut self, id: Uuid, patch: T::Patch) -> Result<&T, AppError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(|| AppError::NotFound(format!("Entry {id} not found")))?;
        item.apply(patch);
        Ok(item)
    }
}

fn set(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *field = value;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonalInfoPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub summary: Option<String>,
}

impl PersonalInfo {
    pub fn apply(&mut self, patch: PersonalInfoPatch) {
        set(&mut self.full_name, patch.full_name);
        set(&mut self.email, patch.email);
        set(&mut self.phone, patch.phone);
        set(&mut self.location, patch.location);
        set(&mut self.linkedin, patch.linkedin);
        set(&mut self.summary, patch.summary);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub id: Uuid,
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExperiencePatch {
    pub company: Option<String>,
    pub position: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
}

impl Entry for ExperienceEntry {
    type Patch = ExperiencePatch;

    fn blank(id: Uuid) -> Self {
        Self {
            id,
            company: String::new(),
            position: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            description: String::new(),
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn apply(&mut self, patch: ExperiencePatch) {
        set(&mut self.company, patch.company);
        set(&mut self.position, patch.position);
        set(&mut self.start_date, patch.start_date);
        set(&mut self.end_date, patch.end_date);
        set(&mut self.description, patch.description);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub id: Uuid,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub year: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EducationPatch {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub field: Option<String>,
    pub year: Option<String>,
}

impl Entry for EducationEntry {
    type Patch = EducationPatch;

    fn blank(id: Uuid) -> Self {
        Self {
            id,
            institution: String::new(),
            degree: String::new(),
            field: String::new(),
            year: String::new(),
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn apply(&mut self, patch: EducationPatch) {
        set(&mut self.institution, patch.institution);
        set(&mut self.degree, patch.degree);
        set(&mut self.field, patch.field);
        set(&mut self.year, patch.year);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub id: Uuid,
    pub language: String,
    /// Free text such as "Natif", "Courant" or "B2".
    pub level: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LanguagePatch {
    pub language: Option<String>,
    pub level: Option<String>,
}

impl Entry for LanguageEntry {
    type Patch = LanguagePatch;

    fn blank(id: Uuid) -> Self {
        Self {
            id,
            language: String::new(),
            level: String::new(),
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn apply(&mut self, patch: LanguagePatch) {
        set(&mut self.language, patch.language);
        set(&mut self.level, patch.level);
    }
}

/// Ordered, duplicate-free skill names.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SkillSet {
    skills: Vec<String>,
}

impl SkillSet {
    pub fn as_slice(&self) -> &[String] {
        &self.skills
    }

    /// Adds the trimmed text. Blank or already present text is ignored.
    pub fn add(&mut self, text: &str) -> bool {
        let skill = text.trim();
        if skill.is_empty() || self.skills.iter().any(|s| s == skill) {
            return false;
        }
        self.skills.push(skill.to_string());
        true
    }

    pub fn remove(&mut self, skill: &str) -> bool {
        let before = self.skills.len();
        self.skills.retain(|s| s != skill);
        self.skills.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_starts_with_one_blank_entry() {
        let list: EntryList<ExperienceEntry> = EntryList::new();
        assert_eq!(list.len(), 1);
        assert!(list.items()[0].company.is_empty());
    }

    #[test]
    fn test_remove_last_entry_is_noop() {
        let mut list: EntryList<EducationEntry> = EntryList::new();
        let only = list.items()[0].id;
        assert!(!list.remove(only));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_add_then_remove_by_id() {
        let mut list: EntryList<LanguageEntry> = EntryList::new();
        let first = list.items()[0].id;
        let second = list.add();
        assert_ne!(first, second);
        assert!(list.remove(first));
        assert_eq!(list.items()[0].id, second);
    }

    #[test]
    fn test_remove_unknown_id_keeps_list() {
        let mut list: EntryList<LanguageEntry> = EntryList::new();
        list.add();
        assert!(!list.remove(Uuid::new_v4()));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_update_only_touches_given_fields() {
        let mut list: EntryList<ExperienceEntry> = EntryList::new();
        let id = list.items()[0].id;
        list.update(
            id,
            ExperiencePatch {
                company: Some("OCP".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        list.update(
            id,
            ExperiencePatch {
                position: Some("Data Engineer".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        let entry = &list.items()[0];
        assert_eq!(entry.company, "OCP");
        assert_eq!(entry.position, "Data Engineer");
    }

    #[test]
    fn test_update_unknown_id_not_found() {
        let mut list: EntryList<EducationEntry> = EntryList::new();
        assert!(matches!(
            list.update(Uuid::new_v4(), EducationPatch::default()),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_skills_trimmed_and_deduplicated() {
        let mut skills = SkillSet::default();
        assert!(skills.add("  Rust "));
        assert!(!skills.add("Rust"));
        assert!(!skills.add("   "));
        assert!(skills.add("SQL"));
        assert_eq!(skills.as_slice(), &["Rust".to_string(), "SQL".to_string()]);
    }

    #[test]
    fn test_skill_remove_by_value() {
        let mut skills = SkillSet::default();
        skills.add("Git");
        assert!(skills.remove("Git"));
        assert!(!skills.remove("Git"));
        assert!(skills.as_slice().is_empty());
    }

    #[test]
    fn test_personal_info_patch() {
        let mut info = PersonalInfo::default();
        info.apply(PersonalInfoPatch {
            full_name: Some("Ahmed Benjelloun".to_string()),
            email: Some("ahmed@email.com".to_string()),
            ..Default::default()
        });
        assert_eq!(info.full_name, "Ahmed Benjelloun");
        assert!(info.phone.is_empty());
    }
}
