//! File selection widget: validates a chosen file against size and type rules.
//!
//! Only file metadata travels through here. Content is never read.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const BYTES_PER_MB: u64 = 1024 * 1024;

pub const DEFAULT_ACCEPTED_EXTENSIONS: &[&str] = &[".pdf", ".docx", ".doc", ".txt"];
pub const DEFAULT_MAX_SIZE_MB: u64 = 10;

/// Metadata of a file picked by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDescriptor {
    pub name: String,
    pub size_bytes: u64,
    /// MIME type as reported by the client; may be empty.
    #[serde(default)]
    pub mime_type: String,
}

impl FileDescriptor {
    /// Lowercased extension including the leading dot, e.g. `.pdf`.
    pub fn extension(&self) -> String {
        let last = self.name.rsplit('.').next().unwrap_or_default();
        format!(".{}", last.to_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UploadError {
    #[error("File exceeds size limit of {max_mb}MB")]
    ExceedsSizeLimit { max_mb: u64 },

    #[error("Unsupported file type")]
    UnsupportedType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadPolicy {
    pub accepted_extensions: Vec<String>,
    pub max_size_mb: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            accepted_extensions: DEFAULT_ACCEPTED_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            max_size_mb: DEFAULT_MAX_SIZE_MB,
        }
    }
}

impl UploadPolicy {
    /// Builds a policy from a comma-separated accept list such as `.pdf,.txt`.
    pub fn new(accept: &str, max_size_mb: u64) -> Self {
        let accepted_extensions = accept
            .split(',')
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self {
            accepted_extensions,
            max_size_mb,
        }
    }

    /// Size is checked first, then type. A file passes the type check when its
    /// extension equals an accepted entry or its MIME type mentions the entry.
    pub fn validate(&self, file: &FileDescriptor) -> Result<(), UploadError> {
        if file.size_bytes > self.max_size_mb.saturating_mul(BYTES_PER_MB) {
            return Err(UploadError::ExceedsSizeLimit {
                max_mb: self.max_size_mb,
            });
        }

        let extension = file.extension();
        let mime = file.mime_type.to_lowercase();
        let accepted = self.accepted_extensions.iter().any(|accepted| {
            let bare = accepted.replacen('.', "", 1);
            *accepted == extension || (!bare.is_empty() && mime.contains(&bare))
        });

        if !accepted {
            return Err(UploadError::UnsupportedType);
        }
        Ok(())
    }
}

/// Local state of one upload widget.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileUpload {
    pub selected: Option<FileDescriptor>,
    pub error: Option<String>,
}

impl FileUpload {
    /// Validates and, on success, holds the file. Returns the accepted file so
    /// the owning page can record it.
    pub fn select(
        &mut self,
        policy: &UploadPolicy,
        file: FileDescriptor,
    ) -> Result<FileDescriptor, UploadError> {
        self.error = None;
        match policy.validate(&file) {
            Ok(()) => {
                self.selected = Some(file.clone());
                Ok(file)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Drag-and-drop entry point; only the first dropped file counts.
    pub fn drop_files(
        &mut self,
        policy: &UploadPolicy,
        files: Vec<FileDescriptor>,
    ) -> Result<Option<FileDescriptor>, UploadError> {
        match files.into_iter().next() {
            Some(file) => self.select(policy, file).map(Some),
            None => Ok(None),
        }
    }

    /// Click-to-browse entry point; a dismissed dialog yields no file.
    pub fn browse(
        &mut self,
        policy: &UploadPolicy,
        file: Option<FileDescriptor>,
    ) -> Result<Option<FileDescriptor>, UploadError> {
        match file {
            Some(file) => self.select(policy, file).map(Some),
            None => Ok(None),
        }
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.error = None;
    }

    pub fn has_file(&self) -> bool {
        self.selected.is_some()
    }
}
