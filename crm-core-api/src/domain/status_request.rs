use serde::{Deserialize, Serialize};

/// A file received from a multipart upload, held in memory until the
/// transactional part of the operation has committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// The final path component of the client-supplied name, stripped of any
    /// directory parts so it can be embedded in a storage path.
    pub fn sanitized_file_name(&self) -> String {
        let base = self
            .file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
            .trim();
        let cleaned: String = base
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
            .collect();
        let cleaned = cleaned.trim_start_matches('.');
        if cleaned.is_empty() {
            "upload.bin".to_string()
        } else {
            cleaned.to_string()
        }
    }

    /// Lowercased extension including the dot, e.g. `.png`.
    pub fn extension(&self) -> Option<String> {
        let name = self.sanitized_file_name();
        name.rfind('.')
            .filter(|idx| *idx > 0)
            .map(|idx| name[idx..].to_ascii_lowercase())
    }
}

/// Status change as submitted by the caller. `status` is validated by the
/// status transition engine, not here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusChangeRequest {
    pub status: String,
    pub reason: String,
    pub notes: Option<String>,
}
