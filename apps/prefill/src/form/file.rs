#![allow(dead_code)]
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

const MB: u64 = 1024 * 1024;

pub const DEFAULT_MAX_MB: u64 = 5;
pub const DEFAULT_ALLOWED_EXT: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];
pub const DEFAULT_ALLOWED_MIME: &[&str] = &["image/jpeg", "image/png", "image/webp", "image/gif"];

/// A candidate file as handed over by the dialog, a drop, or the filesystem.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub name: String,
    /// Declared MIME type. May be empty when the source could not tell.
    pub mime: String,
    pub bytes: Bytes,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk, guessing its MIME type from the extension.
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime = mime_guess::from_path(path)
            .first()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_default();
        Ok(Self::new(name, mime, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Lowercased text after the last dot (the whole name when there is none).
    pub fn extension(&self) -> String {
        self.name
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileRejection {
    #[error("이미지 용량이 초과되었습니다. (최대 {max_mb}MB, 현재 {actual})")]
    TooLarge { max_mb: u64, actual: String },

    #[error("허용되지 않은 확장자입니다. ({})", allowed.join(", "))]
    Extension { allowed: Vec<String> },

    #[error("허용되지 않은 형식입니다. ({})", allowed.join(", "))]
    MimeType { allowed: Vec<String> },

    #[error("파일을 선택할 수 없는 상태입니다.")]
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileConstraints {
    pub max_mb: u64,
    pub allowed_ext: Vec<String>,
    pub allowed_mime: Vec<String>,
}

impl Default for FileConstraints {
    fn default() -> Self {
        Self {
            max_mb: DEFAULT_MAX_MB,
            allowed_ext: DEFAULT_ALLOWED_EXT.iter().map(|s| s.to_string()).collect(),
            allowed_mime: DEFAULT_ALLOWED_MIME.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl FileConstraints {
    /// Profile photo rules: no GIFs, size cap from configuration.
    pub fn profile_photo(max_mb: u64) -> Self {
        Self {
            max_mb,
            allowed_ext: ["jpg", "jpeg", "png", "webp"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ..Self::default()
        }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_mb.saturating_mul(MB)
    }

    /// Value for a file input's `accept` attribute, e.g. `.jpg,.png`.
    pub fn accept_attr(&self) -> String {
        self.allowed_ext
            .iter()
            .map(|e| format!(".{e}"))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Checks size, then extension, then MIME type. The first violation wins.
    pub fn validate(&self, file: &UploadFile) -> Result<(), FileRejection> {
        if file.size() > self.max_bytes() {
            return Err(FileRejection::TooLarge {
                max_mb: self.max_mb,
                actual: format_bytes(file.size()),
            });
        }

        let ext = file.extension();
        if !self.allowed_ext.iter().any(|e| *e == ext) {
            return Err(FileRejection::Extension {
                allowed: self.allowed_ext.clone(),
            });
        }

        // Some sources report no type at all; the extension check already passed.
        if !file.mime.is_empty() && !self.allowed_mime.iter().any(|m| *m == file.mime) {
            return Err(FileRejection::MimeType {
                allowed: self.allowed_mime.clone(),
            });
        }

        Ok(())
    }
}

/// Human-readable size with two decimals, e.g. `4.00 MB`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}

// ────────────────────────────────────────────────────────────────────────────
// Preview URLs
// ────────────────────────────────────────────────────────────────────────────

/// Tracks live preview URLs. Each URL is released exactly once, when its handle drops.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    live: Arc<Mutex<HashSet<String>>>,
}

impl PreviewRegistry {
    pub fn create(&self, file: &UploadFile) -> PreviewUrl {
        let url = format!("blob:prefill/{}", Uuid::new_v4());
        self.live
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(url.clone());
        debug!("Created preview {} for {}", url, file.name);
        PreviewUrl {
            url,
            registry: self.clone(),
        }
    }

    pub fn is_live(&self, url: &str) -> bool {
        self.live
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(url)
    }

    pub fn live_count(&self) -> usize {
        self.live.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn revoke(&self, url: &str) {
        self.live
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(url);
        debug!("Revoked preview {}", url);
    }
}

#[derive(Debug)]
pub struct PreviewUrl {
    url: String,
    registry: PreviewRegistry,
}

impl PreviewUrl {
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl Drop for PreviewUrl {
    fn drop(&mut self) {
        self.registry.revoke(&self.url);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Photo control
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSource {
    Dialog,
    Drop,
}

#[derive(Debug)]
pub enum PhotoAction {
    Offer(FileSource, UploadFile),
    Clear,
    DragOver,
    DragLeave,
}

/// Profile photo control. A rejected file leaves the current photo untouched.
#[derive(Debug)]
pub struct PhotoField {
    pub constraints: FileConstraints,
    pub required: bool,
    pub disabled: bool,
    file: Option<UploadFile>,
    preview: Option<PreviewUrl>,
    error: Option<FileRejection>,
    dragging: bool,
    registry: PreviewRegistry,
}

impl Default for PhotoField {
    fn default() -> Self {
        Self::new(FileConstraints::default(), PreviewRegistry::default())
    }
}

impl PhotoField {
    pub fn new(constraints: FileConstraints, registry: PreviewRegistry) -> Self {
        Self {
            constraints,
            required: true,
            disabled: false,
            file: None,
            preview: None,
            error: None,
            dragging: false,
            registry,
        }
    }

    pub fn apply(&mut self, action: PhotoAction) -> Result<(), FileRejection> {
        match action {
            PhotoAction::Offer(source, file) => self.offer(source, file),
            PhotoAction::Clear => {
                self.clear();
                Ok(())
            }
            PhotoAction::DragOver => {
                self.drag_over();
                Ok(())
            }
            PhotoAction::DragLeave => {
                self.drag_leave();
                Ok(())
            }
        }
    }

    /// Validates and takes a file. On success the previous preview is released and a new one
    /// created; on failure the error is recorded and returned.
    pub fn offer(&mut self, source: FileSource, file: UploadFile) -> Result<(), FileRejection> {
        if source == FileSource::Drop {
            self.dragging = false;
        }
        if self.disabled {
            return Err(FileRejection::Disabled);
        }

        if let Err(rejection) = self.constraints.validate(&file) {
            self.error = Some(rejection.clone());
            return Err(rejection);
        }

        // Release the old URL before issuing the new one.
        self.preview = None;
        self.preview = Some(self.registry.create(&file));
        self.file = Some(file);
        self.error = None;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.file = None;
        self.preview = None;
        self.error = None;
    }

    pub fn drag_over(&mut self) {
        if !self.disabled {
            self.dragging = true;
        }
    }

    pub fn drag_leave(&mut self) {
        self.dragging = false;
    }

    pub fn file(&self) -> Option<&UploadFile> {
        self.file.as_ref()
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.preview.as_ref().map(PreviewUrl::as_str)
    }

    pub fn error(&self) -> Option<&FileRejection> {
        self.error.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn has_file(&self) -> bool {
        self.file.is_some()
    }

    pub fn is_valid(&self) -> bool {
        self.has_file() || !self.required
    }
}
