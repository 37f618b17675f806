//! Flat filesystem store for uploaded images.
//!
//! Files live under `<public>/uploads/<kind-dir>/` with a timestamped,
//! collision-resistant name. Records keep the public-root relative path;
//! resolving it to a URL happens at read time against the request origin.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::kind::Kind;

pub const MAX_IMAGE_BYTES: usize = 20 * 1024 * 1024;

const ALLOWED_EXTENSIONS: [&str; 4] = ["jpeg", "jpg", "png", "gif"];
const ALLOWED_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/gif"];

/// A decoded single-file upload that already passed the acceptance policy.
/// Constructing one is the only way an upload reaches the image store.
#[derive(Debug, Clone)]
pub struct StagedUpload {
    original_name: String,
    extension: String,
    bytes: Vec<u8>,
}

impl StagedUpload {
    /// Applies the upload policy: extension and declared MIME type must both
    /// come from the image allow-list and the payload must fit the size cap.
    pub fn checked(
        original_name: String,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Self, DomainError> {
        let extension = original_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        if !ALLOWED_EXTENSIONS.contains(&extension.as_str())
            || !ALLOWED_MIME_TYPES.contains(&content_type.to_ascii_lowercase().as_str())
        {
            return Err(DomainError::validation("Only image files are allowed"));
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(DomainError::validation("Image exceeds the 20 MiB size limit"));
        }

        Ok(Self {
            original_name,
            extension,
            bytes,
        })
    }

    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Request scheme + host, captured once per request and used to turn stored
/// relative paths into externally addressable URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin {
    scheme: String,
    host: String,
}

impl RequestOrigin {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
        }
    }
}

pub struct ImageStore {
    public_root: PathBuf,
}

impl ImageStore {
    pub fn new(public_root: impl Into<PathBuf>) -> Self {
        Self {
            public_root: public_root.into(),
        }
    }

    pub fn public_root(&self) -> &Path {
        &self.public_root
    }

    /// Absolute path a stored relative path resolves to.
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.public_root.join(relative)
    }

    /// Writes the upload under the kind's subdirectory (created on demand)
    /// and returns the stored path relative to the public root.
    pub async fn save(&self, kind: Kind, upload: &StagedUpload) -> Result<String, DomainError> {
        let dir = kind
            .upload_dir()
            .ok_or_else(|| DomainError::validation(format!("{kind} does not accept images")))?;

        let target_dir = self.public_root.join("uploads").join(dir);
        fs::create_dir_all(&target_dir)
            .await
            .map_err(|err| DomainError::Filesystem(err.to_string()))?;

        let suffix = Uuid::new_v4().simple().to_string();
        let file_name = format!(
            "image-{}-{}.{}",
            Utc::now().timestamp_millis(),
            &suffix[..8],
            upload.extension
        );
        let target = target_dir.join(&file_name);

        fs::write(&target, &upload.bytes)
            .await
            .map_err(|err| DomainError::Filesystem(err.to_string()))?;

        debug!(path = %target.display(), size = upload.len(), "stored uploaded image");
        Ok(format!("uploads/{dir}/{file_name}"))
    }

    /// Removes the file behind a stored relative path. Missing files are a
    /// no-op; other failures are logged and swallowed so cleanup never fails
    /// the primary operation.
    pub async fn delete(&self, relative: &str) {
        let full = self.public_root.join(relative);
        match fs::remove_file(&full).await {
            Ok(()) => debug!(path = %full.display(), "removed image"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                warn!(path = %full.display(), error = %err, "failed to remove image");
            }
        }
    }

    /// Re-bases a stored relative path onto the request origin. `None` in,
    /// `None` out.
    pub fn to_url(origin: &RequestOrigin, relative: Option<&str>) -> Option<String> {
        relative.map(|path| {
            let path = path.trim_start_matches('/');
            format!("{}://{}/{}", origin.scheme, origin.host, path)
        })
    }
}
