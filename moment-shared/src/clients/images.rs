use chrono::Datelike;
use std::path::{Component, Path, PathBuf};
use uuid::Uuid;

/// Disk-backed image storage. Files land under
/// `{root}/{year}/{month}/{day}/{user_id}/{uuid}.{ext}` and are addressed by
/// that relative path everywhere else (database rows, URLs).
#[derive(Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        tracing::info!(root = %root.display(), "image store initialized");
        Self { root }
    }

    /// Store a file and return its relative path
    pub async fn save(&self, user_id: Uuid, ext: &str, data: &[u8]) -> Result<String, String> {
        let now = chrono::Utc::now();
        let rel = format!(
            "{}/{}/{}/{}/{}.{}",
            now.year(),
            now.month(),
            now.day(),
            user_id,
            Uuid::new_v4(),
            ext
        );

        let full = self.root.join(&rel);
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| format!("create directory failed: {e}"))?;
        }
        tokio::fs::write(&full, data)
            .await
            .map_err(|e| format!("write failed: {e}"))?;

        Ok(rel)
    }

    /// Read a stored file with its content type. `Ok(None)` when the path is
    /// unknown or would escape the storage root.
    pub async fn read(&self, rel_path: &str) -> Result<Option<(Vec<u8>, &'static str)>, String> {
        let Some(safe) = sanitize(rel_path) else {
            return Ok(None);
        };

        let full = self.root.join(safe);
        match tokio::fs::read(&full).await {
            Ok(bytes) => Ok(Some((bytes, content_type_for(rel_path)))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(format!("read failed: {e}")),
        }
    }
}

/// Accept only plain relative components; anything absolute or containing
/// `..` is treated as nonexistent.
fn sanitize(rel: &str) -> Option<PathBuf> {
    let path = Path::new(rel);
    let mut clean = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => clean.push(part),
            _ => return None,
        }
    }
    if clean.as_os_str().is_empty() {
        return None;
    }
    Some(clean)
}

pub fn content_type_for(path: &str) -> &'static str {
    match Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_rejects_traversal_and_absolute_paths() {
        assert!(sanitize("../etc/passwd").is_none());
        assert!(sanitize("2025/../../secret.png").is_none());
        assert!(sanitize("/etc/passwd").is_none());
        assert!(sanitize("").is_none());
        assert!(sanitize("2025/5/29/user/img.png").is_some());
    }

    #[test]
    fn content_types_by_extension() {
        assert_eq!(content_type_for("a/b/photo.jpg"), "image/jpeg");
        assert_eq!(content_type_for("a/b/photo.JPEG"), "image/jpeg");
        assert_eq!(content_type_for("a/b/photo.png"), "image/png");
        assert_eq!(content_type_for("a/b/photo.gif"), "image/gif");
        assert_eq!(content_type_for("a/b/mystery.bin"), "application/octet-stream");
    }

    #[tokio::test]
    async fn save_then_read_round_trip() {
        let root = std::env::temp_dir().join(format!("moment-images-{}", Uuid::new_v4()));
        let store = ImageStore::new(&root);

        let user = Uuid::new_v4();
        let rel = store.save(user, "png", b"not-really-a-png").await.unwrap();
        assert!(rel.ends_with(".png"));
        assert!(rel.contains(&user.to_string()));

        let (bytes, content_type) = store.read(&rel).await.unwrap().unwrap();
        assert_eq!(bytes, b"not-really-a-png");
        assert_eq!(content_type, "image/png");

        assert!(store.read("missing/file.png").await.unwrap().is_none());

        tokio::fs::remove_dir_all(&root).await.ok();
    }
}
