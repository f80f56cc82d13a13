// src/uploads.rs
use chrono::Utc;
use mime::Mime;
use rand::rngs::OsRng;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::auth::token::generate_token;
use crate::errors::ServerError;
use crate::store::BlobStore;

/// Random bytes mixed into each key so same-named uploads never collide.
const KEY_NONCE_BYTES: usize = 6;

/// Prefix every event image key starts with.
pub const EVENT_IMAGE_PREFIX: &str = "events";

/// Uploaded images kept on local disk and served back under `base_url`.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
    /// Public URL prefix, e.g. "/uploads".
    base_url: String,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Resolve a key (e.g. "events/123_a.png") to a file under the root.
    /// Rejects anything that could escape it.
    pub fn path_for_key(&self, key: &str) -> Option<PathBuf> {
        let rel = Path::new(key);
        let safe = !key.is_empty()
            && rel
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        safe.then(|| self.root.join(rel))
    }

    /// The key part of a URL this store issued.
    pub fn key_for_url<'a>(&self, url: &'a str) -> Option<&'a str> {
        url.strip_prefix(self.base_url.as_str())?.strip_prefix('/')
    }

    /// Bytes and content type of a stored file, for serving.
    pub fn read(&self, key: &str) -> Result<(Vec<u8>, &'static str), ServerError> {
        let path = self.path_for_key(key).ok_or(ServerError::NotFound)?;
        let bytes = fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ServerError::NotFound,
            _ => ServerError::StorageError(format!("read {} failed: {e}", path.display())),
        })?;
        Ok((bytes, content_type_for(&path)))
    }
}

/// Keep file names to a safe character set so keys stay valid path segments.
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Name the stored file gets: sanitized, with an extension taken from the
/// MIME subtype when the client sent none.
fn stored_file_name(name: &str, content_type: &str) -> String {
    let name = sanitize_file_name(name);
    if Path::new(&name).extension().is_some() {
        return name;
    }
    match content_type.parse::<Mime>() {
        Ok(m) if m.type_() == mime::IMAGE => format!("{name}.{}", m.subtype().as_str().to_ascii_lowercase()),
        _ => name,
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

impl BlobStore for LocalBlobStore {
    fn upload(&self, file_name: &str, content_type: &str, bytes: &[u8]) -> Result<String, ServerError> {
        let key = format!(
            "{EVENT_IMAGE_PREFIX}/{}_{}_{}",
            Utc::now().timestamp_millis(),
            generate_token(&mut OsRng, KEY_NONCE_BYTES),
            stored_file_name(file_name, content_type)
        );
        let path = self.path_for_key(&key).ok_or(ServerError::InternalError)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ServerError::StorageError(format!("create upload dir failed: {e}")))?;
        }
        fs::write(&path, bytes)
            .map_err(|e| ServerError::StorageError(format!("write upload failed: {e}")))?;

        tracing::info!(%key, content_type, size = bytes.len(), "image uploaded");
        Ok(format!("{}/{key}", self.base_url))
    }

    fn delete_by_url(&self, url: &str) -> Result<(), ServerError> {
        let key = self
            .key_for_url(url)
            .ok_or_else(|| ServerError::StorageError(format!("not an uploaded file: {url}")))?;
        let path = self
            .path_for_key(key)
            .ok_or_else(|| ServerError::StorageError(format!("invalid upload key: {key}")))?;

        fs::remove_file(&path)
            .map_err(|e| ServerError::StorageError(format!("delete {} failed: {e}", path.display())))?;

        tracing::info!(%key, "image deleted");
        Ok(())
    }
}
