// src/admin/image.rs
use mime::Mime;
use thiserror::Error;

/// Largest image the editor accepts.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageRejection {
    #[error("Image must be less than 5MB")]
    TooLarge { size: usize },
    #[error("Please select an image file")]
    NotAnImage,
}

/// An image picked in the editor but not uploaded yet.
#[derive(Clone, PartialEq, Eq)]
pub struct StagedImage {
    pub file_name: String,
    pub content_type: Mime,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for StagedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StagedImage")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type.essence_str())
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl StagedImage {
    /// Size is checked before type, so an oversized non-image reports the size.
    pub fn new(file_name: &str, content_type: &str, bytes: Vec<u8>) -> Result<Self, ImageRejection> {
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(ImageRejection::TooLarge { size: bytes.len() });
        }

        let content_type: Mime = content_type
            .trim()
            .parse()
            .map_err(|_| ImageRejection::NotAnImage)?;
        if content_type.type_() != mime::IMAGE || bytes.is_empty() {
            return Err(ImageRejection::NotAnImage);
        }

        let file_name = match file_name.trim() {
            "" => "image",
            name => name,
        };

        Ok(Self {
            file_name: file_name.to_string(),
            content_type,
            bytes,
        })
    }
}
