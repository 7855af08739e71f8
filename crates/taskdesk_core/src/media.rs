use crate::error::AppError;
use std::path::{Path, PathBuf};
use url::Url;

/// A picked photo ready to be sent as the `file` part of an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Where a picked image lives on the device: a plain path or a `file://` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new<S: Into<String>>(reference: S) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extension of the referenced file, taken after the last dot.
    pub fn extension(&self) -> Result<String, AppError> {
        let file_name = self
            .0
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.0.as_str());
        match file_name.rsplit_once('.') {
            Some((_, ext)) if !ext.trim().is_empty() => Ok(ext.trim().to_ascii_lowercase()),
            _ => Err(AppError::invalid_input(format!(
                "image has no file extension: {}",
                self.0
            ))),
        }
    }

    /// Declared type of the upload part, `image/<extension>`.
    pub fn content_type(&self) -> Result<String, AppError> {
        Ok(format!("image/{}", self.extension()?))
    }

    pub fn local_path(&self) -> Result<PathBuf, AppError> {
        if self.0.starts_with("file:") {
            let url = Url::parse(&self.0)
                .map_err(|err| AppError::invalid_input(format!("{}: {}", self.0, err)))?;
            return url
                .to_file_path()
                .map_err(|_| AppError::invalid_input(format!("not a local file: {}", self.0)));
        }
        Ok(Path::new(&self.0).to_path_buf())
    }
}

impl PhotoUpload {
    pub async fn read(image: &ImageRef) -> Result<Self, AppError> {
        let extension = image.extension()?;
        let content_type = image.content_type()?;
        let path = image.local_path()?;
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;

        Ok(Self {
            file_name: format!("photo.{extension}"),
            content_type,
            bytes,
        })
    }
}
