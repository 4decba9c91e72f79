//! Upload multipart (foto inventario) senza normalizzazione della risposta

use std::path::Path;

use reqwest::multipart::{Form, Part};

use super::dispatch::{compose_headers, ApiClient};
use crate::error::{ClientError, Result};
use crate::utils::{get_content_type, validate_image_upload};

/// Campo multipart atteso dal backend
pub const FILE_FIELD: &str = "file";

/// File da inviare come campo `file`
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = get_content_type(extension_of(&file_name)).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Legge una foto da disco, rifiutando i formati non immagine
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ClientError::BadRequest(format!("percorso non valido: {}", path.display())))?
            .to_string();

        validate_image_upload(extension_of(&file_name))?;

        let bytes = tokio::fs::read(path).await?;
        Ok(Self::new(file_name, bytes))
    }

    fn into_form(self) -> Result<Form> {
        let part = Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.content_type)?;
        Ok(Form::new().part(FILE_FIELD, part))
    }
}

impl ApiClient {
    /// Invia un file in multipart e restituisce la risposta grezza
    ///
    /// Il `Content-Type` (con boundary) è lasciato al trasporto; il token
    /// viene allegato se presente. Il chiamante controlla stato e corpo.
    pub async fn upload_raw(&self, path: &str, file: UploadFile) -> Result<reqwest::Response> {
        let url = self.url(path);
        let token = self.store().token();
        let headers = compose_headers(&[], token.as_deref(), false)?;

        tracing::debug!(
            "[API] POST {} (multipart, {} byte)",
            url,
            file.bytes.len()
        );

        let response = self
            .http
            .post(&url)
            .headers(headers)
            .multipart(file.into_form()?)
            .send()
            .await?;

        Ok(response)
    }
}

fn extension_of(file_name: &str) -> &str {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
}
