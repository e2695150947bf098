//! Upload Encoding
//!
//! Files picked in the browser travel to the API as base64 text plus a
//! content type.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Content type assumed for images with no declared type
pub const DEFAULT_IMAGE_TYPE: &str = "image/jpeg";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("No file selected")]
    NoFile,
    #[error("Failed to read file: {0}")]
    Read(String),
}

/// Base64 payload ready for an `imageData`/`videoData` field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedFile {
    pub data: String,
    pub content_type: String,
}

impl EncodedFile {
    pub fn from_bytes(bytes: &[u8], content_type: &str) -> Self {
        Self {
            data: STANDARD.encode(bytes),
            content_type: content_type.trim().to_string(),
        }
    }

    /// Content type, or `fallback` when the browser reported none
    pub fn content_type_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.content_type.is_empty() {
            fallback
        } else {
            &self.content_type
        }
    }

    /// `data:` URL for local previews
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type_or(DEFAULT_IMAGE_TYPE),
            self.data
        )
    }

    /// Approximate decoded size in bytes
    pub fn decoded_len(&self) -> usize {
        let padding = self.data.bytes().rev().take_while(|b| *b == b'=').count();
        ((self.data.len() / 4) * 3).saturating_sub(padding.min(2))
    }
}

/// Split `data:<type>;base64,<payload>` into its parts
pub fn parse_data_url(url: &str) -> Option<EncodedFile> {
    let rest = url.strip_prefix("data:")?;
    let (content_type, data) = rest.split_once(";base64,")?;
    if content_type.is_empty() || content_type.contains(';') || data.is_empty() {
        return None;
    }
    Some(EncodedFile {
        data: data.to_string(),
        content_type: content_type.to_string(),
    })
}

/// Read a browser `File` and base64-encode its contents
pub async fn read_file(file: &web_sys::File) -> Result<EncodedFile, UploadError> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| UploadError::Read(format!("{:?}", e)))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    log::debug!("Read {} ({} bytes)", file.name(), bytes.len());
    Ok(EncodedFile::from_bytes(&bytes, &file.type_()))
}

/// First file of an `<input type="file">` change event
pub fn selected_file(ev: &web_sys::Event) -> Result<web_sys::File, UploadError> {
    use wasm_bindgen::JsCast;

    ev.target()
        .and_then(|target| target.dyn_into::<web_sys::HtmlInputElement>().ok())
        .and_then(|input| input.files())
        .and_then(|files| files.get(0))
        .ok_or(UploadError::NoFile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes() {
        let file = EncodedFile::from_bytes(b"hello", "text/plain");
        assert_eq!(file.data, "aGVsbG8=");
        assert_eq!(file.content_type, "text/plain");
        assert_eq!(file.decoded_len(), 5);
    }

    #[test]
    fn test_parse_data_url() {
        let file = parse_data_url("data:image/png;base64,AAA").unwrap();
        assert_eq!(file.data, "AAA");
        assert_eq!(file.content_type, "image/png");
    }

    #[test]
    fn test_parse_data_url_rejects_other_forms() {
        assert!(parse_data_url("https://example.com/a.png").is_none());
        assert!(parse_data_url("data:;base64,AAA").is_none());
        assert!(parse_data_url("data:text/plain,hello").is_none());
        assert!(parse_data_url("data:image/png;base64,").is_none());
    }

    #[test]
    fn test_data_url_round_trip_defaults_type() {
        let file = EncodedFile::from_bytes(&[1, 2, 3], "");
        assert_eq!(file.content_type_or(DEFAULT_IMAGE_TYPE), "image/jpeg");
        let parsed = parse_data_url(&file.to_data_url()).unwrap();
        assert_eq!(parsed.data, file.data);
        assert_eq!(parsed.content_type, "image/jpeg");
    }
}
