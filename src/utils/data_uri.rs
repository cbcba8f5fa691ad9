//! Image to data URI conversion
//!
//! QR payloads arrive as `data:image/png;base64,...` strings and the email
//! template embeds the college logo the same way.

use std::path::Path;
use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};
use crate::utils::errors::{GatePassError, Result};

/// Standard alphabet, padded on encode, padding optional on decode
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A decoded `data:` URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Whether the source string is an inline `data:` URI
pub fn is_data_uri(source: &str) -> bool {
    source.starts_with("data:")
}

/// Encode raw bytes as a base64 `data:` URI
pub fn encode_data_uri(bytes: &[u8], mime_type: &str) -> String {
    format!("data:{};base64,{}", mime_type, PAYLOAD_ENGINE.encode(bytes))
}

/// Decode a base64 `data:` URI
pub fn decode_data_uri(uri: &str) -> Result<DataUri> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| GatePassError::InvalidInput("Not a data URI".to_string()))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| GatePassError::InvalidInput("Data URI has no payload".to_string()))?;

    let mime_type = header
        .strip_suffix(";base64")
        .ok_or_else(|| GatePassError::InvalidInput("Only base64 data URIs are supported".to_string()))?;

    let bytes = PAYLOAD_ENGINE.decode(payload.trim())?;

    Ok(DataUri {
        mime_type: if mime_type.is_empty() { "text/plain".to_string() } else { mime_type.to_string() },
        bytes,
    })
}

/// Read a local image and return it as a data URI
pub async fn load_logo_data_uri(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let mime_type = match path.extension().and_then(|ext| ext.to_str()) {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("gif") => "image/gif",
        _ => "image/png",
    };
    Ok(encode_data_uri(&bytes, mime_type))
}
