//! Leaf scan flow: validate the picked image, then ask for a diagnosis.

use tracing::debug;

use super::assistant::{Assistant, InlineImage, InlineImageError};

pub const NO_IMAGE: &str = "No image to scan.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    NoImage,
    InvalidImage(InlineImageError),
    Diagnosis(String),
}

impl ScanOutcome {
    /// Text the identify panel shows.
    pub fn message(&self) -> String {
        match self {
            ScanOutcome::NoImage => NO_IMAGE.to_string(),
            ScanOutcome::InvalidImage(e) => format!("Could not read the image: {}", e),
            ScanOutcome::Diagnosis(text) => text.clone(),
        }
    }
}

pub async fn scan(assistant: &Assistant, image: Option<&str>) -> ScanOutcome {
    let Some(raw) = image.filter(|raw| !raw.trim().is_empty()) else {
        return ScanOutcome::NoImage;
    };

    match InlineImage::from_data_url(raw) {
        Ok(image) => {
            debug!(mime = %image.mime_type, "Scanning plant image");
            ScanOutcome::Diagnosis(assistant.diagnose(image).await)
        }
        Err(e) => {
            debug!(error = %e, "Rejected plant image");
            ScanOutcome::InvalidImage(e)
        }
    }
}
