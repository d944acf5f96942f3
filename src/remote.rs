use std::sync::Arc;

use crate::error::{Result, SunDashError};

/// A fetched solar image, kept as the encoded bytes egui will decode.
///
/// Cloning shares the encoded buffer.
#[derive(Debug, Clone)]
pub struct SunImage {
    pub bytes: Arc<[u8]>,
    pub width: u32,
    pub height: u32,
    /// Bumped on every refresh so the UI can give each image its own URI.
    pub generation: u64,
}

impl SunImage {
    pub fn uri(&self) -> String {
        format!("bytes://sun-{}.jpg", self.generation)
    }
}

/// Download the latest solar image. Blocks until the request completes.
///
/// No timeout or retry: a failure is reported once and the caller decides
/// what to show instead.
pub fn fetch_sun_image(url: &str, generation: u64) -> Result<SunImage> {
    let response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|e| SunDashError::RemoteFetchFailure(format!("GET {url}: {e}")))?;
    let bytes = response
        .bytes()
        .map_err(|e| SunDashError::RemoteFetchFailure(format!("reading body of {url}: {e}")))?;

    let image = decode_image(bytes.to_vec(), generation)?;
    log::info!(
        "Fetched solar image {}x{} ({} bytes) from {url}",
        image.width,
        image.height,
        image.bytes.len()
    );
    Ok(image)
}

/// Check that `bytes` hold a decodable image.
pub fn decode_image(bytes: Vec<u8>, generation: u64) -> Result<SunImage> {
    let decoded = image::load_from_memory(&bytes)
        .map_err(|e| SunDashError::RemoteFetchFailure(format!("response is not an image: {e}")))?;
    Ok(SunImage {
        width: decoded.width(),
        height: decoded.height(),
        bytes: bytes.into(),
        generation,
    })
}
