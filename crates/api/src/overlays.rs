//! Fetching and preparing chart overlay images.
//!
//! Every failure here is swallowed: the series simply goes without its logo
//! or product image, and a warning is logged.

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reelbook_core::comparison::ChartSpec;
use reelbook_core::imaging::{prepare_overlay, LOGO_CANVAS, PRODUCT_CANVAS};

/// Largest overlay image body accepted, in bytes.
pub const MAX_OVERLAY_BYTES: usize = 10 * 1024 * 1024;

/// Prepared overlays keyed by source URL and canvas size.
type OverlayCache = HashMap<(String, (u32, u32)), Option<String>>;

/// Download `url` and turn it into a letterboxed, background-stripped PNG data URL.
pub async fn fetch_overlay(client: &reqwest::Client, url: &str, canvas: (u32, u32)) -> Option<String> {
    let bytes = match fetch_bytes(client, url, MAX_OVERLAY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(url, error = %e, "Overlay fetch failed");
            return None;
        }
    };

    match prepare_overlay(&bytes, canvas) {
        Ok(png) => Some(format!("data:image/png;base64,{}", STANDARD.encode(png))),
        Err(e) => {
            tracing::warn!(url, error = %e, "Overlay image could not be prepared");
            None
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum FetchError {
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error("body exceeds {limit} bytes")]
    TooLarge { limit: usize },
}

/// Download at most `limit` bytes; a larger body is abandoned, not truncated.
async fn fetch_bytes(
    client: &reqwest::Client,
    url: &str,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    let mut response = client.get(url).send().await?.error_for_status()?;
    if response
        .content_length()
        .is_some_and(|declared| declared > limit as u64)
    {
        return Err(FetchError::TooLarge { limit });
    }

    let mut bytes = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if bytes.len() + chunk.len() > limit {
            return Err(FetchError::TooLarge { limit });
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

/// Fill in `logo` and `image` on every chart series.
///
/// Each distinct URL is fetched once per report.
pub async fn attach_overlays(client: &reqwest::Client, charts: &mut [ChartSpec]) {
    let mut cache = OverlayCache::new();

    for chart in charts.iter_mut() {
        for series in chart.series.iter_mut() {
            if let Some(url) = series.logo_url.clone() {
                series.logo = cached_overlay(client, &mut cache, url, LOGO_CANVAS).await;
            }
            if let Some(url) = series.image_url.clone() {
                series.image = cached_overlay(client, &mut cache, url, PRODUCT_CANVAS).await;
            }
        }
    }
}

async fn cached_overlay(
    client: &reqwest::Client,
    cache: &mut OverlayCache,
    url: String,
    canvas: (u32, u32),
) -> Option<String> {
    let key = (url, canvas);
    if let Some(hit) = cache.get(&key) {
        return hit.clone();
    }
    let prepared = fetch_overlay(client, &key.0, canvas).await;
    cache.insert(key, prepared.clone());
    prepared
}
