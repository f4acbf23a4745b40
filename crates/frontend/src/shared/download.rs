//! Browser download trigger for server-generated files.

use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::HtmlAnchorElement;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Download failed: {0}")]
pub struct DownloadError(pub String);

/// Start a download of `href` under the suggested `file_name` via a
/// temporary hidden anchor.
pub fn download_url(href: &str, file_name: &str) -> Result<(), DownloadError> {
    let window = web_sys::window().ok_or_else(|| DownloadError("No window object".into()))?;
    let document = window
        .document()
        .ok_or_else(|| DownloadError("No document object".into()))?;
    let body = document
        .body()
        .ok_or_else(|| DownloadError("No body element".into()))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| DownloadError(format!("Failed to create anchor: {:?}", e)))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| DownloadError(format!("Failed to cast to anchor: {:?}", e)))?;

    anchor.set_href(href);
    anchor.set_download(file_name);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| DownloadError(format!("Failed to set style: {:?}", e)))?;

    body.append_child(&anchor)
        .map_err(|e| DownloadError(format!("Failed to append anchor: {:?}", e)))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| DownloadError(format!("Failed to remove anchor: {:?}", e)))?;

    log::info!("Download started: {}", file_name);
    Ok(())
}
