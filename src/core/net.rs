// src/core/net.rs
// Blocking HTTPS GET. One shot, no retry: a failed load is surfaced immediately.

use std::time::Duration;

use crate::config::consts::{HTTP_TIMEOUT_SECS, USER_AGENT};
use crate::error::{Error, Result};

/// GET `url` and return the body as text.
///
/// Any non-2xx status is an [`Error::Fetch`]; connection and TLS problems are
/// [`Error::Http`].
pub fn http_get(url: &str) -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build()?;

    logf!("HTTP GET {url}");
    let resp = client
        .get(url)
        .header(reqwest::header::CACHE_CONTROL, "no-cache")
        .send()?;

    let status = resp.status();
    if !status.is_success() {
        loge!("HTTP {} for {url}", status);
        return Err(Error::Fetch { url: s!(url), status: status.as_u16() });
    }

    let body = resp.text()?;
    logd!("HTTP GET {url}: {} bytes", body.len());
    Ok(body)
}
