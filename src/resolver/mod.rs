mod metadata;
mod page;
mod play_addr;
mod redirect;
mod share_text;

use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Serialize;
use url::Url;

use crate::error::ResolveError;

pub use metadata::VideoMetadata;

/// Stable CDN host that issues signed, directly-downloadable asset URLs.
pub static PREFERRED_CDN: &str = "aweme.snssdk.com";

/// Douyin serves different (or no) markup to default client user agents.
static MOBILE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 14_0 like Mac OS X) \
     AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.0 Mobile/15E148 Safari/604.1";

// The short-link CDN chain presents certificates this client cannot validate,
// so verification is relaxed for the resolution hops only. The media download
// in `downloader` uses a fully verifying client. Redirects are followed by
// hand, never by the client itself.
static RESOLVE_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .use_rustls_tls()
        .danger_accept_invalid_certs(true)
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(20))
        .build()
        .unwrap()
});

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedVideo {
    pub url: String,
    #[serde(flatten)]
    pub metadata: VideoMetadata,
}

/// Resolves a raw share message to a playable video address plus metadata.
pub async fn resolve(share_text: &str) -> Result<ResolvedVideo, ResolveError> {
    let share_url = share_text::share_url(share_text).ok_or(ResolveError::NoUrlFound)?;
    resolve_url(share_url).await
}

/// Resolves an already-extracted share URL.
///
/// Stages run strictly in order: one-hop short-link resolution, page fetch,
/// candidate extraction, bounded redirect chase. Metadata is scraped from the
/// same HTML and cannot fail.
pub async fn resolve_url(share_url: &str) -> Result<ResolvedVideo, ResolveError> {
    let client = &*RESOLVE_CLIENT;
    let page_url = redirect::resolve_one_hop(client, share_url).await?;
    let html = page::fetch_html(client, &page_url).await?;
    let metadata = metadata::extract_metadata(&html);
    let candidates = play_addr::extract_candidates(&html)?;
    let candidate = play_addr::select_preferred(&candidates)?;
    let url = redirect::chase(client, candidate, redirect::MAX_HOPS).await?;
    Ok(ResolvedVideo { url, metadata })
}

/// True when `url` parses and its host component contains `domain`.
fn host_matches(url: &str, domain: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.contains(domain)))
        .unwrap_or(false)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn host_match_is_on_host_only() {
        assert!(host_matches(
            "https://aweme.snssdk.com/aweme/v1/play/?x=1",
            PREFERRED_CDN
        ));
        assert!(!host_matches("https://other.cdn.com/y", PREFERRED_CDN));
        // Domain in the query string must not count
        assert!(!host_matches(
            "https://other.cdn.com/y?from=aweme.snssdk.com",
            PREFERRED_CDN
        ));
        assert!(!host_matches("not a url", PREFERRED_CDN));
    }
}
