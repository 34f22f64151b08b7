use std::future::Future;

use reqwest::{header, Client, Response, StatusCode};

use super::{host_matches, MOBILE_UA, PREFERRED_CDN};
use crate::error::ResolveError;

pub const MAX_HOPS: usize = 3;

/// What one response means for the redirect chase.
#[derive(Debug, PartialEq, Eq)]
enum Hop {
    Advance(String),
    Stop,
}

/// A 302 whose Location stays on the preferred CDN advances the chase. A 302
/// leaving the domain means the terminal asset host has been reached, and any
/// non-302 means the current URL already is final.
fn next_hop(status: StatusCode, location: Option<&str>) -> Hop {
    if status != StatusCode::FOUND {
        return Hop::Stop;
    }
    match location {
        Some(next) if host_matches(next, PREFERRED_CDN) => Hop::Advance(next.to_string()),
        _ => Hop::Stop,
    }
}

/// Follows the share short-link through its single 302 hop to the canonical
/// watch-page URL. Anything other than a 302 means `url` already is the page.
/// No User-Agent is sent here; the short-link host does not care.
pub async fn resolve_one_hop(client: &Client, url: &str) -> Result<String, ResolveError> {
    let response = client.get(url).send().await?;
    if response.status() == StatusCode::FOUND {
        if let Some(location) = location_header(&response) {
            return Ok(location);
        }
    }
    Ok(url.to_string())
}

/// Chases redirects on the selected play address, at most `max_hops` times.
/// The pre-redirect URL is final whenever the chain stops.
pub async fn chase(
    client: &Client,
    candidate: &str,
    max_hops: usize,
) -> Result<String, ResolveError> {
    chase_with(candidate, max_hops, |url| async move {
        let response = client
            .get(&url)
            .header(header::USER_AGENT, MOBILE_UA)
            .send()
            .await?;
        let location = location_header(&response);
        Ok((response.status(), location))
    })
    .await
}

async fn chase_with<F, Fut>(
    candidate: &str,
    max_hops: usize,
    mut fetch: F,
) -> Result<String, ResolveError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<(StatusCode, Option<String>), ResolveError>>,
{
    let mut current = candidate.to_string();
    for _ in 0..max_hops {
        let (status, location) = fetch(current.clone()).await?;
        match next_hop(status, location.as_deref()) {
            Hop::Advance(next) => current = next,
            Hop::Stop => break,
        }
    }
    if current.is_empty() {
        return Err(ResolveError::NoFinalAddress);
    }
    Ok(current)
}

fn location_header(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
