use reqwest::{header, Client, StatusCode};

use super::MOBILE_UA;
use crate::error::ResolveError;

/// Fetches the watch-page HTML. Non-200 and empty bodies are hard failures;
/// downstream extraction has nothing to work with either way.
pub async fn fetch_html(client: &Client, url: &str) -> Result<String, ResolveError> {
    let response = client
        .get(url)
        .header(header::USER_AGENT, MOBILE_UA)
        .send()
        .await?;
    let status = response.status();
    let html = if status == StatusCode::OK {
        response.text().await?
    } else {
        String::new()
    };
    check_page(status, html)
}

fn check_page(status: StatusCode, html: String) -> Result<String, ResolveError> {
    if status != StatusCode::OK {
        return Err(ResolveError::UnexpectedStatus(status));
    }
    if html.is_empty() {
        return Err(ResolveError::EmptyPage);
    }
    Ok(html)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn non_200_is_unexpected_status() {
        let result = check_page(StatusCode::NOT_FOUND, String::new());
        assert!(matches!(
            result,
            Err(ResolveError::UnexpectedStatus(status)) if status == StatusCode::NOT_FOUND
        ));
    }

    #[test]
    fn empty_body_is_empty_page() {
        assert!(matches!(
            check_page(StatusCode::OK, String::new()),
            Err(ResolveError::EmptyPage)
        ));
    }

    #[test]
    fn ok_page_passes_through() {
        let html = check_page(StatusCode::OK, "<html>video page</html>".into()).unwrap();
        assert_eq!(html, "<html>video page</html>");
    }
}
