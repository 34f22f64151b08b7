use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static DESC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#""desc":\s*"([^"]+)""#).unwrap());
static NICKNAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#""nickname":\s*"([^"]+)""#).unwrap());
static COVER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""cover":\s*\{\s*"url_list":\s*\[\s*"([^"]+)"\s*\]\s*\}"#).unwrap());

#[derive(Debug, Clone, Default, Serialize)]
pub struct VideoMetadata {
    pub title: String,
    pub author: String,
    #[serde(rename = "cover")]
    pub cover_url: String,
}

/// Best-effort scrape of title, author, and cover image from the watch page.
/// Each field independently falls back to empty; this never fails.
pub fn extract_metadata(html: &str) -> VideoMetadata {
    let field = |re: &Regex| {
        re.captures(html)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    };
    VideoMetadata {
        title: field(&DESC_RE),
        author: field(&NICKNAME_RE),
        cover_url: field(&COVER_RE),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn extracts_all_fields() {
        let html = r#"{"desc": "奇葩水果合集","author":{"nickname": "蹄哥"},"video":{"cover": {"url_list": ["https://p3.douyinpic.com/cover.jpeg"]}}}"#;
        let metadata = extract_metadata(html);
        assert_eq!(metadata.title, "奇葩水果合集");
        assert_eq!(metadata.author, "蹄哥");
        assert_eq!(metadata.cover_url, "https://p3.douyinpic.com/cover.jpeg");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let metadata = extract_metadata("<html>no embedded json</html>");
        assert_eq!(metadata.title, "");
        assert_eq!(metadata.author, "");
        assert_eq!(metadata.cover_url, "");
    }

    #[test]
    fn fields_are_independent() {
        let metadata = extract_metadata(r#""nickname": "蹄哥""#);
        assert_eq!(metadata.title, "");
        assert_eq!(metadata.author, "蹄哥");
        assert_eq!(metadata.cover_url, "");
    }
}
