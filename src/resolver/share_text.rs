use once_cell::sync::Lazy;
use regex::Regex;

/// Localized phrases Douyin prepends to copied share messages.
static SHARE_PHRASE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"复制打开抖音|打开抖音|抖音视频").unwrap());

static SHARE_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"https?://[^\s<>"]+?(?:douyin\.com|iesdouyin\.com)[^\s<>"]*"#).unwrap()
});

/// Pulls the first Douyin share URL out of free-form chat text.
///
/// Either the share phrase or the URL pattern is enough to treat the message
/// as a share, but the phrase alone does not guarantee an extractable URL.
pub fn share_url(text: &str) -> Option<&str> {
    if SHARE_PHRASE_RE.is_match(text) || SHARE_URL_RE.is_match(text) {
        SHARE_URL_RE.find(text).map(|m| m.as_str())
    } else {
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn extracts_url_from_share_message() {
        let text = "复制打开抖音 https://v.douyin.com/abc123/";
        assert_eq!(share_url(text), Some("https://v.douyin.com/abc123/"));
    }

    #[test]
    fn extracts_url_from_full_share_blurb() {
        let text = "7.43 复制打开抖音，看看【蹄哥我挺爱的作品】# 美食测评 奇葩水果合集  \
                    https://v.douyin.com/pUWAq_V_16Q/ R@x.fB 07/03 FuF:/";
        assert_eq!(share_url(text), Some("https://v.douyin.com/pUWAq_V_16Q/"));
    }

    #[test]
    fn bare_url_without_phrase_matches() {
        let text = "check this out https://www.iesdouyin.com/share/video/123";
        assert_eq!(
            share_url(text),
            Some("https://www.iesdouyin.com/share/video/123")
        );
    }

    #[test]
    fn first_url_wins() {
        let text = "https://v.douyin.com/first/ and https://v.douyin.com/second/";
        assert_eq!(share_url(text), Some("https://v.douyin.com/first/"));
    }

    #[test]
    fn phrase_without_url_yields_none() {
        assert_eq!(share_url("打开抖音，看看这个作品"), None);
    }

    #[test]
    fn unrelated_text_yields_none() {
        assert_eq!(share_url("hello https://example.com/video"), None);
    }
}
