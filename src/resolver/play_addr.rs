use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use super::{host_matches, PREFERRED_CDN};
use crate::error::ResolveError;

/// The page embeds exactly one primary `play_addr` block in the observed
/// format; only its `url_list` contents are of interest.
static PLAY_ADDR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""play_addr":\s*\{\s*"uri":\s*"[^"]*",\s*"url_list":\s*\[([^\]]*)\]"#).unwrap()
});

/// Extracts the decoded, watermark-free play address candidates from the
/// watch-page HTML, in document order. A candidate whose escape sequences
/// fail to decode is dropped; only an entirely unusable list is an error.
pub fn extract_candidates(html: &str) -> Result<Vec<String>, ResolveError> {
    let captures = PLAY_ADDR_RE
        .captures(html)
        .ok_or(ResolveError::NoCandidates)?;
    let url_list = captures.get(1).unwrap().as_str();
    let candidates: Vec<String> = url_list
        .split(',')
        .map(|element| element.trim().trim_matches('"'))
        .filter(|element| !element.is_empty())
        .filter_map(unescape)
        .map(|url| strip_watermark(&url))
        .collect();
    if candidates.is_empty() {
        return Err(ResolveError::NoCandidates);
    }
    Ok(candidates)
}

/// First candidate hosted on the preferred CDN wins.
pub fn select_preferred(candidates: &[String]) -> Result<&str, ResolveError> {
    candidates
        .iter()
        .find(|url| host_matches(url, PREFERRED_CDN))
        .map(String::as_str)
        .ok_or(ResolveError::NoPreferredCandidate)
}

/// Rewrites the first `playwm` path segment to `play`, selecting the
/// watermark-free variant of the same asset. Query parameters are untouched.
fn strip_watermark(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };
    let mut replaced = false;
    let path = parsed
        .path()
        .split('/')
        .map(|segment| {
            if !replaced && segment == "playwm" {
                replaced = true;
                "play"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/");
    parsed.set_path(&path);
    parsed.to_string()
}

/// Decodes the backslash escapes the JSON embedding applies (`\/`, `\uXXXX`
/// including surrogate pairs, and the usual single-character escapes).
/// Returns None on a malformed sequence.
fn unescape(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'u' => out.push(unescape_unicode(&mut chars)?),
            '/' => out.push('/'),
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            other => {
                // Unknown escapes pass through verbatim
                out.push('\\');
                out.push(other);
            }
        }
    }
    Some(out)
}

fn unescape_unicode(chars: &mut std::str::Chars) -> Option<char> {
    let high = code_unit(chars)?;
    if !(0xD800..=0xDBFF).contains(&high) {
        return char::from_u32(high);
    }
    // High surrogate, the low half must follow as another \uXXXX
    if chars.next()? != '\\' || chars.next()? != 'u' {
        return None;
    }
    let low = code_unit(chars)?;
    if !(0xDC00..=0xDFFF).contains(&low) {
        return None;
    }
    char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))
}

fn code_unit(chars: &mut std::str::Chars) -> Option<u32> {
    let mut value = 0;
    for _ in 0..4 {
        value = value * 16 + chars.next()?.to_digit(16)?;
    }
    Some(value)
}
