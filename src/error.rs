use std::error::Error;
use std::fmt::Display;

use reqwest::StatusCode;

/// Everything that can go wrong between a pasted share message and a playable
/// video address. `Display` output is safe to show to the user as-is.
#[derive(Debug)]
pub enum ResolveError {
    NoUrlFound,
    Network(reqwest::Error),
    UnexpectedStatus(StatusCode),
    EmptyPage,
    NoCandidates,
    NoPreferredCandidate,
    NoFinalAddress,
    DownloadTimeout,
    EmptyDownload,
}

impl Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoUrlFound => write!(f, "No Douyin share link found in message"),
            Self::Network(e) => write!(f, "Network request failed: {}", e),
            Self::UnexpectedStatus(status) => {
                write!(f, "Unexpected response status: {}", status)
            }
            Self::EmptyPage => write!(f, "Share page was empty"),
            Self::NoCandidates => write!(f, "No video address found in share page"),
            Self::NoPreferredCandidate => write!(f, "No usable video source link found"),
            Self::NoFinalAddress => write!(f, "Could not determine final video address"),
            Self::DownloadTimeout => write!(f, "Video download timed out"),
            Self::EmptyDownload => write!(f, "Video download returned no data"),
        }
    }
}

impl Error for ResolveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Network(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ResolveError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_is_user_facing() {
        assert_eq!(
            ResolveError::NoCandidates.to_string(),
            "No video address found in share page"
        );
        assert_eq!(
            ResolveError::UnexpectedStatus(StatusCode::NOT_FOUND).to_string(),
            "Unexpected response status: 404 Not Found"
        );
    }
}
