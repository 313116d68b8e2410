use thiserror::Error;
use voyage_core::SessionError;

#[derive(Debug, Error)]
pub enum SocialError {
    #[error("request timed out after {0} seconds")]
    TimedOut(u64),
    #[error("{}", status_message(.status, .detail))]
    Status { status: u16, detail: Option<String> },
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("unexpected response from backend: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("invalid backend url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl SocialError {
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::TimedOut(timeout_secs)
        } else if err.is_decode() {
            Self::Decode(err)
        } else {
            Self::Network(err)
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::TimedOut(_))
    }

    /// Alert text for a failed user action, e.g. `user_message("create post")`.
    pub fn user_message(&self, action: &str) -> String {
        match self {
            Self::TimedOut(secs) => format!(
                "Failed to {action}. Request timed out after {secs} seconds. \
                 The backend may be sleeping. Please try again in a moment."
            ),
            Self::Session(err) => err.to_string(),
            other => format!("Failed to {action}. {other}"),
        }
    }
}

fn status_message(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(detail) if !detail.trim().is_empty() => detail.to_string(),
        _ => format!("HTTP error! status: {status}"),
    }
}

#[cfg(test)]
mod tests {
    use voyage_core::ProfileAction;

    use super::*;

    #[test]
    fn timeout_message_mentions_sleeping_backend() {
        assert_eq!(
            SocialError::TimedOut(60).user_message("create post"),
            "Failed to create post. Request timed out after 60 seconds. \
             The backend may be sleeping. Please try again in a moment."
        );
    }

    #[test]
    fn status_prefers_backend_detail() {
        let with_detail = SocialError::Status {
            status: 422,
            detail: Some("caption must not be empty".to_string()),
        };
        assert_eq!(
            with_detail.user_message("create post"),
            "Failed to create post. caption must not be empty"
        );

        let bare = SocialError::Status {
            status: 503,
            detail: None,
        };
        assert_eq!(bare.user_message("like post"), "Failed to like post. HTTP error! status: 503");
    }

    #[test]
    fn missing_profile_is_passed_through() {
        let err = SocialError::from(SessionError::ProfileNotLoaded(ProfileAction::Follow));
        assert_eq!(
            err.user_message("follow user"),
            "Please wait for your profile to load before following users."
        );
    }
}
