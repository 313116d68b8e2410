use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identity handed over by the external sign-in provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalIdentity {
    pub external_id: String,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub profile_image_url: Option<String>,
}

/// Signed-in traveller, resolved to the backend's own user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub user_id: String,
    pub username: String,
    pub display_name: String,
}

impl UserSession {
    pub fn from_identity(user_id: impl Into<String>, identity: &ExternalIdentity) -> Self {
        Self {
            user_id: user_id.into(),
            username: identity.username.clone(),
            display_name: identity.display_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileAction {
    Like,
    Save,
    Follow,
    Post,
    ViewSaved,
    SaveTrip,
}

impl ProfileAction {
    pub fn gerund(self) -> &'static str {
        match self {
            Self::Like => "liking posts",
            Self::Save => "saving posts",
            Self::Follow => "following users",
            Self::Post => "creating posts",
            Self::ViewSaved => "viewing saved posts",
            Self::SaveTrip => "saving trips",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Please wait for your profile to load before {}.", .0.gerund())]
    ProfileNotLoaded(ProfileAction),
}

#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    current: Option<UserSession>,
}

impl SessionContext {
    pub fn signed_in(session: UserSession) -> Self {
        Self {
            current: Some(session),
        }
    }

    pub fn sign_in(&mut self, session: UserSession) {
        self.current = Some(session);
    }

    pub fn sign_out(&mut self) -> Option<UserSession> {
        self.current.take()
    }

    pub fn current(&self) -> Option<&UserSession> {
        self.current.as_ref()
    }

    pub fn require(&self, action: ProfileAction) -> Result<&UserSession, SessionError> {
        self.current
            .as_ref()
            .ok_or(SessionError::ProfileNotLoaded(action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_reports_pending_profile() {
        let context = SessionContext::default();
        let err = context.require(ProfileAction::Follow).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please wait for your profile to load before following users."
        );
    }

    #[test]
    fn sign_in_then_out() {
        let mut context = SessionContext::default();
        context.sign_in(UserSession {
            user_id: "u-1".to_string(),
            username: "maria".to_string(),
            display_name: "Maria".to_string(),
        });
        assert_eq!(context.require(ProfileAction::Like).unwrap().user_id, "u-1");
        assert!(context.sign_out().is_some());
        assert!(context.current().is_none());
    }
}
