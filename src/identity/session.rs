//! Current-identity context.
//!
//! The identity of whoever is acting is an explicit value handed to the
//! operations that need it. There is no process-wide session state.

use serde::{Deserialize, Serialize};

use crate::error::AliasError;
use crate::identity::alias::generate_alias;

/// How the identity provider knows this user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum IdentityKind {
    Anonymous,
    Registered {
        #[serde(rename = "emailVerified")]
        email_verified: bool,
    },
}

/// The signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: String,
    pub email: Option<String>,
    pub kind: IdentityKind,
}

impl Identity {
    pub fn anonymous(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            email: None,
            kind: IdentityKind::Anonymous,
        }
    }

    pub fn registered(user_id: &str, email: &str, email_verified: bool) -> Self {
        Self {
            user_id: user_id.to_string(),
            email: Some(email.to_string()),
            kind: IdentityKind::Registered { email_verified },
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self.kind, IdentityKind::Anonymous)
    }

    /// Editing and deleting own reports is reserved for verified accounts.
    pub fn can_manage_reports(&self) -> bool {
        matches!(self.kind, IdentityKind::Registered { email_verified: true })
    }

    /// Linking an anonymous account to an email keeps the user id, so the
    /// alias and report history survive the upgrade.
    pub fn upgraded(&self, email: &str) -> Self {
        Self::registered(&self.user_id, email, false)
    }

    pub fn alias(&self) -> Result<String, AliasError> {
        generate_alias(&self.user_id)
    }
}

/// Error codes returned by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthErrorCode {
    InvalidEmail,
    UserDisabled,
    UserNotFound,
    WrongPassword,
    EmailAlreadyInUse,
    TooManyRequests,
    Other(String),
}

impl AuthErrorCode {
    pub fn parse(code: &str) -> Self {
        match code {
            "auth/invalid-email" => Self::InvalidEmail,
            "auth/user-disabled" => Self::UserDisabled,
            "auth/user-not-found" => Self::UserNotFound,
            "auth/wrong-password" => Self::WrongPassword,
            "auth/email-already-in-use" => Self::EmailAlreadyInUse,
            "auth/too-many-requests" => Self::TooManyRequests,
            other => Self::Other(other.to_string()),
        }
    }

    /// Key into the login-form error dictionary.
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "invalidEmail",
            Self::UserDisabled => "userDisabled",
            Self::UserNotFound => "userNotFound",
            Self::WrongPassword => "wrongPassword",
            Self::EmailAlreadyInUse => "emailInUse",
            Self::TooManyRequests => "tooManyRequests",
            Self::Other(_) => "default",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upgrade_keeps_alias() {
        let anon = Identity::anonymous("uid-abc");
        let upgraded = anon.upgraded("vecino@example.com");

        assert!(anon.is_anonymous());
        assert!(!upgraded.is_anonymous());
        assert_eq!(anon.alias().unwrap(), upgraded.alias().unwrap());
    }

    #[test]
    fn test_report_management_requires_verified_email() {
        assert!(!Identity::anonymous("a").can_manage_reports());
        assert!(!Identity::registered("a", "a@example.com", false).can_manage_reports());
        assert!(Identity::registered("a", "a@example.com", true).can_manage_reports());
    }

    #[test]
    fn test_auth_error_codes() {
        assert_eq!(AuthErrorCode::parse("auth/wrong-password"), AuthErrorCode::WrongPassword);
        assert_eq!(AuthErrorCode::parse("auth/email-already-in-use").message_key(), "emailInUse");
        assert_eq!(
            AuthErrorCode::parse("auth/network-request-failed"),
            AuthErrorCode::Other("auth/network-request-failed".to_string())
        );
        assert_eq!(AuthErrorCode::parse("").message_key(), "default");
    }

    #[test]
    fn test_identity_serialization() {
        let identity = Identity::registered("uid-1", "a@example.com", true);
        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json["userId"], "uid-1");
        assert_eq!(json["kind"]["type"], "registered");
        assert_eq!(json["kind"]["emailVerified"], true);
    }
}
