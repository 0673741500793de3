use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One named authentication operation with a fixed path, verb, and
/// credential requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Register,
    Login,
    Logout,
    ChangePassword,
    ForgetPassword,
    ResendForgetPassword,
    ResetPassword,
    UpdateAccount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Post,
    Patch,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Post => "POST",
            Verb::Patch => "PATCH",
        }
    }
}

impl Intent {
    pub const ALL: [Intent; 8] = [
        Intent::Register,
        Intent::Login,
        Intent::Logout,
        Intent::ChangePassword,
        Intent::ForgetPassword,
        Intent::ResendForgetPassword,
        Intent::ResetPassword,
        Intent::UpdateAccount,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Intent::Register => "register",
            Intent::Login => "login",
            Intent::Logout => "logout",
            Intent::ChangePassword => "change_password",
            Intent::ForgetPassword => "forget_password",
            Intent::ResendForgetPassword => "resend_forget_password",
            Intent::ResetPassword => "reset_password",
            Intent::UpdateAccount => "update_account",
        }
    }

    /// Endpoint path relative to the gateway base URL.
    pub fn path(self) -> &'static str {
        match self {
            Intent::Register => "/api/auth/register",
            Intent::Login => "/api/auth/login",
            Intent::Logout => "/api/auth/logout",
            Intent::ChangePassword => "/api/auth/changepassword",
            Intent::ForgetPassword => "/api/auth/forgetpassword",
            Intent::ResendForgetPassword => "/api/auth/resendforgetpassword",
            Intent::ResetPassword => "/api/auth/resetpassword",
            Intent::UpdateAccount => "/api/auth/account",
        }
    }

    pub fn verb(self) -> Verb {
        match self {
            Intent::UpdateAccount => Verb::Patch,
            _ => Verb::Post,
        }
    }

    /// True for intents that must carry a bearer credential.
    pub fn requires_credential(self) -> bool {
        matches!(
            self,
            Intent::Logout | Intent::ChangePassword | Intent::UpdateAccount
        )
    }

    /// Logout is the only intent dispatched without a request body.
    pub fn has_body(self) -> bool {
        !matches!(self, Intent::Logout)
    }

    /// Fault message used when a failure carries no description of its own.
    pub fn fallback_message(self) -> &'static str {
        match self {
            Intent::Register => "Registration Service Error",
            Intent::Login => "Login Service Error",
            Intent::Logout => "Logout Service Error",
            Intent::ChangePassword => "Change password Service Error",
            Intent::ForgetPassword | Intent::ResendForgetPassword => {
                "Forget password Service Error"
            }
            Intent::ResetPassword => "Reset password Service Error",
            Intent::UpdateAccount => "Update user Service Error",
        }
    }
}

// ─── Input records ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordInput {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgetPasswordInput {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordInput {
    pub token: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAccountInput {
    pub name: String,
    pub email: String,
}

// ─── Outcomes ───────────────────────────────────────────────────────────────

/// Normalized result of one dispatch.
///
/// `Success` carries the backend-decoded body verbatim, including
/// backend-reported failures (e.g. a 4xx JSON payload) — those are not
/// re-shaped into a [`FaultEnvelope`], so callers branching on failure must
/// check both shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Backend body, returned as-is.
    Success(Value),
    /// Locally-constructed failure (transport, decode, or credential).
    Fault(FaultEnvelope),
    /// Input record had an empty field; nothing was dispatched.
    Rejected,
}

impl Outcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected)
    }

    pub fn success(&self) -> Option<&Value> {
        match self {
            Outcome::Success(v) => Some(v),
            _ => None,
        }
    }

    pub fn fault(&self) -> Option<&FaultEnvelope> {
        match self {
            Outcome::Fault(f) => Some(f),
            _ => None,
        }
    }
}

/// Uniform locally-constructed failure shape:
/// `{ "data": { "status": false, "message": "..." } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaultEnvelope {
    pub data: FaultBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaultBody {
    pub status: bool,
    pub message: String,
}

impl FaultEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            data: FaultBody {
                status: false,
                message: message.into(),
            },
        }
    }

    pub fn message(&self) -> &str {
        &self.data.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_table() {
        for intent in Intent::ALL {
            assert!(intent.path().starts_with("/api/auth/"));
        }
        assert_eq!(Intent::UpdateAccount.verb(), Verb::Patch);
        assert_eq!(Intent::Register.verb(), Verb::Post);
        assert_eq!(Verb::Post.as_str(), "POST");
        assert_eq!(Verb::Patch.as_str(), "PATCH");

        let credentialed: Vec<Intent> = Intent::ALL
            .into_iter()
            .filter(|i| i.requires_credential())
            .collect();
        assert_eq!(
            credentialed,
            vec![Intent::Logout, Intent::ChangePassword, Intent::UpdateAccount]
        );

        assert!(!Intent::Logout.has_body());
        assert!(Intent::ChangePassword.has_body());
    }

    #[test]
    fn fault_envelope_wire_shape() {
        let fault = FaultEnvelope::new("timeout");
        let json = serde_json::to_value(&fault).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "data": { "status": false, "message": "timeout" } })
        );
    }

    #[test]
    fn inputs_serialize_camel_case() {
        let input = ChangePasswordInput {
            old_password: "a".into(),
            new_password: "b".into(),
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "oldPassword": "a", "newPassword": "b" })
        );

        let reset = ResetPasswordInput {
            token: "t".into(),
            new_password: "n".into(),
        };
        let json = serde_json::to_value(&reset).unwrap();
        assert_eq!(json["newPassword"], "n");
    }
}
