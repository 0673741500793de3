//! Authenticated dispatch core.
//!
//! One shared dispatch pattern instantiated per intent: validate the input,
//! join the endpoint onto the resolved base, resolve a credential when the
//! intent requires one, hand the assembled request to the transport, and
//! fold every failure into a fault envelope. No error or panic crosses the
//! public operations.

use crate::validate::record_is_complete;
use crate::{
    Error, GatewayConfig, Result, SessionContext, TokenVerifier, Transport, TransportRequest,
};

use authgate_api::{
    ChangePasswordInput, FaultEnvelope, ForgetPasswordInput, Intent, LoginInput, Outcome,
    RegisterInput, ResetPasswordInput, UpdateAccountInput,
};
use serde::Serialize;
use serde_json::Value;

/// The auth dispatch core.
///
/// Constructed from an explicit [`GatewayConfig`]; the active base URL is
/// resolved once here, not per call. Holds no session state — credentials
/// are derived fresh from the [`SessionContext`] on every
/// credential-requiring dispatch.
pub struct AuthGateway<T, V> {
    base: String,
    transport: T,
    verifier: V,
}

impl<T: Transport, V: TokenVerifier> AuthGateway<T, V> {
    pub fn new(config: GatewayConfig, transport: T, verifier: V) -> Self {
        Self {
            base: config.base_url().to_string(),
            transport,
            verifier,
        }
    }

    /// The resolved base URL this gateway dispatches against.
    pub fn base_url(&self) -> &str {
        &self.base
    }

    // ── Anonymous operations ────────────────────────────────────────────

    pub async fn register(&self, input: &RegisterInput) -> Outcome {
        self.dispatch(Intent::Register, Some(input), &SessionContext::anonymous())
            .await
    }

    pub async fn login(&self, input: &LoginInput) -> Outcome {
        self.dispatch(Intent::Login, Some(input), &SessionContext::anonymous())
            .await
    }

    pub async fn forget_password(&self, input: &ForgetPasswordInput) -> Outcome {
        self.dispatch(
            Intent::ForgetPassword,
            Some(input),
            &SessionContext::anonymous(),
        )
        .await
    }

    pub async fn resend_forget_password(&self, input: &ForgetPasswordInput) -> Outcome {
        self.dispatch(
            Intent::ResendForgetPassword,
            Some(input),
            &SessionContext::anonymous(),
        )
        .await
    }

    pub async fn reset_password(&self, input: &ResetPasswordInput) -> Outcome {
        self.dispatch(
            Intent::ResetPassword,
            Some(input),
            &SessionContext::anonymous(),
        )
        .await
    }

    // ── Credential-bearing operations ───────────────────────────────────

    pub async fn logout(&self, session: &SessionContext) -> Outcome {
        self.dispatch::<()>(Intent::Logout, None, session).await
    }

    pub async fn change_password(
        &self,
        session: &SessionContext,
        input: &ChangePasswordInput,
    ) -> Outcome {
        self.dispatch(Intent::ChangePassword, Some(input), session)
            .await
    }

    pub async fn update_account(
        &self,
        session: &SessionContext,
        input: &UpdateAccountInput,
    ) -> Outcome {
        self.dispatch(Intent::UpdateAccount, Some(input), session)
            .await
    }

    // ── Shared dispatch ─────────────────────────────────────────────────

    async fn dispatch<R: Serialize>(
        &self,
        intent: Intent,
        input: Option<&R>,
        session: &SessionContext,
    ) -> Outcome {
        if let Some(input) = input {
            if !record_is_complete(input) {
                tracing::debug!(intent = intent.name(), "incomplete input, dispatch rejected");
                return Outcome::Rejected;
            }
        }

        match self.try_dispatch(intent, input, session).await {
            Ok(body) => Outcome::Success(body),
            Err(err) => {
                tracing::error!(intent = intent.name(), error = %err, "dispatch failed");
                Outcome::Fault(FaultEnvelope::new(fault_message(&err, intent)))
            }
        }
    }

    async fn try_dispatch<R: Serialize>(
        &self,
        intent: Intent,
        input: Option<&R>,
        session: &SessionContext,
    ) -> Result<Value> {
        let url = join_endpoint(&self.base, intent.path());

        // Credential failures share the fault boundary with transport
        // failures; the transport is never reached without one.
        let bearer = if intent.requires_credential() {
            let token = session.token().ok_or(Error::MissingToken)?;
            Some(self.verifier.verify(token)?.bearer())
        } else {
            None
        };

        let body = match input {
            Some(input) if intent.has_body() => Some(serde_json::to_value(input)?),
            _ => None,
        };

        self.transport
            .send(TransportRequest {
                url,
                method: intent.verb(),
                bearer,
                body,
                no_store: true,
            })
            .await
    }
}

fn join_endpoint(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn fault_message(err: &Error, intent: Intent) -> String {
    let message = err.to_string();
    if message.is_empty() {
        intent.fallback_message().to_string()
    } else {
        message
    }
}
