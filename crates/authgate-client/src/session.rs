//! Session context.
//!
//! The session is an explicit argument to credential-bearing dispatches,
//! rather than an ambient cookie read inside the gateway. Callers decide
//! where the token comes from (cookie header, local store, test fixture).

/// A caller-supplied session, possibly carrying a raw token.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    token: Option<String>,
}

impl SessionContext {
    /// A session with no token. Credential-requiring dispatches fail
    /// against it.
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    /// A session carrying a raw (unverified) token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// A session built from a `Cookie` header, reading the named cookie.
    pub fn from_cookie_header(header: &str, cookie_name: &str) -> Self {
        Self {
            token: token_from_cookie_header(header, cookie_name),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

/// Extract a named cookie value from a `Cookie` request header.
///
/// Returns `None` when the cookie is absent or its value is empty.
pub fn token_from_cookie_header(header: &str, cookie_name: &str) -> Option<String> {
    for pair in header.split(';') {
        let Some((name, value)) = pair.trim().split_once('=') else {
            continue;
        };
        if name.trim() == cookie_name {
            let value = value.trim();
            if value.is_empty() {
                return None;
            }
            return Some(value.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_header_lookup() {
        let header = "theme=dark; token=abc.def.ghi; lang=en";
        assert_eq!(
            token_from_cookie_header(header, "token").as_deref(),
            Some("abc.def.ghi")
        );
        assert_eq!(token_from_cookie_header(header, "session"), None);
        assert_eq!(token_from_cookie_header("token=", "token"), None);
    }

    #[test]
    fn session_from_cookie_header() {
        let session = SessionContext::from_cookie_header("token=t1", "token");
        assert_eq!(session.token(), Some("t1"));

        let anon = SessionContext::anonymous();
        assert_eq!(anon.token(), None);
    }
}
