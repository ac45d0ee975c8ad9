//! Credential Source Port - where the gateway obtains the active API key.

use secrecy::Secret;

/// Supplies the credential to use for the next language model call.
pub trait CredentialSource: Send + Sync {
    /// The active key, or `None` when nothing is configured.
    fn current(&self) -> Option<Secret<String>>;
}

/// Fixed credential, mainly for tests and one-off tools.
pub struct StaticCredential(Option<String>);

impl StaticCredential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(Some(key.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl CredentialSource for StaticCredential {
    fn current(&self) -> Option<Secret<String>> {
        self.0.clone().map(Secret::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn static_credential_yields_key() {
        let source = StaticCredential::new("abc");
        assert_eq!(source.current().unwrap().expose_secret(), "abc");
        assert!(StaticCredential::none().current().is_none());
    }
}
