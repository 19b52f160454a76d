use std::collections::HashMap;

use crate::domain::ProjectIdentity;

/// Token replaced with the project's directory name (or, in the manifest
/// and Go sources, its module identity).
pub const APP_NAME_TOKEN: &str = "${APP_NAME}";

/// Token replaced with the freshly generated application secret.
pub const KEY_TOKEN: &str = "${KEY}";

/// Length of the generated application secret, in generator symbols.
pub const SECRET_LENGTH: usize = 32;

/// Mapping from placeholder token to replacement value.
///
/// Keys are unique; inserting an existing token replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderMap {
    entries: HashMap<String, String>,
}

impl PlaceholderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The map used for the environment file: `${APP_NAME}` is the
    /// directory name and `${KEY}` the given secret.
    pub fn for_project(identity: &ProjectIdentity, secret: impl Into<String>) -> Self {
        Self::new()
            .with(APP_NAME_TOKEN, identity.directory_name())
            .with(KEY_TOKEN, secret)
    }

    /// The map used for the manifest and sources: `${APP_NAME}` is the
    /// module identity.
    pub fn for_module(identity: &ProjectIdentity) -> Self {
        Self::new().with(APP_NAME_TOKEN, identity.module_identity())
    }

    /// Insert a token, returning the value it replaced.
    pub fn insert(&mut self, token: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(token.into(), value.into())
    }

    pub fn with(mut self, token: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(token, value);
        self
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace every literal occurrence of every known token.
    ///
    /// The text is scanned once, so a replacement value is never itself
    /// re-scanned for tokens. Where two tokens start at the same position
    /// the longer one wins. Tokens absent from the map are left untouched.
    pub fn render(&self, text: &str) -> String {
        let mut tokens: Vec<(&str, &str)> = self
            .entries
            .iter()
            .filter(|(token, _)| !token.is_empty())
            .map(|(token, value)| (token.as_str(), value.as_str()))
            .collect();
        tokens.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        'scan: while !rest.is_empty() {
            for (token, value) in &tokens {
                if let Some(tail) = rest.strip_prefix(token) {
                    out.push_str(value);
                    rest = tail;
                    continue 'scan;
                }
            }

            let mut chars = rest.chars();
            let Some(ch) = chars.next() else { break };
            out.push(ch);
            rest = chars.as_str();
        }

        out
    }
}
