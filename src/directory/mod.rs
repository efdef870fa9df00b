pub mod filter;
pub mod ldap;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::Result;

pub use self::ldap::LdapDirectory;

/// An entry returned by a directory search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub dn: String,
    pub attrs: HashMap<String, Vec<String>>,
}

impl DirectoryEntry {
    pub fn new(dn: impl Into<String>) -> Self {
        Self {
            dn: dn.into(),
            attrs: HashMap::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.entry(name.into()).or_default().push(value.into());
        self
    }

    /// First value of `name`. Attribute names compare case-insensitively,
    /// as AD echoes its own casing (`sAMAccountName`) regardless of the request.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .and_then(|(_, values)| values.first())
            .map(String::as_str)
    }
}

/// Opens authenticated sessions against a directory server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Directory: Send + Sync {
    /// Connects and binds with the configured service credentials.
    async fn connect(&self) -> Result<Box<dyn DirectorySession>>;
}

/// A single bound connection. Sessions are used for one operation and then unbound.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectorySession: Send {
    /// Subtree search below `base`.
    async fn search(
        &mut self,
        base: &str,
        filter: &str,
        attrs: Vec<String>,
    ) -> Result<Vec<DirectoryEntry>>;

    /// Replaces `attr` on `dn` with a single value. Returns whether the
    /// server answered with a success result code.
    async fn modify_replace(&mut self, dn: &str, attr: &str, value: &str) -> Result<bool>;

    async fn unbind(&mut self) -> Result<()>;
}
