//! `ldap3`-backed directory client.
//!
//! Every `connect` opens a new connection, spawns its driver on the tokio
//! runtime and performs a simple bind with the service account.

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use ldap3::{Ldap, LdapConnAsync, LdapConnSettings, Mod, Scope, SearchEntry};
use tracing::{debug, warn};

use super::{Directory, DirectoryEntry, DirectorySession};
use crate::config::Config;
use crate::error::Result;

#[derive(Clone)]
pub struct LdapDirectory {
    url: String,
    bind_user: String,
    bind_password: String,
    starttls: bool,
    connect_timeout: Option<Duration>,
}

impl LdapDirectory {
    pub fn new(
        url: impl Into<String>,
        bind_user: impl Into<String>,
        bind_password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            bind_user: bind_user.into(),
            bind_password: bind_password.into(),
            starttls: false,
            connect_timeout: None,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            config.ldap_url()?,
            config.ldap_username.clone(),
            config.ldap_password.clone(),
        )
        .with_starttls(config.ldap_starttls)
        .with_connect_timeout(config.ldap_connect_timeout))
    }

    pub fn with_starttls(mut self, starttls: bool) -> Self {
        self.starttls = starttls;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn settings(&self) -> LdapConnSettings {
        let settings = LdapConnSettings::new().set_starttls(self.starttls);
        match self.connect_timeout {
            Some(timeout) => settings.set_conn_timeout(timeout),
            None => settings,
        }
    }
}

impl fmt::Debug for LdapDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LdapDirectory")
            .field("url", &self.url)
            .field("bind_user", &self.bind_user)
            .field("bind_password", &"<redacted>")
            .field("starttls", &self.starttls)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

#[async_trait]
impl Directory for LdapDirectory {
    async fn connect(&self) -> Result<Box<dyn DirectorySession>> {
        debug!(url = %self.url, starttls = self.starttls, "Connecting to directory server");

        let (conn, mut ldap) = LdapConnAsync::with_settings(self.settings(), &self.url).await?;
        ldap3::drive!(conn);

        ldap.simple_bind(&self.bind_user, &self.bind_password)
            .await?
            .success()?;
        debug!(user = %self.bind_user, "Directory bind succeeded");

        Ok(Box::new(LdapSession { ldap }))
    }
}

struct LdapSession {
    ldap: Ldap,
}

#[async_trait]
impl DirectorySession for LdapSession {
    async fn search(
        &mut self,
        base: &str,
        filter: &str,
        attrs: Vec<String>,
    ) -> Result<Vec<DirectoryEntry>> {
        debug!(base, filter, "Searching directory");

        let (rs, _res) = self
            .ldap
            .search(base, Scope::Subtree, filter, attrs)
            .await?
            .success()?;

        // AD answers subtree searches at a domain root with referrals
        Ok(rs
            .into_iter()
            .filter(|entry| !entry.is_ref())
            .map(SearchEntry::construct)
            .map(|entry| DirectoryEntry {
                dn: entry.dn,
                attrs: entry.attrs,
            })
            .collect())
    }

    async fn modify_replace(&mut self, dn: &str, attr: &str, value: &str) -> Result<bool> {
        let mods = vec![Mod::Replace(
            attr.to_string(),
            HashSet::from([value.to_string()]),
        )];
        let res = self.ldap.modify(dn, mods).await?;

        if res.rc != 0 {
            warn!(dn, attr, rc = res.rc, text = %res.text, "Directory rejected modify");
        }
        Ok(res.rc == 0)
    }

    async fn unbind(&mut self) -> Result<()> {
        self.ldap.unbind().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_the_bind_password() {
        let directory = LdapDirectory::new("ldaps://dc01.corp.example", "svc-unlock", "hunter2");
        let rendered = format!("{:?}", directory);
        assert!(rendered.contains("svc-unlock"));
        assert!(!rendered.contains("hunter2"));
    }
}
