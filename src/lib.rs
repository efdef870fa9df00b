pub mod config;
pub mod directory;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::directory::{Directory, LdapDirectory};
use crate::error::Result;
use crate::services::{ad_service::AdService, audit_service::AuditService};

#[derive(Clone)]
pub struct AppState {
    pub ad_service: AdService,
    pub audit_service: AuditService,
    pub jwt_secret: Arc<str>,
}

impl AppState {
    /// Builds the state from the global configuration with an LDAP-backed directory.
    pub fn new() -> Result<Self> {
        let config = crate::config::get_config();
        let directory = LdapDirectory::from_config(config)?;
        tracing::info!(url = %directory.url(), base_dn = %config.ldap_base_dn, "Directory configured");

        Ok(Self::with_directory(
            Arc::new(directory),
            config.ldap_base_dn.clone(),
            config.jwt_secret.as_str(),
        ))
    }

    pub fn with_directory(
        directory: Arc<dyn Directory>,
        base_dn: impl Into<String>,
        jwt_secret: &str,
    ) -> Self {
        Self {
            ad_service: AdService::new(directory, base_dn),
            audit_service: AuditService::new(),
            jwt_secret: Arc::from(jwt_secret),
        }
    }
}
