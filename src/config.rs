use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;
use std::time::Duration;
use url::Url;

const LDAPS_PORT: u16 = 636;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub ldap_server: String,
    pub ldap_base_dn: String,
    pub ldap_username: String,
    pub ldap_password: String,
    pub ldap_starttls: bool,
    pub ldap_connect_timeout: Option<Duration>,
    pub jwt_secret: String,
    pub admin_rps: u32,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            ldap_server: get_env("LDAP_SERVER")?,
            ldap_base_dn: get_env("LDAP_BASE_DN")?,
            ldap_username: get_env("LDAP_USERNAME")?,
            ldap_password: get_env("LDAP_PASSWORD")?,
            ldap_starttls: get_env_parse_or("LDAP_STARTTLS", false)?,
            ldap_connect_timeout: get_env_opt_parse::<u64>("LDAP_CONNECT_TIMEOUT_SECS")?
                .map(Duration::from_secs),
            jwt_secret: get_env("JWT_SECRET")?,
            admin_rps: get_env_parse("ADMIN_RPS")?,
        })
    }

    /// LDAP URL for the configured server.
    ///
    /// Accepts a full `ldap://` / `ldaps://` URL or a bare `host[:port]`.
    /// A bare address on port 636 is treated as LDAPS.
    pub fn ldap_url(&self) -> Result<String> {
        normalize_ldap_url(&self.ldap_server)
    }
}

pub fn normalize_ldap_url(server: &str) -> Result<String> {
    let server = server.trim();
    if server.is_empty() {
        return Err(Error::Config("LDAP_SERVER must not be empty".to_string()));
    }

    let candidate = if server.contains("://") {
        server.to_string()
    } else {
        let scheme = match server.rsplit_once(':') {
            Some((_, port)) if port.parse::<u16>().ok() == Some(LDAPS_PORT) => "ldaps",
            _ => "ldap",
        };
        format!("{}://{}", scheme, server)
    };

    let url = Url::parse(&candidate)
        .map_err(|e| Error::Config(format!("Invalid LDAP_SERVER '{}': {}", server, e)))?;

    match url.scheme() {
        "ldap" | "ldaps" => {}
        other => {
            return Err(Error::Config(format!(
                "Unsupported LDAP scheme '{}' in LDAP_SERVER",
                other
            )))
        }
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(Error::Config(format!(
            "LDAP_SERVER '{}' has no host",
            server
        )));
    }

    Ok(candidate)
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse<T>(name: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_env(name)?;
    raw.parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

fn get_env_opt_parse<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        _ => Ok(None),
    }
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    Ok(get_env_opt_parse(name)?.unwrap_or(default))
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_defaults_to_plain_ldap() {
        assert_eq!(
            normalize_ldap_url("dc01.corp.example").unwrap(),
            "ldap://dc01.corp.example"
        );
        assert_eq!(
            normalize_ldap_url("dc01.corp.example:389").unwrap(),
            "ldap://dc01.corp.example:389"
        );
    }

    #[test]
    fn port_636_selects_ldaps() {
        assert_eq!(
            normalize_ldap_url(" corp.example:636 ").unwrap(),
            "ldaps://corp.example:636"
        );
    }

    #[test]
    fn explicit_url_is_kept() {
        assert_eq!(
            normalize_ldap_url("ldaps://dc01.corp.example").unwrap(),
            "ldaps://dc01.corp.example"
        );
    }

    #[test]
    fn rejects_foreign_scheme_and_empty_input() {
        assert!(matches!(
            normalize_ldap_url("https://corp.example"),
            Err(Error::Config(_))
        ));
        assert!(matches!(normalize_ldap_url("   "), Err(Error::Config(_))));
    }
}
