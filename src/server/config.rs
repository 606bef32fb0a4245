use std::net::SocketAddr;
use url::Url;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Cloudinary unsigned upload settings.
#[derive(Debug, Clone, PartialEq)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub upload_preset: String,
}

/// HTTP mail API settings.
#[derive(Debug, Clone, PartialEq)]
pub struct MailConfig {
    pub api_url: Url,
    pub api_key: String,
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,

    /// Email of the site owner, who always holds the admin role.
    pub owner_email: Option<String>,
    pub allowed_origin: Option<String>,

    pub cloudinary: Option<CloudinaryConfig>,
    pub mail: Option<MailConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, treating blank values as unset.
    ///
    /// # Returns
    /// - `Ok(Config)` - Every required variable present and parseable
    /// - `Err(ConfigError::MissingEnvVar)` - A required variable, or the partner of a
    ///   set variable from the storage or mail groups, is missing
    /// - `Err(ConfigError::InvalidEnvVar)` - A value cannot be parsed
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let required = |name: &str| var(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()));

        let database_url = required("DATABASE_URL")?;

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                name: "BIND_ADDR".to_string(),
                reason: e.to_string(),
            })?;

        let cloudinary = match (var("CLOUDINARY_CLOUD_NAME"), var("CLOUDINARY_UPLOAD_PRESET")) {
            (None, None) => None,
            _ => Some(CloudinaryConfig {
                cloud_name: required("CLOUDINARY_CLOUD_NAME")?,
                upload_preset: required("CLOUDINARY_UPLOAD_PRESET")?,
            }),
        };

        let mail = match (var("MAIL_API_URL"), var("MAIL_API_KEY"), var("MAIL_FROM")) {
            (None, None, None) => None,
            _ => {
                let api_url = required("MAIL_API_URL")?;
                Some(MailConfig {
                    api_url: Url::parse(&api_url).map_err(|e| ConfigError::InvalidEnvVar {
                        name: "MAIL_API_URL".to_string(),
                        reason: e.to_string(),
                    })?,
                    api_key: required("MAIL_API_KEY")?,
                    from: required("MAIL_FROM")?,
                })
            }
        };

        Ok(Self {
            database_url,
            bind_addr,
            owner_email: var("OWNER_EMAIL"),
            allowed_origin: var("ALLOWED_ORIGIN"),
            cloudinary,
            mail,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_optional_values() {
        let config = load(&[("DATABASE_URL", "sqlite::memory:")]).unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert!(config.owner_email.is_none());
        assert!(config.cloudinary.is_none());
        assert!(config.mail.is_none());
    }

    #[test]
    fn requires_database_url() {
        let result = load(&[("DATABASE_URL", "  ")]);

        assert!(matches!(
            result,
            Err(AppError::ConfigErr(ConfigError::MissingEnvVar(name))) if name == "DATABASE_URL"
        ));
    }

    #[test]
    fn requires_complete_groups() {
        let result = load(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("CLOUDINARY_CLOUD_NAME", "demo"),
        ]);
        assert!(matches!(
            result,
            Err(AppError::ConfigErr(ConfigError::MissingEnvVar(name))) if name == "CLOUDINARY_UPLOAD_PRESET"
        ));

        let result = load(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("MAIL_API_KEY", "key"),
            ("MAIL_FROM", "site@example.com"),
        ]);
        assert!(matches!(
            result,
            Err(AppError::ConfigErr(ConfigError::MissingEnvVar(name))) if name == "MAIL_API_URL"
        ));
    }

    #[test]
    fn rejects_malformed_values() {
        let result = load(&[("DATABASE_URL", "sqlite::memory:"), ("BIND_ADDR", "nowhere")]);
        assert!(matches!(
            result,
            Err(AppError::ConfigErr(ConfigError::InvalidEnvVar { .. }))
        ));

        let result = load(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("MAIL_API_URL", "not a url"),
            ("MAIL_API_KEY", "key"),
            ("MAIL_FROM", "site@example.com"),
        ]);
        assert!(matches!(
            result,
            Err(AppError::ConfigErr(ConfigError::InvalidEnvVar { .. }))
        ));
    }

    #[test]
    fn reads_collaborator_settings() {
        let config = load(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("OWNER_EMAIL", "owner@example.com"),
            ("CLOUDINARY_CLOUD_NAME", "demo"),
            ("CLOUDINARY_UPLOAD_PRESET", "unsigned"),
            ("MAIL_API_URL", "https://mail.example.com/send"),
            ("MAIL_API_KEY", "key"),
            ("MAIL_FROM", "site@example.com"),
        ])
        .unwrap();

        assert_eq!(config.owner_email.as_deref(), Some("owner@example.com"));
        assert_eq!(
            config.cloudinary,
            Some(CloudinaryConfig {
                cloud_name: "demo".to_string(),
                upload_preset: "unsigned".to_string(),
            })
        );
        assert_eq!(config.mail.map(|m| m.from), Some("site@example.com".to_string()));
    }
}
