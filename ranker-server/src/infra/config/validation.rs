use super::models::Config;

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

/// Non-fatal configuration issues, logged once at startup.
#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

pub fn collect_warnings(config: &Config) -> ConfigWarnings {
    let mut warnings = ConfigWarnings::default();

    if config.database.url.is_none() {
        warnings.push_with_hint(
            "DATABASE_URL not configured; the server can only run with --in-memory",
            "Set DATABASE_URL or DATABASE_HOST/DATABASE_USER/DATABASE_NAME",
        );
    }

    if !config.dev_mode && !config.session.cookie_secure {
        warnings.push_with_hint(
            "Session cookies are sent without the Secure attribute",
            "Set SESSION_COOKIE_SECURE=true when serving over HTTPS",
        );
    }

    if !config.dev_mode && config.cors.allowed_origins.iter().any(|o| o == "*") {
        warnings.push("CORS allow-list contains '*'; any origin may call the API");
    }

    if config.session.ttl.is_zero() {
        warnings.push("SESSION_TTL is zero; every login expires immediately");
    }

    warnings
}
