use anyhow::{Result, bail};

use super::{AppConfig, defaults};

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.general.host.trim().is_empty() {
        errors.push("general.host must not be empty".to_string());
    }

    if cfg.database.url.trim().is_empty() {
        errors.push("database.url must not be empty".to_string());
    }

    if cfg.database.max_connections == 0 {
        errors.push("database.max_connections must be > 0".to_string());
    }

    if cfg.database.min_idle > cfg.database.max_connections {
        errors.push(format!(
            "database.min_idle ({}) must be <= database.max_connections ({})",
            cfg.database.min_idle, cfg.database.max_connections
        ));
    }

    if cfg.session.secret.trim().is_empty() {
        errors.push("session.secret must not be empty".to_string());
    } else if !cfg!(debug_assertions) && cfg.session.secret == defaults::DEFAULT_SESSION_SECRET {
        errors.push("session.secret must be set in release builds".to_string());
    }

    if cfg.session.cookie_name.trim().is_empty() {
        errors.push("session.cookie_name must not be empty".to_string());
    }

    if cfg.session.ttl_secs == 0 {
        errors.push("session.ttl_secs must be > 0".to_string());
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid app config:\n- {}", errors.join("\n- "))
}

#[cfg(test)]
mod tests {
    use super::validate;
    use crate::config::AppConfig;

    #[test]
    fn default_config_is_valid_in_debug_builds() {
        validate(&AppConfig::default()).expect("defaults should validate");
    }

    #[test]
    fn reports_every_problem_at_once() {
        let mut cfg = AppConfig::default();
        cfg.general.host = " ".to_string();
        cfg.database.min_idle = 20;
        cfg.session.secret = String::new();
        cfg.session.ttl_secs = 0;

        let err = validate(&cfg).expect_err("config should be rejected");
        let message = err.to_string();
        assert!(message.contains("general.host"));
        assert!(message.contains("database.min_idle (20)"));
        assert!(message.contains("session.secret"));
        assert!(message.contains("session.ttl_secs"));
    }
}
