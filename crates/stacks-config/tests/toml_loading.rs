//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use stacks_config::StacksConfig;

#[test]
fn loads_api_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
base_url = "https://library.example.com/api/v1"
timeout_secs = 10
"#,
        )?;

        let config: StacksConfig = Figment::from(Serialized::defaults(StacksConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.api.base_url, "https://library.example.com/api/v1");
        assert_eq!(config.api.timeout_secs, 10);
        assert!(!config.api.is_local());
        Ok(())
    });
}

#[test]
fn env_beats_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
base_url = "https://toml.example.com/api/v1"
"#,
        )?;
        jail.set_env("STACKS_API__BASE_URL", "https://env.example.com/api/v1");

        let config: StacksConfig = Figment::from(Serialized::defaults(StacksConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("STACKS_").split("__"))
            .extract()?;

        assert_eq!(config.api.base_url, "https://env.example.com/api/v1");
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults_for_missing_fields() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
base_url = "https://partial.example.com/api/v1"
"#,
        )?;

        let config: StacksConfig = Figment::from(Serialized::defaults(StacksConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.api.base_url, "https://partial.example.com/api/v1");
        assert_eq!(config.api.timeout_secs, 30, "default preserved");
        Ok(())
    });
}
