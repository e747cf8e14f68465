//! Config subcommand handlers.

use std::fmt::Write as _;

use dialoguer::Select;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use derma_config::TokenStorage;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

use super::util;

const MASK: &str = "****";

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display, masking the plaintext password.
fn format_config_redacted(cfg: &Config) -> String {
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let d = &cfg.defaults;
    let _ = writeln!(out, "\n[defaults]");
    let _ = writeln!(out, "output = \"{}\"", d.output);
    let _ = writeln!(out, "color = \"{}\"", d.color);
    let _ = writeln!(out, "timeout = {}", d.timeout);
    let _ = writeln!(out, "load_timeout_ms = {}", d.load_timeout_ms);
    let _ = writeln!(out, "fallback_on_empty = {}", d.fallback_on_empty);
    let _ = writeln!(out, "token_storage = \"{}\"", storage_name(d.token_storage));

    for (name, p) in &cfg.profiles {
        let _ = writeln!(out, "\n[profiles.{name}]");
        let _ = writeln!(out, "api_url = \"{}\"", p.api_url);
        if let Some(ref u) = p.username {
            let _ = writeln!(out, "username = \"{u}\"");
        }
        if p.password.is_some() {
            let _ = writeln!(out, "password = \"{MASK}\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out.trim_end().to_owned()
}

/// The config as a JSON value with plaintext passwords masked.
fn redacted_value(cfg: &Config) -> Result<Value, CliError> {
    let mut value = serde_json::to_value(cfg)?;
    if let Some(profiles) = value.get_mut("profiles").and_then(Value::as_object_mut) {
        for profile in profiles.values_mut() {
            if let Some(pw) = profile.get_mut("password").filter(|pw| !pw.is_null()) {
                *pw = Value::String(MASK.into());
            }
        }
    }
    Ok(value)
}

fn storage_name(storage: TokenStorage) -> &'static str {
    match storage {
        TokenStorage::File => "file",
        TokenStorage::Keyring => "keyring",
    }
}

fn parse_flag(field: &str, value: &str) -> Result<bool, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: "must be 'true' or 'false'".into(),
    })
}

fn parse_number(field: &str, value: &str) -> Result<u64, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: "must be a whole number".into(),
    })
}

/// Apply `key = value` to a profile or to `[defaults]`.
fn set_value(cfg: &mut Config, profile_name: &str, key: &str, value: String) -> Result<(), CliError> {
    let key = key.replace('-', "_");
    match key.as_str() {
        "load_timeout_ms" => cfg.defaults.load_timeout_ms = parse_number(&key, &value)?,
        "fallback_on_empty" => cfg.defaults.fallback_on_empty = parse_flag(&key, &value)?,
        "token_storage" => {
            cfg.defaults.token_storage = match value.as_str() {
                "file" => TokenStorage::File,
                "keyring" => TokenStorage::Keyring,
                _ => {
                    return Err(CliError::Validation {
                        field: key,
                        reason: "must be 'file' or 'keyring'".into(),
                    });
                }
            };
        }
        _ => {
            let profile = cfg.profiles.entry(profile_name.to_owned()).or_default();
            match key.as_str() {
                "api_url" => {
                    url::Url::parse(&value).map_err(|e| CliError::Validation {
                        field: key.clone(),
                        reason: format!("invalid URL: {e}"),
                    })?;
                    profile.api_url = value;
                }
                "username" => profile.username = Some(value),
                "insecure" => profile.insecure = Some(parse_flag(&key, &value)?),
                "timeout" => profile.timeout = Some(parse_number(&key, &value)?),
                "ca_cert" => profile.ca_cert = Some(value.into()),
                other => {
                    return Err(CliError::Validation {
                        field: other.into(),
                        reason: format!(
                            "unknown config key '{other}'. Valid keys: api_url, username, \
                             insecure, timeout, ca_cert, load_timeout_ms, fallback_on_empty, \
                             token_storage"
                        ),
                    });
                }
            }
        }
    }
    Ok(())
}

/// Keyring or plaintext. `Some(password)` means plaintext was chosen.
fn prompt_password_storage(
    profile_name: &str,
    password: SecretString,
) -> Result<Option<String>, CliError> {
    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt("Where to store the password?")
        .items(choices)
        .default(0)
        .interact()?;

    if selection == 0 {
        derma_config::store_password(profile_name, &password)?;
        eprintln!("   ✓ Password stored in system keyring");
        Ok(None)
    } else {
        Ok(Some(password.expose_secret().to_owned()))
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(),

        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let value = redacted_value(&cfg)?;
            let out = output::render_single(
                &global.output,
                &value,
                |_| format_config_redacted(&cfg),
                |_| config::config_path().display().to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            set_value(&mut cfg, &profile_name, &key, value)?;
            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Set {key} on profile '{profile_name}'");
            }
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: derma config init");
            } else {
                for (name, profile) in &cfg.profiles {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}\t{}", profile.api_url);
                }
            }
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name,
                });
            }
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Default profile set to '{name}'");
            }
            Ok(())
        }

        ConfigCommand::SetPassword { profile } => {
            let cfg = config::load_config_or_default();
            let profile_name = profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));
            if !cfg.profiles.contains_key(&profile_name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name: profile_name,
                });
            }

            let password = util::prompt_password("Admin password")?;
            if password.expose_secret().is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "value cannot be empty".into(),
                });
            }
            derma_config::store_password(&profile_name, &password)?;
            if !global.quiet {
                eprintln!("✓ Password stored in system keyring for profile '{profile_name}'");
            }
            Ok(())
        }
    }
}

/// Interactive wizard. Adds or replaces one profile and makes it the
/// default; other profiles are kept.
fn init() -> Result<(), CliError> {
    let config_path = config::config_path();
    eprintln!("derma configuration wizard");
    eprintln!("   Config path: {}\n", config_path.display());

    let mut cfg = config::load_config_or_default();

    let profile_name = util::prompt_text("Profile name", Some("default"))?;
    let api_url = util::prompt_text("Backend URL", Some("http://localhost:5000"))?;
    url::Url::parse(&api_url).map_err(|e| CliError::Validation {
        field: "api_url".into(),
        reason: format!("invalid URL: {e}"),
    })?;

    let username = util::prompt_text("Admin username (blank to skip)", Some(""))?;
    let username = (!username.trim().is_empty()).then(|| username.trim().to_owned());

    let password = if username.is_some() {
        let password = util::prompt_password("Admin password (blank to skip)")?;
        if password.expose_secret().is_empty() {
            None
        } else {
            prompt_password_storage(&profile_name, password)?
        }
    } else {
        None
    };

    let storage = Select::new()
        .with_prompt("Keep the admin session token in")
        .items(&["A private file in the data directory", "The system keyring"])
        .default(0)
        .interact()?;
    cfg.defaults.token_storage = if storage == 0 {
        TokenStorage::File
    } else {
        TokenStorage::Keyring
    };

    cfg.profiles.insert(
        profile_name.clone(),
        Profile {
            api_url,
            username,
            password,
            ..Profile::default()
        },
    );
    cfg.default_profile = Some(profile_name.clone());
    config::save_config(&cfg)?;

    eprintln!("\n✓ Configuration written to {}", config_path.display());
    eprintln!("  Active profile: {profile_name}");
    eprintln!("\n  Try it: derma content doctors");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn with_secret() -> Config {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                api_url: "https://api.clinic.test".into(),
                username: Some("admin".into()),
                password: Some("hunter22".into()),
                ..Profile::default()
            },
        );
        cfg
    }

    #[test]
    fn show_masks_plaintext_password() {
        let cfg = with_secret();
        let text = format_config_redacted(&cfg);
        assert!(text.contains("password = \"****\""));
        assert!(!text.contains("hunter22"));

        let value = redacted_value(&cfg).unwrap();
        assert_eq!(value["profiles"]["default"]["password"], "****");
        assert_eq!(value["profiles"]["default"]["username"], "admin");
    }

    #[test]
    fn set_routes_keys_to_profile_or_defaults() {
        let mut cfg = Config::default();
        set_value(&mut cfg, "staging", "api-url", "https://staging.clinic.test".into()).unwrap();
        set_value(&mut cfg, "staging", "timeout", "12".into()).unwrap();
        set_value(&mut cfg, "staging", "token_storage", "keyring".into()).unwrap();

        let profile = cfg.profiles.get("staging").unwrap();
        assert_eq!(profile.api_url, "https://staging.clinic.test");
        assert_eq!(profile.timeout, Some(12));
        assert_eq!(cfg.defaults.token_storage, TokenStorage::Keyring);
    }

    #[test]
    fn set_rejects_bad_values() {
        let mut cfg = Config::default();
        assert!(set_value(&mut cfg, "default", "insecure", "maybe".into()).is_err());
        assert!(set_value(&mut cfg, "default", "api_url", "not a url".into()).is_err());
        assert!(set_value(&mut cfg, "default", "colour", "red".into()).is_err());
    }
}
