//! CLI configuration: thin wrapper around `derma_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--profile, --api-url, --insecure, --timeout).

use std::sync::Arc;
use std::time::Duration;

use derma_core::{EmptyPolicy, SiteConfig, TlsVerification, TokenStore};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use derma_config::{
    Config, Profile, config_path, load_config_or_default, save_config, token_store,
};

/// Backend chosen for this invocation.
#[derive(Debug)]
pub struct Target {
    pub profile_name: String,
    pub site: SiteConfig,
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// Resolve the backend from the active profile plus CLI flag overrides.
///
/// With no matching profile, `--api-url` alone is enough; an explicitly
/// requested profile that does not exist is an error.
pub fn resolve_target(global: &GlobalOpts, config: &Config) -> Result<Target, CliError> {
    let profile_name = active_profile_name(global, config);

    let mut site = if let Some(profile) = config.profiles.get(&profile_name) {
        derma_config::profile_to_site_config(profile, &config.defaults)?
    } else if let Some(ref requested) = global.profile {
        return Err(CliError::ProfileNotFound {
            name: requested.clone(),
            available: available_profiles(config),
        });
    } else {
        let url_str = global.api_url.as_deref().ok_or_else(|| CliError::NoConfig {
            path: config_path().display().to_string(),
        })?;
        let mut site = SiteConfig::new(parse_url(url_str)?);
        site.timeout = Duration::from_secs(config.defaults.timeout);
        site.load_timeout = Duration::from_millis(config.defaults.load_timeout_ms);
        if !config.defaults.fallback_on_empty {
            site.empty_policy = EmptyPolicy::ShowEmpty;
        }
        site
    };

    if let Some(ref url_str) = global.api_url {
        site.api_url = parse_url(url_str)?;
    }
    if global.insecure {
        site.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        site.timeout = Duration::from_secs(secs);
    }

    Ok(Target { profile_name, site })
}

/// Token store for `profile_name`, per `defaults.token_storage`.
pub fn token_store_for(config: &Config, profile_name: &str) -> Arc<dyn TokenStore> {
    token_store(config.defaults.token_storage, profile_name)
}

/// Comma-separated profile names for help text.
pub fn available_profiles(config: &Config) -> String {
    if config.profiles.is_empty() {
        "(none)".into()
    } else {
        config.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

fn parse_url(url_str: &str) -> Result<url::Url, CliError> {
    url_str.parse().map_err(|_| CliError::Validation {
        field: "api_url".into(),
        reason: format!("invalid URL: {url_str}"),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["derma"];
        argv.extend_from_slice(args);
        argv.push("completions");
        argv.push("bash");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with(name: &str, url: &str) -> Config {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            name.into(),
            Profile {
                api_url: url.into(),
                ..Profile::default()
            },
        );
        cfg
    }

    #[test]
    fn flags_override_profile() {
        let cfg = config_with("default", "https://api.clinic.test");
        let target = resolve_target(
            &global(&["--api-url", "http://localhost:5000", "-k", "--timeout", "5"]),
            &cfg,
        )
        .unwrap();
        assert_eq!(target.profile_name, "default");
        assert_eq!(target.site.api_url.as_str(), "http://localhost:5000/");
        assert!(matches!(target.site.tls, TlsVerification::DangerAcceptInvalid));
        assert_eq!(target.site.timeout, Duration::from_secs(5));
    }

    #[test]
    fn api_url_alone_is_enough() {
        let target = resolve_target(
            &global(&["--api-url", "http://localhost:5000"]),
            &Config::default(),
        )
        .unwrap();
        assert_eq!(target.site.load_timeout, Duration::from_millis(2000));
        assert_eq!(target.site.empty_policy, EmptyPolicy::Fallback);
    }

    #[test]
    fn missing_backend_is_reported() {
        let err = resolve_target(&global(&[]), &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::NoConfig { .. }));
    }

    #[test]
    fn unknown_explicit_profile_lists_alternatives() {
        let cfg = config_with("prod", "https://api.clinic.test");
        let err = resolve_target(&global(&["-p", "staging"]), &cfg).unwrap_err();
        assert!(matches!(err, CliError::ProfileNotFound { ref available, .. } if available == "prod"));
    }
}
