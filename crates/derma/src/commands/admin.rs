//! Admin command handlers: session lifecycle and CRUD.

use std::io::IsTerminal;
use std::path::Path;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tabled::Tabled;

use derma_core::form::{self, FieldKind};
use derma_core::session::validate_new_credentials;
use derma_core::{AdminSession, FormDraft, FormMode, ImageAttachment, RawRecord, Resource, Site};

use crate::cli::{AdminArgs, AdminCommand, GlobalOpts, ResourceArg};
use crate::config::{self, Config, Profile, Target};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Clone, Serialize, Tabled)]
struct OverviewRow {
    #[tabled(rename = "Collection")]
    resource: String,
    #[tabled(rename = "Records")]
    records: usize,
}

#[derive(Clone, Serialize, Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    name: &'static str,
    #[tabled(rename = "Label")]
    label: &'static str,
    #[tabled(rename = "Kind")]
    kind: String,
}

fn kind_label(kind: FieldKind) -> String {
    match kind {
        FieldKind::Text => "text".into(),
        FieldKind::LongText => "long text".into(),
        FieldKind::Rating => "rating 1-5".into(),
        FieldKind::Choice(options) => format!("one of {}", options.join("|")),
        FieldKind::Image => "image (--image PATH)".into(),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    target: Target,
    config: &Config,
    args: AdminArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let store = config::token_store_for(config, &target.profile_name);
    let api_url = target.site.api_url.to_string();
    let site = Site::new(target.site)?;
    let mut session = site.admin(store);
    let profile = config.profiles.get(&target.profile_name);

    match args.command {
        AdminCommand::Login { username, password } => {
            let fallback_profile = Profile::default();
            let profile = profile.unwrap_or(&fallback_profile);
            let username = login_username(username, profile, &target.profile_name)?;
            let password = login_password(password, profile, &target.profile_name)?;
            session.login(&username, &password).await?;
            if !global.quiet {
                let color = output::should_color(&global.color);
                eprintln!("{} Logged in to {api_url} as {username}", output::ok_marker(color));
            }
            Ok(())
        }

        AdminCommand::Logout => {
            session.logout()?;
            if !global.quiet {
                eprintln!("Logged out");
            }
            Ok(())
        }

        AdminCommand::Fields { resource } => show_fields(resource, global),

        command => {
            if !session.restore().await? {
                return Err(CliError::NotLoggedIn {
                    profile: target.profile_name,
                });
            }
            let username = profile.and_then(|p| p.username.clone());
            authenticated(&mut session, command, username, &api_url, global).await
        }
    }
}

/// Commands that need a live session.
async fn authenticated(
    session: &mut AdminSession,
    command: AdminCommand,
    profile_username: Option<String>,
    api_url: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        AdminCommand::Status => {
            let color = output::should_color(&global.color);
            output::print_output(
                &format!("{} Logged in to {api_url}", output::ok_marker(color)),
                global.quiet,
            );
            Ok(())
        }

        AdminCommand::Overview => {
            let spinner = util::spinner("Loading collections...", global.quiet);
            let collections = session.overview().await;
            util::finish(spinner);
            let rows: Vec<OverviewRow> = collections?
                .into_iter()
                .map(|(resource, records)| OverviewRow {
                    resource: resource.to_string(),
                    records: records.len(),
                })
                .collect();
            let out = output::render_list(&global.output, &rows, Clone::clone, |r| {
                format!("{}\t{}", r.resource, r.records)
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AdminCommand::List { resource } => {
            let resource = Resource::from(resource);
            let records = session.list(resource).await?;
            let out = render_records(resource, &records, global)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AdminCommand::Create {
            resource,
            set,
            image,
        } => {
            let resource = Resource::from(resource);
            let mut draft = FormDraft::new(resource, FormMode::Create);
            fill_draft(&mut draft, &set, image.as_deref())?;
            session.create(draft).await?;
            if !global.quiet {
                eprintln!("Created {}", resource.singular());
            }
            Ok(())
        }

        AdminCommand::Update {
            resource,
            id,
            set,
            image,
        } => {
            let resource = Resource::from(resource);
            let records = session.list(resource).await?;
            let record = records
                .iter()
                .find(|r| r.id == id)
                .ok_or_else(|| CliError::NotFound {
                    resource: resource.singular().into(),
                    identifier: id.clone(),
                    list_arg: resource.to_string(),
                })?;
            let mut draft = FormDraft::from_record(resource, record);
            fill_draft(&mut draft, &set, image.as_deref())?;
            session.update(&id, draft).await?;
            if !global.quiet {
                eprintln!("Updated {} {id}", resource.singular());
            }
            Ok(())
        }

        AdminCommand::Delete { resource, id } => {
            let resource = Resource::from(resource);
            let prompt = format!("Delete {} {id}?", resource.singular());
            if !util::confirm(&prompt, &format!("delete {resource}"), global.yes)? {
                return Ok(());
            }
            session.delete(resource, &id).await?;
            if !global.quiet {
                eprintln!("Deleted {} {id}", resource.singular());
            }
            Ok(())
        }

        AdminCommand::UpdateCredentials => {
            update_credentials(session, profile_username.as_deref(), global).await
        }

        // Handled before a session is needed
        AdminCommand::Login { .. } | AdminCommand::Logout | AdminCommand::Fields { .. } => Ok(()),
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Editable fields of a collection; needs no backend.
pub fn show_fields(resource: ResourceArg, global: &GlobalOpts) -> Result<(), CliError> {
    let rows: Vec<FieldRow> = form::fields(resource.into())
        .iter()
        .map(|f| FieldRow {
            name: f.name,
            label: f.label,
            kind: kind_label(f.kind),
        })
        .collect();
    let out = output::render_list(&global.output, &rows, Clone::clone, |f| f.name.to_owned())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn render_records(
    resource: Resource,
    records: &[RawRecord],
    global: &GlobalOpts,
) -> Result<String, CliError> {
    let columns = form::columns(resource);
    let header = std::iter::once("ID".to_owned())
        .chain(columns.iter().map(|c| c.header.to_owned()))
        .collect();
    let rows = records
        .iter()
        .map(|r| {
            std::iter::once(r.id.clone())
                .chain(columns.iter().map(|c| output::truncate(&r.field_text(c.field), 48)))
                .collect()
        })
        .collect();
    let ids = records.iter().map(|r| r.id.clone()).collect();
    output::render_dynamic(&global.output, records, header, rows, ids)
}

fn fill_draft(draft: &mut FormDraft, set: &[String], image: Option<&Path>) -> Result<(), CliError> {
    for assignment in set {
        draft.set_assignment(assignment)?;
    }
    if let Some(path) = image {
        let attachment = ImageAttachment::from_path(path).map_err(|e| CliError::Validation {
            field: "image".into(),
            reason: format!("cannot read {}: {e}", path.display()),
        })?;
        draft.attach_image(attachment)?;
    }
    Ok(())
}

fn login_username(
    flag: Option<String>,
    profile: &Profile,
    profile_name: &str,
) -> Result<String, CliError> {
    if let Some(username) = flag {
        return Ok(username);
    }
    match derma_config::resolve_username(profile, profile_name) {
        Ok(username) => Ok(username),
        Err(_) if std::io::stdin().is_terminal() => util::prompt_text("Username", None),
        Err(e) => Err(e.into()),
    }
}

fn login_password(
    flag: Option<String>,
    profile: &Profile,
    profile_name: &str,
) -> Result<SecretString, CliError> {
    if let Some(password) = flag {
        return Ok(SecretString::from(password));
    }
    match derma_config::resolve_password(profile, profile_name) {
        Ok(password) => Ok(password),
        Err(_) if std::io::stdin().is_terminal() => util::prompt_password("Password"),
        Err(e) => Err(e.into()),
    }
}

async fn update_credentials(
    session: &mut AdminSession,
    profile_username: Option<&str>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if !std::io::stdin().is_terminal() {
        return Err(CliError::Validation {
            field: "terminal".into(),
            reason: "update-credentials prompts for passwords and needs an interactive terminal"
                .into(),
        });
    }

    let current_username = util::prompt_text("Current username", profile_username)?;
    let current_password = util::prompt_password("Current password")?;
    let verified = session
        .verify_current_credentials(&current_username, &current_password)
        .await?;

    let new_username = util::prompt_text("New username", Some(&current_username))?;
    let new_password = util::prompt_password("New password")?;
    validate_new_credentials(&new_username, &new_password)?;
    let repeated = util::prompt_password("Repeat new password")?;
    if repeated.expose_secret() != new_password.expose_secret() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "passwords do not match".into(),
        });
    }

    session
        .apply_new_credentials(verified, &new_username, &new_password)
        .await?;

    if !global.quiet {
        let color = output::should_color(&global.color);
        eprintln!(
            "{} Credentials updated. Log in again with: derma admin login",
            output::ok_marker(color)
        );
        if profile_username.is_some_and(|u| u != new_username) {
            eprintln!(
                "{}",
                output::dim(
                    "The profile still names the old username; update it with derma config set username <name>",
                    color
                )
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_kinds_describe_their_input() {
        assert_eq!(kind_label(FieldKind::Rating), "rating 1-5");
        assert_eq!(
            kind_label(FieldKind::Choice(form::SERVICE_CATEGORIES)),
            "one of skin|hair"
        );
    }
}
