//! Command dispatch: bridges CLI args -> core operations -> output formatting.

pub mod admin;
pub mod config_cmd;
pub mod content;
pub mod util;

use derma_core::Resource;

use crate::cli::{Command, GlobalOpts, ResourceArg};
use crate::config::{Config, Target};
use crate::error::CliError;

impl From<ResourceArg> for Resource {
    fn from(arg: ResourceArg) -> Self {
        match arg {
            ResourceArg::Doctors => Self::Doctors,
            ResourceArg::Videos => Self::Videos,
            ResourceArg::Testimonials => Self::Testimonials,
            ResourceArg::Faqs => Self::Faqs,
            ResourceArg::Services => Self::Services,
            ResourceArg::BeforeAfter => Self::BeforeAfter,
        }
    }
}

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    target: Target,
    config: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Content(args) => content::handle(target, args, global).await,
        Command::Admin(args) => {
            let profile = target.profile_name.clone();
            admin::handle(target, config, args, global)
                .await
                .map_err(|e| e.for_profile(&profile))
        }
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_resource_has_a_cli_spelling() {
        let mapped: Vec<Resource> = [
            ResourceArg::Doctors,
            ResourceArg::Videos,
            ResourceArg::Testimonials,
            ResourceArg::Faqs,
            ResourceArg::Services,
            ResourceArg::BeforeAfter,
        ]
        .into_iter()
        .map(Resource::from)
        .collect();
        assert_eq!(mapped, Resource::ALL.to_vec());
    }
}
