//! Clap derive structures for the `derma` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Depends on clap alone so `build.rs` can include it for man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// derma -- content and admin client for the clinic website backend
#[derive(Debug, Parser)]
#[command(
    name = "derma",
    version,
    about = "Browse and manage clinic website content from the command line",
    long_about = "Reads the public content collections (doctors, videos, testimonials,\n\
        FAQs, services, before/after cases) with built-in fallback content,\n\
        and manages them through the password-protected admin API.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "DERMA_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend URL (overrides profile)
    #[arg(long, env = "DERMA_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "DERMA_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "DERMA_INSECURE", global = true)]
    pub insecure: bool,

    /// Admin request timeout in seconds (overrides profile)
    #[arg(long, env = "DERMA_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

/// Content collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceArg {
    Doctors,
    Videos,
    Testimonials,
    Faqs,
    Services,
    /// Before/after treatment cases
    #[value(name = "before-after", alias = "beforeafter")]
    BeforeAfter,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Read a public collection (falls back to built-in content)
    #[command(alias = "c")]
    Content(ContentArgs),

    /// Log in and manage content through the admin API
    Admin(AdminArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Content ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ContentArgs {
    /// Collection to read
    pub resource: ResourceArg,

    /// Give up and use built-in content after this many milliseconds
    #[arg(long)]
    pub load_timeout_ms: Option<u64>,

    /// Show an empty collection as empty instead of using built-in content
    #[arg(long)]
    pub strict_empty: bool,
}

// ── Admin ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Log in and store the session token
    Login {
        /// Admin username (defaults to the profile's username)
        #[arg(long, short = 'u')]
        username: Option<String>,

        /// Admin password (prefer the prompt, keyring or DERMA_ADMIN_PASSWORD)
        #[arg(long)]
        password: Option<String>,
    },

    /// Forget the stored session token
    Logout,

    /// Check whether the stored session is still valid
    Status,

    /// Record counts for every collection
    Overview,

    /// List records of a collection
    #[command(alias = "ls")]
    List {
        resource: ResourceArg,
    },

    /// Add a record
    Create {
        resource: ResourceArg,

        /// Field assignment, repeatable (e.g. --set name="Dr. Rao")
        #[arg(long = "set", short = 's', value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// Image to upload (doctors, services, before-after)
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Edit a record; unspecified fields keep their current values
    Update {
        resource: ResourceArg,

        /// Record id
        id: String,

        /// Field assignment, repeatable
        #[arg(long = "set", short = 's', value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// Replacement image
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Delete a record
    #[command(alias = "rm")]
    Delete {
        resource: ResourceArg,

        /// Record id
        id: String,
    },

    /// Change the admin username and password (interactive)
    UpdateCredentials,

    /// Show the editable fields of a collection
    Fields {
        resource: ResourceArg,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive configuration wizard
    Init,

    /// Show the current configuration (secrets masked)
    Show,

    /// Set a profile value
    Set {
        /// Key: api_url, username, ca_cert, insecure, timeout
        key: String,
        value: String,
    },

    /// Store the admin password in the system keyring
    SetPassword {
        /// Profile to store it for (defaults to the active profile)
        #[arg(long)]
        profile: Option<String>,
    },

    /// Make a profile the default
    Use {
        name: String,
    },

    /// List configured profiles
    Profiles,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
