//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "popcat",
    bin_name = "popcat",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "POP template catalog for retail stores",
    long_about = "popcat manages promotional (POP) templates: a common catalog \
                  curated by administrators and private templates per store, \
                  each backed by an uploaded image.",
    after_help = "EXAMPLES:\n\
        \x20 popcat list common --layout-type VERTICAL\n\
        \x20 popcat --actor a4 publish --name \"Spring Sale\" --layout-type VERTICAL --category EVENT a.jpg b.jpg\n\
        \x20 popcat --actor m100 save --name Weekend --layout-type HORIZONTAL --big FOOD --thumbnail t.png\n\
        \x20 popcat --actor a4 delete 42",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List templates page by page.
    #[command(
        visible_alias = "ls",
        about = "List templates",
        after_help = "EXAMPLES:\n\
            \x20 popcat list common\n\
            \x20 popcat list common --layout-type VERTICAL --big EVENT --page 2\n\
            \x20 popcat --actor m100 list private --format json"
    )]
    List(ListArgs),

    /// Show the distinct top-level categories in use.
    #[command(
        about = "List top-level categories",
        after_help = "EXAMPLES:\n\
            \x20 popcat categories common\n\
            \x20 popcat --actor m100 categories private"
    )]
    Categories(CategoriesArgs),

    /// Upload images as common templates (admin only).
    #[command(
        about = "Publish common templates",
        after_help = "EXAMPLES:\n\
            \x20 popcat --actor a4 publish --name \"Spring Sale\" --layout-type VERTICAL fileA.jpg fileB.jpg\n\
            \x20 popcat --actor a4 publish --name Clearance --layout-type SHOWCARD --use-yn N --layout-file layout.json poster.png"
    )]
    Publish(PublishArgs),

    /// Save a private template for the acting store.
    #[command(
        about = "Save a private template",
        after_help = "EXAMPLES:\n\
            \x20 popcat --actor m100 save --name Weekend --layout-type HORIZONTAL --big FOOD\n\
            \x20 popcat --actor m100 save --name Weekend --layout-type HORIZONTAL --big FOOD --mid FRUIT --thumbnail thumb.png"
    )]
    Save(SaveArgs),

    /// Delete a template and its assets (admin only).
    #[command(
        visible_alias = "rm",
        about = "Delete a template",
        after_help = "EXAMPLES:\n\
            \x20 popcat --actor a4 delete 42"
    )]
    Delete(DeleteArgs),

    /// Initialise a popcat configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 popcat init                      # default location\n\
            \x20 popcat --config ./popcat.toml init\n\
            \x20 popcat init --force              # overwrite"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 popcat completions bash > ~/.local/share/bash-completion/completions/popcat\n\
            \x20 popcat completions zsh  > ~/.zfunc/_popcat\n\
            \x20 popcat completions fish > ~/.config/fish/completions/popcat.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the popcat configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 popcat config get storage.upload_dir\n\
            \x20 popcat config list\n\
            \x20 popcat config path"
    )]
    Config(ConfigCommands),
}

// ── shared pieces ─────────────────────────────────────────────────────────────

/// Which half of the catalog a read targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scope {
    /// Admin-curated templates shared by all stores.
    Common,
    /// Templates owned by the acting store.
    #[value(alias = "mine")]
    Private,
}

/// The four category levels, each optional.
#[derive(Debug, Clone, Default, Args)]
pub struct CategoryArgs {
    #[arg(long = "big", value_name = "CATEGORY", help = "Top category level")]
    pub big: Option<String>,

    #[arg(long = "mid", value_name = "CATEGORY", help = "Second category level")]
    pub mid: Option<String>,

    #[arg(long = "small", value_name = "CATEGORY", help = "Third category level")]
    pub small: Option<String>,

    #[arg(long = "sub", value_name = "CATEGORY", help = "Fourth category level")]
    pub sub: Option<String>,
}

/// Inline layout JSON or a file holding it.
#[derive(Debug, Clone, Default, Args)]
pub struct LayoutArgs {
    #[arg(
        long = "layout-json",
        value_name = "JSON",
        conflicts_with = "layout_file",
        help = "Layout description, stored verbatim"
    )]
    pub layout_json: Option<String>,

    #[arg(
        long = "layout-file",
        value_name = "PATH",
        help = "Read the layout description from a file"
    )]
    pub layout_file: Option<PathBuf>,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `popcat list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(value_enum, help = "Catalog to list")]
    pub scope: Scope,

    #[arg(short = 't', long = "layout-type", value_name = "TYPE", help = "Exact layout type")]
    pub layout_type: Option<String>,

    #[command(flatten)]
    pub category: CategoryArgs,

    #[arg(short = 'p', long = "page", default_value_t = 1, allow_negative_numbers = true, help = "1-based page number")]
    pub page: i64,

    #[arg(short = 's', long = "size", default_value_t = 20, allow_negative_numbers = true, help = "Rows per page")]
    pub size: i64,

    /// Output format; defaults to JSON when `--output-format json` is set.
    #[arg(long = "format", value_enum, help = "Output format")]
    pub format: Option<ListFormat>,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// `{page, size, totalCount, rows}` as JSON.
    Json,
    /// CSV rows.
    Csv,
}

// ── categories ────────────────────────────────────────────────────────────────

/// Arguments for `popcat categories`.
#[derive(Debug, Args)]
pub struct CategoriesArgs {
    #[arg(value_enum, help = "Catalog to inspect")]
    pub scope: Scope,
}

// ── publish ───────────────────────────────────────────────────────────────────

/// Arguments for `popcat publish`.
#[derive(Debug, Args)]
pub struct PublishArgs {
    #[arg(short = 'n', long = "name", help = "Template name (suffixed per file when several)")]
    pub name: String,

    #[arg(short = 't', long = "layout-type", value_name = "TYPE", help = "Layout type, e.g. VERTICAL")]
    pub layout_type: String,

    #[arg(long = "use-yn", value_name = "Y|N", help = "N stores the templates inactive")]
    pub use_yn: Option<String>,

    #[arg(long = "category", value_name = "CATEGORY", help = "Top category level")]
    pub category: Option<String>,

    #[command(flatten)]
    pub layout: LayoutArgs,

    #[arg(value_name = "FILE", required = true, num_args = 1.., help = "Template images")]
    pub files: Vec<PathBuf>,
}

// ── save ──────────────────────────────────────────────────────────────────────

/// Arguments for `popcat save`.
#[derive(Debug, Args)]
pub struct SaveArgs {
    #[arg(short = 'n', long = "name", help = "Template name")]
    pub name: String,

    #[arg(short = 't', long = "layout-type", value_name = "TYPE", help = "Layout type, e.g. HORIZONTAL")]
    pub layout_type: String,

    #[command(flatten)]
    pub category: CategoryArgs,

    #[arg(long = "background-url", value_name = "URL", help = "Background image URL, stored as given")]
    pub background_url: Option<String>,

    #[command(flatten)]
    pub layout: LayoutArgs,

    #[arg(long = "thumbnail", value_name = "PATH", help = "Thumbnail image to upload")]
    pub thumbnail: Option<PathBuf>,
}

// ── delete ────────────────────────────────────────────────────────────────────

/// Arguments for `popcat delete`.
#[derive(Debug, Args)]
pub struct DeleteArgs {
    #[arg(value_name = "ID", help = "Template id")]
    pub id: i64,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `popcat init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `popcat completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `popcat config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `storage.upload_dir`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
