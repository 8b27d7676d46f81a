//! Clap derive structures for the `vitrine` CLI.
//!
//! Defines the command tree, global flags, and shared argument groups.

use clap::{Args, Parser, Subcommand, ValueEnum};

use vitrine_core::{ProductId, SortMode};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// vitrine -- browse a product catalog from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "vitrine",
    version,
    about = "Browse, filter and inspect a product catalog",
    long_about = "Fetches a product catalog over HTTP (falling back to a bundled\n\
        catalog when the source is unavailable), then lets you search, filter,\n\
        sort and page through it.",
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
    /// Catalog endpoint URL (overrides config)
    #[arg(long, short = 'e', env = "VITRINE_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Number of products to request (0 = all)
    #[arg(long, short = 'l', env = "VITRINE_LIMIT", global = true)]
    pub limit: Option<u32>,

    /// Skip the network and use the bundled catalog
    #[arg(long, env = "VITRINE_OFFLINE", global = true)]
    pub offline: bool,

    /// Fetch timeout in seconds
    #[arg(long, env = "VITRINE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Output format [default: table, or `defaults.output` from config]
    #[arg(long, short = 'o', env = "VITRINE_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

impl GlobalOpts {
    pub fn output_format(&self) -> OutputFormat {
        self.output.unwrap_or(OutputFormat::Table)
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color.unwrap_or(ColorMode::Auto)
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
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

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List and inspect products
    #[command(alias = "p")]
    Products(ProductsArgs),

    /// Show the catalog's categories and price range
    #[command(alias = "cat")]
    Categories,

    /// Page through the catalog interactively
    #[command(alias = "b")]
    Browse(FilterArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Filter Arguments ──────────────────────────────────────────

/// Filter and sort flags shared by `products list` and `browse`.
///
/// Price bounds default to the catalog's own range.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Case-insensitive text matched against title and description
    #[arg(long, short = 'Q')]
    pub query: Option<String>,

    /// Only show this category (repeatable)
    #[arg(long, short = 'C')]
    pub category: Vec<String>,

    /// Lowest price to include
    #[arg(long, value_parser = parse_price)]
    pub min_price: Option<f64>,

    /// Highest price to include
    #[arg(long, value_parser = parse_price)]
    pub max_price: Option<f64>,

    /// Lowest rating to include (0-5)
    #[arg(long, value_parser = parse_rating)]
    pub min_rating: Option<f64>,

    /// Sort order: relevance, price-asc, price-desc, rating-desc
    #[arg(long, short = 's', default_value_t = SortMode::Relevance)]
    pub sort: SortMode,
}

fn parse_price(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.parse().map_err(|_| format!("'{raw}' is not a number"))?;
    check_price(value)
}

fn parse_rating(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.parse().map_err(|_| format!("'{raw}' is not a number"))?;
    check_rating(value)
}

/// Shared with the interactive price prompt.
pub(crate) fn check_price(value: f64) -> Result<f64, String> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err("price must be zero or more".into())
    }
}

/// Shared with the interactive rating prompt.
pub(crate) fn check_rating(value: f64) -> Result<f64, String> {
    if (0.0..=5.0).contains(&value) {
        Ok(value)
    } else {
        Err("rating must be between 0 and 5".into())
    }
}

// ── Products ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// List products matching the filters
    #[command(alias = "ls")]
    List(FilterArgs),

    /// Show one product in detail
    Get {
        /// Product ID
        id: ProductId,
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
    /// Create the config file with guided setup
    Init {
        /// Write the defaults without prompting
        #[arg(long)]
        defaults: bool,
    },

    /// Display the current resolved configuration
    Show,

    /// Print the config file location
    Path,

    /// Set a configuration value
    Set {
        /// Config key (endpoint, limit, timeout, cache_ttl, offline, output, color)
        key: String,

        /// Value to set
        value: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_list_filters() {
        let cli = Cli::try_parse_from([
            "vitrine", "products", "ls", "-Q", "jacket", "-C", "jewelery", "-C", "electronics",
            "--max-price", "50", "--sort", "price-desc",
        ])
        .unwrap();
        let Command::Products(ProductsArgs {
            command: ProductsCommand::List(filter),
        }) = cli.command
        else {
            panic!("expected products list");
        };
        assert_eq!(filter.query.as_deref(), Some("jacket"));
        assert_eq!(filter.category, vec!["jewelery", "electronics"]);
        assert_eq!(filter.max_price, Some(50.0));
        assert_eq!(filter.min_price, None);
        assert_eq!(filter.sort, SortMode::PriceDesc);
    }

    #[test]
    fn rejects_out_of_range_rating() {
        let result = Cli::try_parse_from(["vitrine", "products", "list", "--min-rating", "6"]);
        assert!(result.is_err());
    }

    #[test]
    fn bound_checks_reject_out_of_range_values() {
        assert!(check_price(0.0).is_ok());
        assert!(check_price(-0.01).is_err());
        assert!(check_price(f64::NAN).is_err());
        assert!(check_rating(4.5).is_ok());
        assert!(check_rating(5.5).is_err());
    }

    #[test]
    fn rejects_unknown_sort() {
        let result = Cli::try_parse_from(["vitrine", "browse", "--sort", "cheapest"]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_product_id() {
        let cli = Cli::try_parse_from(["vitrine", "-o", "json", "products", "get", "7"]).unwrap();
        assert_eq!(cli.global.output_format(), OutputFormat::Json);
        assert!(matches!(
            cli.command,
            Command::Products(ProductsArgs {
                command: ProductsCommand::Get { id }
            }) if id == ProductId::new(7)
        ));
    }
}
