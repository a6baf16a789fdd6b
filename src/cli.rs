//! Command-line arguments for the `littlepay` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::models::ProductStatus;

/// Littlepay CLI - manage concession groups and products through the Littlepay API
#[derive(Debug, Parser)]
#[command(name = "littlepay")]
#[command(about = "Command-line interface for the Littlepay API", long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Print the program version and exit
    #[arg(short = 'v', long)]
    pub version: bool,

    /// Path to a readable and writeable config file to use. File will be created if it does not exist.
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config_path: Option<PathBuf>,

    /// Command to run (defaults to `config`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Get or set configuration
    Config {
        /// Config file to make current
        #[arg(value_name = "PATH")]
        config_path: Option<PathBuf>,

        /// Overwrite the config file with defaults
        #[arg(long)]
        reset: bool,
    },

    /// Switch the active environment or participant
    Switch {
        /// The type of object to switch
        #[arg(value_enum, value_name = "TYPE")]
        switch_type: SwitchType,

        /// The new object value
        #[arg(value_name = "VALUE")]
        value: String,
    },

    /// Interact with concession groups for the active participant
    Groups(GroupsArgs),

    /// Interact with products for the active participant
    Products(ProductsArgs),
}

/// What `switch` changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SwitchType {
    /// The active environment
    Env,
    /// The active participant
    Participant,
}

/// Arguments of the `groups` command.
#[derive(Debug, Args)]
pub struct GroupsArgs {
    /// Write output in CSV format
    #[arg(long)]
    pub csv: bool,

    /// Filter for groups with matching group ID or label
    #[arg(short = 'f', long = "filter", value_name = "TERM")]
    pub terms: Vec<String>,

    #[command(subcommand)]
    pub command: Option<GroupsCommand>,
}

/// Subcommands of `groups`.
#[derive(Debug, Subcommand)]
pub enum GroupsCommand {
    /// Create a new concession group
    Create {
        /// The label for the new group
        #[arg(value_name = "LABEL")]
        label: String,
    },

    /// Remove an existing concession group
    Remove {
        /// The ID of the group to remove
        #[arg(value_name = "ID")]
        group_id: String,

        /// Don't ask for confirmation
        #[arg(long)]
        force: bool,
    },

    /// Link a product to one or more concession groups
    Link {
        /// The ID of the product to link
        #[arg(value_name = "PRODUCT_ID")]
        product_id: String,
    },

    /// Unlink a product from one or more concession groups
    Unlink {
        /// The ID of the product to unlink
        #[arg(value_name = "PRODUCT_ID")]
        product_id: String,
    },

    /// Migrate one or more concession groups
    Migrate {
        /// Don't ask for confirmation
        #[arg(long)]
        force: bool,
    },

    /// List products for one or more concession groups
    Products,

    /// List funding sources for one or more concession groups
    #[command(name = "funding-sources", alias = "funding_sources")]
    FundingSources,
}

/// Arguments of the `products` command.
#[derive(Debug, Args)]
pub struct ProductsArgs {
    /// Write output in CSV format
    #[arg(long)]
    pub csv: bool,

    /// Filter for products with matching product ID, code, or description
    #[arg(short = 'f', long = "filter", value_name = "TERM")]
    pub terms: Vec<String>,

    /// Filter for products with matching status
    #[arg(short = 's', long = "status", value_enum)]
    pub status: Option<ProductStatus>,

    #[command(subcommand)]
    pub command: Option<ProductsCommand>,
}

/// Subcommands of `products`.
#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// Link one or more products to a concession group
    Link {
        /// The ID of the group to link to
        #[arg(value_name = "GROUP_ID")]
        group_id: String,
    },

    /// Unlink one or more products from a concession group
    Unlink {
        /// The ID of the group to unlink from
        #[arg(value_name = "GROUP_ID")]
        group_id: String,
    },
}
