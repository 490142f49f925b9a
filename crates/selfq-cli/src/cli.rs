use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

use selfq_core::VERSION;

/// selfQ - portable, signed, multi-layer encrypted diary exports
#[derive(Parser)]
#[command(name = "selfq")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols only
    #[arg(long, global = true)]
    pub ascii: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encrypt a JSON record into a portable export file
    Protect(ProtectArgs),

    /// Verify and decrypt an export file
    Recover(RecoverArgs),

    /// Check that an export file is well-formed (no decryption)
    Check(CheckArgs),

    /// Show the structure of an export file (no decryption)
    Inspect(InspectArgs),

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

/// Which export family to use.
#[derive(Args, Debug, Clone, Default)]
pub struct FamilyArgs {
    /// Export family from the config file (story, post, ...)
    #[arg(long, value_name = "NAME")]
    pub family: Option<String>,

    /// Explicit signature tag (default version and layer count)
    #[arg(long, value_name = "TAG", conflicts_with = "family")]
    pub tag: Option<String>,
}

/// Arguments for the `protect` command
#[derive(Args)]
pub struct ProtectArgs {
    /// JSON file holding one record ("-" for stdin)
    #[arg(value_name = "RECORD")]
    pub input: String,

    /// Write the export here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,

    /// Overwrite an existing output file without asking
    #[arg(long)]
    pub force: bool,

    #[command(flatten)]
    pub family: FamilyArgs,
}

/// Arguments for the `recover` command
#[derive(Args)]
pub struct RecoverArgs {
    /// Export file ("-" for stdin)
    #[arg(value_name = "ARTIFACT")]
    pub input: String,

    /// Write the recovered record here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,

    /// Overwrite an existing output file without asking
    #[arg(long)]
    pub force: bool,

    #[command(flatten)]
    pub family: FamilyArgs,
}

/// Arguments for the `check` command
#[derive(Args)]
pub struct CheckArgs {
    /// Export file ("-" for stdin)
    #[arg(value_name = "ARTIFACT")]
    pub input: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub family: FamilyArgs,
}

/// Arguments for the `inspect` command
#[derive(Args)]
pub struct InspectArgs {
    /// Export file ("-" for stdin)
    #[arg(value_name = "ARTIFACT")]
    pub input: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    #[command(flatten)]
    pub family: FamilyArgs,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write a default config file
    Init {
        /// Replace an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Print the resolved configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_family_and_tag_conflict() {
        let result = Cli::try_parse_from([
            "selfq", "check", "a.json", "--family", "story", "--tag", "T-v1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbose_counts() {
        let cli = Cli::try_parse_from(["selfq", "-vv", "check", "a.json"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
