//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Interactive tree selector: walk a namespace/secrets/value hierarchy and toggle values
#[derive(Parser, Debug)]
#[command(name = "clitree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug level, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Config file layered over the global one
    #[arg(long, global = true, value_hint = ValueHint::FilePath, env = "CLITREE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colors
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Select values interactively and print the selected names
    Select {
        /// Hierarchy file (TOML), built-in demo data if omitted
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Print the whole hierarchy
    Show {
        /// Hierarchy file (TOML), built-in demo data if omitted
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented config template
    Template,
    /// Show the global config file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_select_with_file_and_flags() {
        let cli = Cli::parse_from(["clitree", "-dd", "--no-color", "select", "-f", "tree.toml"]);
        assert_eq!(cli.debug, 2);
        assert!(cli.no_color);
        match cli.command {
            Some(Commands::Select { file }) => assert_eq!(file, Some(PathBuf::from("tree.toml"))),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_config_path() {
        let cli = Cli::parse_from(["clitree", "config", "path"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                command: ConfigCommands::Path
            })
        ));
    }
}
