//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, KeyMap, Session};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{Renderer, TreeBuilder};
use crate::infrastructure::terminal::run_session;
use crate::sample::Catalog;
use crate::tree_traits::TreeNodeConvert;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }
    match &cli.command {
        Some(Commands::Select { file }) => select(cli, file.as_deref()),
        Some(Commands::Show { file }) => show(file.as_deref()),
        Some(Commands::Config { command }) => config(cli, command),
        Some(Commands::Completion { shell }) => completion(*shell),
        None => Err(CliError::Usage(
            "no command given, see `clitree --help`".to_string(),
        )),
    }
}

fn load_catalog(file: Option<&Path>) -> CliResult<Catalog> {
    match file {
        Some(path) => Ok(Catalog::load(path)?),
        None => {
            debug!("no hierarchy file, using demo data");
            Ok(Catalog::demo())
        }
    }
}

#[instrument(skip(cli))]
fn select(cli: &Cli, file: Option<&Path>) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    let mut theme = settings.theme.to_theme()?;
    if cli.no_color {
        theme.color = false;
    }
    let keymap = KeyMap::from_settings(&settings.keys)?;
    let catalog = load_catalog(file)?;

    let mut session = Session::new(catalog.items(), Renderer::new(theme), keymap)?;
    run_session(&mut session)?;

    let selected = catalog.selected();
    if selected.is_empty() {
        output::note("nothing selected");
    }
    for name in selected {
        output::info(&name);
    }
    Ok(())
}

#[instrument]
fn show(file: Option<&Path>) -> CliResult<()> {
    let catalog = load_catalog(file)?;
    let title = file
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "demo".to_string());
    let tree = TreeBuilder::new()
        .build_tree(catalog.items().into())
        .map_err(ApplicationError::from)?;
    output::info(&tree.to_tree_string(&title));
    Ok(())
}

fn config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(cli.config.as_deref())?;
            output::info(settings.to_toml()?.trim_end());
        }
        ConfigCommands::Template => output::info(Settings::template().trim_end()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => {
                return Err(CliError::Usage(
                    "cannot determine config directory".to_string(),
                ))
            }
        },
    }
    Ok(())
}

fn completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
