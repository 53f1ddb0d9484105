use std::fmt::Display;
use std::io::{self, Read, Write};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::builder::TreeBuilder;
use crate::cli::args::{Cli, Commands, ConfigCommands, TreeSource};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::height::{measure, Strategy};
use crate::node::Node;
use crate::tree_queue::levels;
use crate::tree_traits::render;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let stdout = io::stdout();
    execute_command_with(cli, &mut stdout.lock())
}

/// Runs a command, writing its data output to `out`.
///
/// Warnings and errors still go to stderr.
pub fn execute_command_with(cli: &Cli, out: &mut impl Write) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);

    match &cli.command {
        Some(Commands::Height {
            source,
            strategy,
            max_depth,
        }) => _height(settings, source, *strategy, *max_depth, out),
        Some(Commands::Tree { source }) => _tree(settings, source, out),
        Some(Commands::Leaves { source }) => _leaves(settings, source, out),
        Some(Commands::Levels { source }) => _levels(settings, source, out),
        Some(Commands::Config { command }) => _config(&settings, cli, command, out),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, out);
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see --help".to_string(),
        )),
    }
}

fn emit(out: &mut impl Write, msg: &(impl Display + ?Sized)) -> CliResult<()> {
    writeln!(out, "{}", msg).map_err(|e| CliError::io("write output", e))
}

/// Reads and parses the tree and measures it against the depth limit.
#[instrument(level = "debug", skip(settings))]
fn load_tree(settings: &Settings, source: &TreeSource) -> CliResult<(Option<Node<String>>, i64)> {
    let builder = TreeBuilder::new(settings.clone());
    let tree = match (&source.tree, &source.file) {
        (Some(inline), _) => builder.build_from_str(inline)?,
        (None, Some(path)) => builder.build_from_file(path)?,
        (None, None) => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .map_err(|e| CliError::io("read stdin", e))?;
            builder.build_from_str(&input)?
        }
    };
    let height = measure(tree.as_ref(), settings)?;
    Ok((tree, height))
}

#[instrument(level = "debug", skip(settings, out))]
fn _height(
    mut settings: Settings,
    source: &TreeSource,
    strategy: Option<Strategy>,
    max_depth: Option<usize>,
    out: &mut impl Write,
) -> CliResult<()> {
    if let Some(strategy) = strategy {
        settings.strategy = strategy;
    }
    if let Some(max_depth) = max_depth {
        settings.max_depth = (max_depth != 0).then_some(max_depth);
    }
    let (_, height) = load_tree(&settings, source)?;
    emit(out, &height)
}

#[instrument(level = "debug", skip(settings, out))]
fn _tree(settings: Settings, source: &TreeSource, out: &mut impl Write) -> CliResult<()> {
    match load_tree(&settings, source)?.0 {
        Some(tree) => emit(out, &render(&tree)?),
        None => {
            output::warning("Empty tree");
            Ok(())
        }
    }
}

#[instrument(level = "debug", skip(settings, out))]
fn _leaves(settings: Settings, source: &TreeSource, out: &mut impl Write) -> CliResult<()> {
    if let (Some(tree), _) = load_tree(&settings, source)? {
        for leaf in tree.leaves() {
            emit(out, leaf)?;
        }
    }
    Ok(())
}

#[instrument(level = "debug", skip(settings, out))]
fn _levels(settings: Settings, source: &TreeSource, out: &mut impl Write) -> CliResult<()> {
    let (tree, _) = load_tree(&settings, source)?;
    for (depth, level) in levels(tree.as_ref()).iter().enumerate() {
        let values: Vec<&str> = level.iter().map(|v| v.as_str()).collect();
        emit(out, &format!("{}: {}", depth, values.join(" ")))?;
    }
    Ok(())
}

fn _config(
    settings: &Settings,
    cli: &Cli,
    command: &ConfigCommands,
    out: &mut impl Write,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let rendered = toml::to_string_pretty(settings)
                .map_err(|e| CliError::Usage(format!("cannot render settings: {}", e)))?;
            emit(out, &rendered)?;
        }
        ConfigCommands::Path => {
            output::header("Config files");
            match global_config_path() {
                Some(path) => {
                    let state = if path.exists() { "" } else { " (not found)" };
                    emit(out, &format!("global: {}{}", path.display(), state))?;
                }
                None => emit(out, "global: unavailable (no home directory)")?,
            }
            if let Some(path) = &cli.config {
                emit(out, &format!("local:  {}", path.display()))?;
            }
        }
    }
    Ok(())
}
