//! Argument parsing tests for the bstheight CLI

use std::path::PathBuf;

use bstheight::cli::args::{Cli, Commands, ConfigCommands};
use bstheight::Strategy;
use clap::Parser;

#[test]
fn given_height_with_inline_tree_when_parsed_then_fields_set() {
    let cli = Cli::try_parse_from([
        "bstheight", "-dd", "height", "--tree", "a b c", "--strategy", "queue", "--max-depth", "5",
    ])
    .unwrap();
    assert_eq!(cli.debug, 2);
    match cli.command {
        Some(Commands::Height {
            source,
            strategy,
            max_depth,
        }) => {
            assert_eq!(source.tree.as_deref(), Some("a b c"));
            assert!(source.file.is_none());
            assert_eq!(strategy, Some(Strategy::Queue));
            assert_eq!(max_depth, Some(5));
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn given_file_and_inline_tree_when_parsed_then_conflict() {
    let result = Cli::try_parse_from(["bstheight", "tree", "x.tree", "--tree", "1 2"]);
    assert!(result.is_err());
}

#[test]
fn given_unknown_strategy_when_parsed_then_error() {
    let result = Cli::try_parse_from(["bstheight", "height", "-s", "sideways"]);
    assert!(result.is_err());
}

#[test]
fn given_global_config_flag_after_subcommand_when_parsed_then_accepted() {
    let cli = Cli::try_parse_from(["bstheight", "config", "show", "--config", "local.toml"]).unwrap();
    assert_eq!(cli.config, Some(PathBuf::from("local.toml")));
    assert!(matches!(
        cli.command,
        Some(Commands::Config {
            command: ConfigCommands::Show
        })
    ));
}

#[test]
fn given_leaves_with_file_when_parsed_then_file_set() {
    let cli = Cli::try_parse_from(["bstheight", "leaves", "tests/resources/trees/scenario.tree"]).unwrap();
    match cli.command {
        Some(Commands::Leaves { source }) => {
            assert_eq!(source.file, Some(PathBuf::from("tests/resources/trees/scenario.tree")));
        }
        other => panic!("unexpected command: {:?}", other),
    }
}
