use clap::Parser;
use sgacrawl::cli::{Cli, Commands, EXAMPLE_CONFIG};
use std::path::PathBuf;

#[test]
fn test_no_subcommand_runs_check() {
    let cli = Cli::try_parse_from(["sgacrawl", "--config", "crawl.yaml"]).unwrap();
    assert_eq!(cli.config, PathBuf::from("crawl.yaml"));
    assert!(matches!(cli.command.unwrap_or_default(), Commands::Check));
}

#[test]
fn test_parse_example() {
    let cli = Cli::try_parse_from(["sgacrawl", "example", "--json"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Example)));
    assert!(cli.json);
}

#[test]
fn test_init_defaults_to_current_dir() {
    let cli = Cli::try_parse_from(["sgacrawl", "init"]).unwrap();
    match cli.command {
        Some(Commands::Init(args)) => {
            assert!(!args.force);
            assert_eq!(args.path, PathBuf::from("."));
        }
        other => panic!("Expected init command, got {other:?}"),
    }
}

#[test]
fn test_unknown_subcommand_rejected() {
    assert!(Cli::try_parse_from(["sgacrawl", "crawl-now"]).is_err());
}

#[test]
fn test_long_help_embeds_example() {
    let err = Cli::try_parse_from(["sgacrawl", "--help"]).unwrap_err();
    let help = err.to_string();
    assert!(help.contains("Configure with a .sgacrawl.yaml file"));
    assert!(help.contains(EXAMPLE_CONFIG.lines().find(|l| l.contains("classBufferMax")).unwrap().trim()));
}
