//! Tests for command-line argument parsing
//!
//! Note: These tests verify the argument parser configuration by creating
//! a test parser with the same structure as the main application.

use clap::{Arg, ArgAction, Command as ClapCommand};
use std::path::PathBuf;

/// Create a command with the same argument structure as the main binary
fn create_test_command() -> ClapCommand {
    ClapCommand::new("skin-metrics")
        .version("0.1.0")
        .about("Skin metrics from image frames")
        .arg(
            Arg::new("frames")
                .value_name("FRAMES")
                .num_args(1..)
                .value_parser(clap::value_parser!(PathBuf))
                .required_unless_present("print-config")
                .help("Image frames to analyze, in stream order"),
        )
        .arg(
            Arg::new("landmarks")
                .short('l')
                .long("landmarks")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Landmark file applied to every frame"),
        )
        .arg(
            Arg::new("config")
                .short('C')
                .long("config")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Configuration file path"),
        )
        .arg(
            Arg::new("filter")
                .short('f')
                .long("filter")
                .value_name("SPEC")
                .help("Smoother override"),
        )
        .arg(
            Arg::new("normalize-lighting")
                .long("normalize-lighting")
                .action(ArgAction::SetTrue)
                .help("Normalize lighting before analysis"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("N")
                .value_parser(clap::value_parser!(u64))
                .help("Seed for reproducible fallback jitter"),
        )
        .arg(
            Arg::new("no-jitter")
                .long("no-jitter")
                .action(ArgAction::SetTrue)
                .help("Disable fallback jitter"),
        )
        .arg(
            Arg::new("print-config")
                .long("print-config")
                .action(ArgAction::SetTrue)
                .help("Print the effective configuration and exit"),
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .action(ArgAction::SetTrue)
                .help("Enable debug output"),
        )
}

#[test]
fn test_help_argument() {
    let cmd = create_test_command();
    let result = cmd.try_get_matches_from(vec!["skin-metrics", "--help"]);

    // Help should cause an error (but a specific help error)
    assert!(result.is_err());
    let err = result.unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}

#[test]
fn test_no_arguments() {
    let cmd = create_test_command();
    let result = cmd.try_get_matches_from(vec!["skin-metrics"]);

    // Frames are required
    assert!(result.is_err());
    assert_eq!(result.unwrap_err().kind(), clap::error::ErrorKind::MissingRequiredArgument);
}

#[test]
fn test_print_config_without_frames() {
    let cmd = create_test_command();
    let matches = cmd.try_get_matches_from(vec!["skin-metrics", "--print-config"]).unwrap();
    assert!(matches.get_flag("print-config"));
    assert!(matches.get_many::<PathBuf>("frames").is_none());
}

#[test]
fn test_multiple_frames_keep_order() {
    let cmd = create_test_command();
    let matches = cmd
        .try_get_matches_from(vec!["skin-metrics", "b.png", "a.png", "c.jpg"])
        .unwrap();

    let frames: Vec<&PathBuf> = matches.get_many::<PathBuf>("frames").unwrap().collect();
    assert_eq!(frames, vec![&PathBuf::from("b.png"), &PathBuf::from("a.png"), &PathBuf::from("c.jpg")]);
}

#[test]
fn test_filter_arguments() {
    let filters = vec!["none", "exponential", "exponential:0.3", "moving_average", "moving_average:7"];

    for filter in filters {
        let cmd = create_test_command();
        let result = cmd.try_get_matches_from(vec!["skin-metrics", "--filter", filter, "frame.png"]);

        assert!(result.is_ok(), "Should accept filter: {}", filter);
        let matches = result.unwrap();
        assert_eq!(matches.get_one::<String>("filter").map(|s| s.as_str()), Some(filter));
    }
}

#[test]
fn test_seed_must_be_numeric() {
    let cmd = create_test_command();
    assert!(cmd
        .try_get_matches_from(vec!["skin-metrics", "--seed", "abc", "frame.png"])
        .is_err());

    let cmd = create_test_command();
    let matches = cmd
        .try_get_matches_from(vec!["skin-metrics", "--seed", "42", "frame.png"])
        .unwrap();
    assert_eq!(matches.get_one::<u64>("seed"), Some(&42));
}

#[test]
fn test_boolean_flags() {
    let flags = vec!["--normalize-lighting", "--no-jitter", "--debug"];

    for flag in flags {
        let cmd = create_test_command();
        let result = cmd.try_get_matches_from(vec!["skin-metrics", flag, "frame.png"]);

        assert!(result.is_ok(), "Should accept flag: {}", flag);
        let matches = result.unwrap();
        let flag_name = flag.trim_start_matches("--");
        assert!(matches.get_flag(flag_name), "Flag {} should be set", flag);
    }
}

#[test]
fn test_combined_arguments() {
    let cmd = create_test_command();
    let result = cmd.try_get_matches_from(vec![
        "skin-metrics",
        "--landmarks",
        "face.json",
        "-C",
        "config.yaml",
        "--filter",
        "moving_average:3",
        "--normalize-lighting",
        "frame1.png",
        "frame2.png",
    ]);

    assert!(result.is_ok());
    let matches = result.unwrap();
    assert_eq!(matches.get_one::<PathBuf>("landmarks"), Some(&PathBuf::from("face.json")));
    assert_eq!(matches.get_one::<PathBuf>("config"), Some(&PathBuf::from("config.yaml")));
    assert!(matches.get_flag("normalize-lighting"));
    assert_eq!(matches.get_many::<PathBuf>("frames").unwrap().count(), 2);
}

#[test]
fn test_invalid_argument() {
    let cmd = create_test_command();
    let result = cmd.try_get_matches_from(vec!["skin-metrics", "--cam", "0", "frame.png"]);

    assert!(result.is_err());
    assert_eq!(result.unwrap_err().kind(), clap::error::ErrorKind::UnknownArgument);
}
