//! Tests for CLI argument matching and params extraction.

use std::path::PathBuf;

use super::*;
use crate::cli::commands::{check_command, dump_command, generate_command};

#[test]
fn generate_collects_every_path() {
    let m = generate_command()
        .try_get_matches_from(["generate", "Schema.cs", "src/", "-o", "out"])
        .unwrap();
    let params = GenerateParams::from_matches(&m);

    assert_eq!(
        params.paths,
        [PathBuf::from("Schema.cs"), PathBuf::from("src/")]
    );
    assert_eq!(params.output, Some(PathBuf::from("out")));
    assert_eq!(params.indent, 4);
    assert!(!params.crlf);
    assert!(!params.no_header);
    assert_eq!(params.color, ColorChoice::Auto);
}

#[test]
fn generate_formatting_flags_reach_the_config() {
    let m = generate_command()
        .try_get_matches_from([
            "generate",
            "Schema.cs",
            "--indent",
            "2",
            "--crlf",
            "--no-header",
            "--color",
            "never",
        ])
        .unwrap();
    let params = GenerateParams::from_matches(&m);
    assert_eq!(params.indent, 2);
    assert_eq!(params.color, ColorChoice::Never);

    let args: crate::commands::generate::GenerateArgs = params.into();
    assert!(args.crlf);
    assert!(!args.header);
    assert!(!args.color);
}

#[test]
fn generate_requires_a_path() {
    let result = generate_command().try_get_matches_from(["generate"]);
    assert!(result.is_err());
}

#[test]
fn generate_rejects_non_numeric_indent() {
    let result =
        generate_command().try_get_matches_from(["generate", "Schema.cs", "--indent", "wide"]);
    assert!(result.is_err());
}

#[test]
fn check_strict_flag() {
    let m = check_command()
        .try_get_matches_from(["check", "src/", "--strict", "--color", "always"])
        .unwrap();
    let params = CheckParams::from_matches(&m);
    assert_eq!(params.paths, [PathBuf::from("src/")]);
    assert!(params.strict);
    assert_eq!(params.color, ColorChoice::Always);
}

#[test]
fn check_rejects_output_flag() {
    let result = check_command().try_get_matches_from(["check", "src/", "-o", "out"]);
    assert!(result.is_err());
}

#[test]
fn dump_schema_filter_and_json() {
    let m = dump_command()
        .try_get_matches_from(["dump", "src/", "--schema", "Demo.Schema", "--json"])
        .unwrap();
    let params = DumpParams::from_matches(&m);
    assert_eq!(params.schema.as_deref(), Some("Demo.Schema"));
    assert!(params.json);
}

#[test]
fn color_rejects_unknown_values() {
    let result = dump_command().try_get_matches_from(["dump", "src/", "--color", "sometimes"]);
    assert!(result.is_err());
}

#[test]
fn verbose_is_accepted_after_the_subcommand() {
    let m = build_cli()
        .try_get_matches_from(["aotgen", "check", "src/", "-vv"])
        .unwrap();
    assert_eq!(m.get_count("verbose"), 2);
    assert_eq!(m.subcommand_name(), Some("check"));
}

#[test]
fn verbose_defaults_to_zero() {
    let m = build_cli()
        .try_get_matches_from(["aotgen", "dump", "src/"])
        .unwrap();
    assert_eq!(m.get_count("verbose"), 0);
}

#[test]
fn help_lists_every_command() {
    let help = build_cli().render_help().to_string();
    assert!(help.contains("generate"));
    assert!(help.contains("check"));
    assert!(help.contains("dump"));
}
