//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("aotgen")
        .about("Ahead-of-time schema generation for GraphQL.NET")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(generate_command())
        .subcommand(check_command())
        .subcommand(dump_command())
}

/// Generate schema sources.
pub fn generate_command() -> Command {
    Command::new("generate")
        .about("Generate schema configuration and graph type sources")
        .override_usage(
            "\
  aotgen generate <PATH>...
  aotgen generate <PATH>... -o <DIR>",
        )
        .after_help(
            r#"EXAMPLES:
  aotgen generate Schema.cs                # print sources to stdout
  aotgen generate src/ -o obj/generated    # one .g.cs file per source
  aotgen generate src/ --indent 2 --crlf   # formatting options"#,
        )
        .arg(paths_arg())
        .arg(output_dir_arg())
        .arg(indent_arg())
        .arg(crlf_arg())
        .arg(no_header_arg())
        .arg(color_arg())
}

/// Report diagnostics only.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Report diagnostics without generating sources")
        .after_help(
            r#"EXAMPLES:
  aotgen check src/                  # fail on errors
  aotgen check src/ --strict         # fail on warnings too"#,
        )
        .arg(paths_arg())
        .arg(strict_arg())
        .arg(color_arg())
}

/// Show processed schema data.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Show roots, graph types, and mappings discovered for each schema")
        .after_help(
            r#"EXAMPLES:
  aotgen dump src/                          # every schema class
  aotgen dump src/ --schema Demo.Schema     # one schema class
  aotgen dump src/ --json                   # generation entries as JSON"#,
        )
        .arg(paths_arg())
        .arg(schema_arg())
        .arg(json_arg())
        .arg(color_arg())
}
