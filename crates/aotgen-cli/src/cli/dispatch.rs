//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::generate::GenerateArgs;

pub struct GenerateParams {
    pub paths: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub indent: usize,
    pub crlf: bool,
    pub no_header: bool,
    pub color: ColorChoice,
}

impl GenerateParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            paths: parse_paths(m),
            output: m.get_one::<PathBuf>("output").cloned(),
            indent: m.get_one::<usize>("indent").copied().unwrap_or(4),
            crlf: m.get_flag("crlf"),
            no_header: m.get_flag("no_header"),
            color: parse_color(m),
        }
    }
}

impl From<GenerateParams> for GenerateArgs {
    fn from(p: GenerateParams) -> Self {
        Self {
            paths: p.paths,
            output: p.output,
            indent: p.indent,
            crlf: p.crlf,
            header: !p.no_header,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub paths: Vec<PathBuf>,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            paths: parse_paths(m),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            paths: p.paths,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub paths: Vec<PathBuf>,
    pub schema: Option<String>,
    pub json: bool,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            paths: parse_paths(m),
            schema: m.get_one::<String>("schema").cloned(),
            json: m.get_flag("json"),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            paths: p.paths,
            schema: p.schema,
            json: p.json,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_paths(m: &ArgMatches) -> Vec<PathBuf> {
    m.get_many::<PathBuf>("paths")
        .map(|paths| paths.cloned().collect())
        .unwrap_or_default()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
