use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use aotgen_compiler::SourceMap;
use walkdir::{DirEntry, WalkDir};

/// Build output directories skipped when walking a project.
const SKIPPED_DIRS: &[&str] = &["bin", "obj"];

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to walk '{path}': {source}")]
    Walk {
        path: String,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("no .cs files found in '{0}'")]
    NoSources(String),
}

/// Loads every path into one source map.
///
/// Directories are walked recursively; their `.cs` files are added in sorted
/// path order so runs are reproducible.
pub fn load_sources(paths: &[PathBuf]) -> Result<SourceMap, LoadError> {
    let mut map = SourceMap::new();
    for path in paths {
        if path.as_os_str() == "-" {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(LoadError::Stdin)?;
            map.add_stdin(&buf);
        } else if path.is_dir() {
            let files = collect_cs_files(path)?;
            if files.is_empty() {
                return Err(LoadError::NoSources(path.display().to_string()));
            }
            for file in files {
                add_file(&mut map, &file)?;
            }
        } else {
            add_file(&mut map, path)?;
        }
    }
    Ok(map)
}

/// Sorted `.cs` files under `dir`, skipping build output directories.
///
/// Symlinks are not followed, so link cycles cannot recurse.
pub fn collect_cs_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let mut out = Vec::new();
    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_skipped_dir(entry));
    for entry in walker {
        let entry = entry.map_err(|source| LoadError::Walk {
            path: source.path().unwrap_or(dir).display().to_string(),
            source,
        })?;
        if entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == "cs") {
            out.push(entry.into_path());
        }
    }
    out.sort();
    Ok(out)
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

fn add_file(map: &mut SourceMap, path: &Path) -> Result<(), LoadError> {
    let content = fs::read_to_string(path).map_err(|source| read_error(path, source))?;
    map.add_file(&path.to_string_lossy(), &content);
    Ok(())
}

fn read_error(path: &Path, source: io::Error) -> LoadError {
    LoadError::Read {
        path: path.display().to_string(),
        source,
    }
}
