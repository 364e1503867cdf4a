//! Directory import: reads every selected search data file in a Doxygen `search/` directory.

use std::{fs, path::Path};

use apidex_config::{CompiledPatterns, Source};
use apidex_index::Declaration;
use tracing::{debug, warn};

use crate::{
    category::{Category, FileClass, classify_file},
    error::ImportError,
    fingerprint::Fingerprint,
    parser::parse,
    rows::read_rows,
};

/// Declarations read from a search directory.
#[derive(Debug, Clone, Default)]
pub struct Import {
    /// Declarations in file-name order, then file order.
    pub declarations: Vec<Declaration>,
    /// Fingerprint of every file read.
    pub fingerprint: String,
    /// Search data files read.
    pub files_read: usize,
    /// Search data files of skipped or unknown categories.
    pub files_skipped: usize,
}

/// Imports the directory named by a configured source.
pub fn import_source(source: &Source) -> Result<Import, ImportError> {
    let patterns = source.compile_patterns()?;
    import_dir(&source.path, &patterns)
}

/// Imports every search data file in `dir` selected by `patterns`.
///
/// Files are read in sorted file-name order so the result is deterministic.
pub fn import_dir(dir: &Path, patterns: &CompiledPatterns) -> Result<Import, ImportError> {
    let read_dir_err = |source| ImportError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        if entry.path().is_file()
            && let Ok(name) = entry.file_name().into_string()
        {
            names.push(name);
        }
    }
    names.sort();

    let mut import = Import::default();
    let mut fingerprint = Fingerprint::new();

    for name in names {
        if !patterns.matches(Path::new(&name)) {
            continue;
        }
        let category = match classify_file(&name) {
            FileClass::Indexed(category) => category,
            FileClass::Skipped(category) => {
                debug!(file = %name, category, "skipping search data category");
                import.files_skipped += 1;
                continue;
            }
            FileClass::Unknown(category) => {
                warn!(file = %name, category, "unknown search data category");
                import.files_skipped += 1;
                continue;
            }
            FileClass::NotData => continue,
        };

        let path = dir.join(&name);
        let contents = fs::read_to_string(&path).map_err(|source| ImportError::ReadFile {
            path: path.clone(),
            source,
        })?;
        fingerprint.add(&name, contents.as_bytes());
        import
            .declarations
            .extend(parse_search_file(&path, &contents, category)?);
        import.files_read += 1;
    }

    import.fingerprint = fingerprint.finish();
    debug!(
        dir = %dir.display(),
        files = import.files_read,
        skipped = import.files_skipped,
        declarations = import.declarations.len(),
        "imported search data"
    );

    Ok(import)
}

/// Parses the contents of one search data file of a known category.
pub fn parse_search_file(
    path: &Path,
    contents: &str,
    category: Category,
) -> Result<Vec<Declaration>, ImportError> {
    let value = parse(contents).map_err(|source| ImportError::Syntax {
        path: path.to_path_buf(),
        source,
    })?;
    read_rows(&value, category).map_err(|e| ImportError::Shape {
        path: path.to_path_buf(),
        row: e.row,
        message: e.message,
    })
}
