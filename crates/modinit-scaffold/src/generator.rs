//! Directory and file generation.
//!
//! Directories are created idempotently. Files are written whole with
//! `fs::write`; there is no temp-file-and-rename and no grouping, so a
//! failure leaves whatever was already written in place.

use std::fs;
use std::path::{Path, PathBuf};

use modinit_core::{InitError, Result};
use tracing::{debug, info};

use crate::templates::{PROJECT_DIRECTORIES, PROJECT_TEMPLATES, TemplateRenderer};

/// A project directory and whether it was already present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub path: PathBuf,
    pub existed: bool,
}

/// A generated file and whether it replaced an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub replaced: bool,
    pub bytes: usize,
}

/// Create the project subdirectories under `root`.
///
/// Existing directories and their contents are left untouched.
pub fn create_directory_structure(root: &Path) -> Result<Vec<DirectoryEntry>> {
    let mut entries = Vec::with_capacity(PROJECT_DIRECTORIES.len());

    for name in PROJECT_DIRECTORIES {
        let path = root.join(name);
        let existed = path.is_dir();
        fs::create_dir_all(&path).map_err(|e| InitError::directory_creation(&path, e))?;
        debug!(path = %path.display(), existed, "directory ready");
        entries.push(DirectoryEntry { path, existed });
    }

    Ok(entries)
}

/// Fail if any generated file already exists and overwriting is disabled.
///
/// Called before anything is written so a refusal leaves the tree untouched.
pub fn ensure_writable(root: &Path, overwrite_existing: bool) -> Result<()> {
    if overwrite_existing {
        return Ok(());
    }

    match PROJECT_TEMPLATES
        .iter()
        .map(|t| root.join(t.file_name))
        .find(|path| path.exists())
    {
        Some(path) => Err(InitError::FileExists { path }),
        None => Ok(()),
    }
}

/// Write one generated file into `root`.
pub fn write_file(
    root: &Path,
    file_name: &str,
    content: &str,
    overwrite_existing: bool,
) -> Result<WrittenFile> {
    let path = root.join(file_name);
    let replaced = path.exists();
    if replaced && !overwrite_existing {
        return Err(InitError::FileExists { path });
    }

    fs::write(&path, content).map_err(|e| InitError::file_write(&path, e))?;

    debug!(path = %path.display(), replaced, "wrote file");
    Ok(WrittenFile {
        path,
        replaced,
        bytes: content.len(),
    })
}

/// Render every project template, then write them into `root`.
///
/// All templates are rendered before the first write, so a render error
/// leaves the directory untouched.
pub fn write_project_files(
    root: &Path,
    module_name: &str,
    overwrite_existing: bool,
) -> Result<Vec<WrittenFile>> {
    let renderer = TemplateRenderer::new()?;
    let rendered = PROJECT_TEMPLATES
        .iter()
        .map(|template| {
            renderer
                .render(template, module_name)
                .map(|content| (template.file_name, content))
        })
        .collect::<Result<Vec<_>>>()?;

    let files = rendered
        .iter()
        .map(|(file_name, content)| write_file(root, file_name, content, overwrite_existing))
        .collect::<Result<Vec<_>>>()?;

    info!(
        count = files.len(),
        replaced = files.iter().filter(|f| f.replaced).count(),
        "generated project files"
    );
    Ok(files)
}
