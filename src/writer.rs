//! All-or-nothing output of rendered files
//!
//! Every file is first written to a hidden temporary sibling. Only when all of
//! them were written are they renamed into place. Files being replaced are kept
//! as backups until the last rename succeeded, and are put back if one fails.
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::render::RenderedFile;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("could not create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not move {} into place: {source}", path.display())]
    Rename {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

struct Staged {
    temp: PathBuf,
    backup: PathBuf,
    target: PathBuf,
}

fn hidden_path(out_dir: &Path, file_name: &str, extension: &str) -> PathBuf {
    out_dir.join(format!(".{file_name}.{extension}"))
}

fn discard(staged: &[Staged]) {
    for file in staged {
        if let Err(e) = fs::remove_file(&file.temp) {
            log::warn!("Could not remove {}: {e}", file.temp.display());
        }
    }
}

/// Move one staged file into place, returning whether a previous file was backed up
fn replace(file: &Staged) -> std::io::Result<bool> {
    let backed_up = fs::symlink_metadata(&file.target).map_or(false, |m| m.is_file());
    if backed_up {
        fs::rename(&file.target, &file.backup)?;
    }
    if let Err(e) = fs::rename(&file.temp, &file.target) {
        if backed_up {
            if let Err(e) = fs::rename(&file.backup, &file.target) {
                log::warn!("Could not restore {}: {e}", file.target.display());
            }
        }
        return Err(e);
    }
    Ok(backed_up)
}

fn roll_back(committed: &[(&Staged, bool)]) {
    for (file, backed_up) in committed.iter().rev() {
        let restored = if *backed_up {
            fs::rename(&file.backup, &file.target)
        } else {
            fs::remove_file(&file.target)
        };
        if let Err(e) = restored {
            log::warn!("Could not restore {}: {e}", file.target.display());
        }
    }
}

/// Write `files` into `out_dir`, returning the paths written
pub fn write_all(out_dir: &Path, files: &[RenderedFile]) -> Result<Vec<PathBuf>, WriteError> {
    fs::create_dir_all(out_dir).map_err(|source| WriteError::CreateDir {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let mut staged = Vec::with_capacity(files.len());
    for file in files {
        let temp = hidden_path(out_dir, &file.file_name, "tmp");
        if let Err(source) = fs::write(&temp, &file.contents) {
            discard(&staged);
            return Err(WriteError::Write { path: temp, source });
        }
        staged.push(Staged {
            temp,
            backup: hidden_path(out_dir, &file.file_name, "bak"),
            target: out_dir.join(&file.file_name),
        });
    }

    let mut committed = Vec::with_capacity(staged.len());
    for (i, file) in staged.iter().enumerate() {
        match replace(file) {
            Ok(backed_up) => committed.push((file, backed_up)),
            Err(source) => {
                discard(&staged[i..]);
                roll_back(&committed);
                return Err(WriteError::Rename {
                    path: file.target.clone(),
                    source,
                });
            }
        }
    }

    for (file, backed_up) in &committed {
        if *backed_up {
            if let Err(e) = fs::remove_file(&file.backup) {
                log::warn!("Could not remove {}: {e}", file.backup.display());
            }
        }
        log::debug!("Wrote {}", file.target.display());
    }
    Ok(staged.into_iter().map(|file| file.target).collect())
}
