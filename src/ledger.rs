use crate::error::{Error, Result};
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// An append-only record of the tweet IDs we've already handled, one per line.
///
/// The file is never truncated or rewritten. Each ID is written as soon as it is handled, so a run
/// that fails part of the way through keeps its progress.
pub struct Ledger {
    path: PathBuf,
    file: File,
    handled: HashSet<u64>,
    // Set when the file doesn't end with a line break, so the next append would join the last ID.
    needs_newline: bool,
}

impl Ledger {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Ledger> {
        let path = path.as_ref().to_path_buf();
        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&path)
            .map_err(|source| Error::LedgerIo {
                path: path.clone(),
                source,
            })?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|source| Error::LedgerIo {
                path: path.clone(),
                source,
            })?;

        let handled = Self::parse(&path, &contents)?;
        let needs_newline = !contents.is_empty() && !contents.ends_with('\n');

        log::debug!("Loaded {} handled IDs from {:?}", handled.len(), path);

        Ok(Ledger {
            path,
            file,
            handled,
            needs_newline,
        })
    }

    fn parse(path: &Path, contents: &str) -> Result<HashSet<u64>> {
        contents
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty())
            .map(|(line, value)| {
                value.parse::<u64>().map_err(|_| Error::LedgerEntry {
                    path: path.to_path_buf(),
                    line,
                    value: value.to_string(),
                })
            })
            .collect()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.handled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handled.is_empty()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.handled.contains(&id)
    }

    /// Append an ID to the file.
    pub fn record(&mut self, id: u64) -> Result<()> {
        let line = if self.needs_newline {
            format!("\n{}\n", id)
        } else {
            format!("{}\n", id)
        };

        self.file
            .write_all(line.as_bytes())
            .and_then(|_| self.file.flush())
            .map_err(|source| Error::LedgerIo {
                path: self.path.clone(),
                source,
            })?;

        self.needs_newline = false;
        self.handled.insert(id);

        Ok(())
    }
}
