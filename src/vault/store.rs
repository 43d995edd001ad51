//! Directory-backed vault persistence.
//!
//! `VaultStore` maps vault names to `<dir>/<name>.json` files. It reads
//! and writes whole records only; all cryptography happens on the
//! `VaultRecord` before `save` or after `load`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::format;
use super::record::{validate_vault_name, VaultRecord};
use crate::errors::{LockboxError, Result};

/// File extension of vault files.
const EXTENSION: &str = "json";

/// A directory of vault files.
#[derive(Debug, Clone)]
pub struct VaultStore {
    dir: PathBuf,
}

/// Result of scanning the vault directory.
#[derive(Debug, Default)]
pub struct VaultScan {
    /// Vaults that parsed cleanly, sorted by name.
    pub vaults: Vec<VaultRecord>,
    /// Files that could not be read or parsed. They are excluded from
    /// every other operation.
    pub unreadable: Vec<UnreadableVault>,
}

/// A vault file that failed to load.
#[derive(Debug)]
pub struct UnreadableVault {
    pub path: PathBuf,
    pub error: LockboxError,
}

impl VaultStore {
    /// Use `dir` as the vault directory. Nothing is created until the
    /// first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the vault directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Build the file path for a vault name.
    ///
    /// Example: `vaults/personal.json`
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        validate_vault_name(name)?;
        Ok(self.dir.join(format!("{name}.{EXTENSION}")))
    }

    /// Returns `true` if a vault file with this name exists.
    pub fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.path_for(name)?.exists())
    }

    /// Persist a freshly created vault, refusing to overwrite.
    pub fn create(&self, record: &VaultRecord) -> Result<PathBuf> {
        let path = self.path_for(&record.name)?;
        if path.exists() {
            return Err(LockboxError::VaultAlreadyExists(path));
        }
        self.save(record)
    }

    /// Serialize the whole record and replace its file atomically.
    pub fn save(&self, record: &VaultRecord) -> Result<PathBuf> {
        let path = self.path_for(&record.name)?;

        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
            debug!(dir = %self.dir.display(), "created vault directory");
        }

        let bytes = record.to_json()?;
        format::write_atomic(&path, &bytes)?;

        debug!(
            vault = %record.name,
            secrets = record.secret_count(),
            "vault written"
        );
        Ok(path)
    }

    /// Read and parse one vault.
    pub fn load(&self, name: &str) -> Result<VaultRecord> {
        let path = self.path_for(name)?;
        if !path.exists() {
            return Err(LockboxError::VaultNotFound(path));
        }

        let record = read_record(&path)?;
        check_file_name(&path, &record, name)?;
        Ok(record)
    }

    /// Delete a vault file.
    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self.path_for(name)?;
        if !path.exists() {
            return Err(LockboxError::VaultNotFound(path));
        }
        fs::remove_file(&path)?;
        debug!(vault = %name, "vault deleted");
        Ok(())
    }

    /// Load every `*.json` file in the directory.
    ///
    /// A missing directory yields an empty scan. Files that fail to parse
    /// are collected in `unreadable` rather than aborting the scan.
    pub fn scan(&self) -> Result<VaultScan> {
        let mut scan = VaultScan::default();
        if !self.dir.exists() {
            return Ok(scan);
        }

        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().map_or(true, |ext| ext != EXTENSION) {
                continue;
            }

            let loaded = read_record(&path).and_then(|record| {
                let stem = path.file_stem().unwrap_or_default().to_string_lossy();
                check_file_name(&path, &record, &stem)?;
                Ok(record)
            });

            match loaded {
                Ok(record) => scan.vaults.push(record),
                Err(error) => {
                    warn!(path = %path.display(), %error, "skipping unreadable vault file");
                    scan.unreadable.push(UnreadableVault { path, error });
                }
            }
        }

        scan.vaults.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(scan)
    }
}

fn read_record(path: &Path) -> Result<VaultRecord> {
    let bytes = fs::read(path)?;
    VaultRecord::from_json(&bytes)
}

/// A vault file must be named after the vault it holds.
fn check_file_name(path: &Path, record: &VaultRecord, expected: &str) -> Result<()> {
    if record.name != expected {
        return Err(LockboxError::EncodingFailed(format!(
            "file {} holds vault '{}'",
            path.display(),
            record.name
        )));
    }
    Ok(())
}
