use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{MemoryZoneStore, ZoneStore};
use crate::domain::{NewZone, Zone, ZonePatch};
use crate::error::{StoreError, ZoneError};

const STORE_VERSION: u32 = 1;

/// On-disk layout of a zone file
#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    zones: Vec<Zone>,
}

/// Zone store persisted to a JSON file
///
/// The whole file is rewritten after every mutation. Writes go to a sibling
/// temporary file which is then renamed over the original, so readers see
/// either the old or the new snapshot.
#[derive(Debug)]
pub struct JsonZoneStore {
    path: PathBuf,
    inner: MemoryZoneStore,
}

impl JsonZoneStore {
    /// Open a store, starting empty if the file does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let zones = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            let file: StoreFile =
                serde_json::from_str(&contents).map_err(|source| StoreError::Format {
                    path: path.clone(),
                    source,
                })?;
            if file.version != STORE_VERSION {
                log::warn!(
                    "Zone store {} has version {}, expected {}",
                    path.display(),
                    file.version,
                    STORE_VERSION
                );
            }
            file.zones
        } else {
            log::debug!("Zone store {} not found, starting empty", path.display());
            Vec::new()
        };

        Ok(Self {
            path,
            inner: MemoryZoneStore::from_zones(zones),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `zones` as the new snapshot
    ///
    /// Callers apply mutations to a copy and only swap it in once this
    /// succeeds, so a failed write leaves memory matching the file on disk.
    fn persist(&self, zones: &[Zone]) -> Result<(), StoreError> {
        let file = StoreFile {
            version: STORE_VERSION,
            zones: zones.to_vec(),
        };
        let contents = serde_json::to_string_pretty(&file).map_err(|source| StoreError::Format {
            path: self.path.clone(),
            source,
        })?;

        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        if let Err(source) = write_synced(&tmp_path, contents.as_bytes())
            .and_then(|()| fs::rename(&tmp_path, &self.path))
        {
            if let Err(e) = fs::remove_file(&tmp_path)
                && e.kind() != std::io::ErrorKind::NotFound
            {
                log::warn!("Failed to remove {}: {}", tmp_path.display(), e);
            }
            return Err(io_err(source));
        }

        Ok(())
    }
}

fn write_synced(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

impl ZoneStore for JsonZoneStore {
    fn list_active_zones(&self) -> Result<Vec<Zone>, ZoneError> {
        self.inner.list_active_zones()
    }

    fn list_all_zones(&self) -> Result<Vec<Zone>, ZoneError> {
        self.inner.list_all_zones()
    }

    fn get_zone(&self, id: &str) -> Result<Zone, ZoneError> {
        self.inner.get_zone(id)
    }

    fn create_zone(&mut self, new_zone: NewZone) -> Result<Zone, ZoneError> {
        let mut next = self.inner.clone();
        let zone = next.create_zone(new_zone)?;
        self.persist(next.zones())?;
        self.inner = next;
        Ok(zone)
    }

    fn update_zone(&mut self, id: &str, patch: ZonePatch) -> Result<Zone, ZoneError> {
        let mut next = self.inner.clone();
        let zone = next.update_zone(id, patch)?;
        self.persist(next.zones())?;
        self.inner = next;
        Ok(zone)
    }

    fn archive_zone(&mut self, id: &str) -> Result<(), ZoneError> {
        let mut next = self.inner.clone();
        next.archive_zone(id)?;
        self.persist(next.zones())?;
        self.inner = next;
        Ok(())
    }
}
