//! JSON-document object store
//!
//! Holds the same table as [`MemoryStore`](super::MemoryStore) and rewrites
//! `objects.json` atomically after every successful write. A write whose
//! persistence fails leaves both the file and the in-memory table unchanged.

use std::ffi::{OsStr, OsString};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ObjtrailError, ObjtrailResult};
use crate::models::{BaseObject, ObjectId, ObjectKind};

use super::table::ObjectTable;
use super::{ObjectStore, QueryFilters};

const FORMAT_VERSION: u32 = 1;

/// On-disk layout: objects in insertion order
#[derive(Debug, Default, Serialize, Deserialize)]
struct ObjectsFile {
    #[serde(default)]
    version: u32,
    #[serde(default)]
    objects: Vec<BaseObject>,
}

/// [`ObjectStore`] persisted to a single JSON file
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    table: RwLock<ObjectTable>,
}

impl JsonFileStore {
    /// Open a store, loading existing objects if the file exists
    pub fn open(path: impl Into<PathBuf>) -> ObjtrailResult<Self> {
        let path = path.into();
        let file = load(&path)?;
        let table = ObjectTable::from_objects(file.objects).map_err(|e| {
            ObjtrailError::Storage(format!("Corrupt object file {}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), objects = table.len(), "object store opened");
        Ok(Self {
            path,
            table: RwLock::new(table),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of stored objects
    pub fn len(&self) -> ObjtrailResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> ObjtrailResult<bool> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> ObjtrailResult<RwLockReadGuard<'_, ObjectTable>> {
        self.table
            .read()
            .map_err(|e| ObjtrailError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> ObjtrailResult<RwLockWriteGuard<'_, ObjectTable>> {
        self.table
            .write()
            .map_err(|e| ObjtrailError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Apply a change to a copy of the table, persist it, then swap it in
    fn commit<F>(&self, change: F) -> ObjtrailResult<()>
    where
        F: FnOnce(&mut ObjectTable) -> ObjtrailResult<()>,
    {
        let mut table = self.write()?;
        let mut next = table.clone();
        change(&mut next)?;

        let file = ObjectsFile {
            version: FORMAT_VERSION,
            objects: next.objects(),
        };
        self.persist(&file)?;

        *table = next;
        Ok(())
    }

    /// Write `file` next to the store as `.<name>.tmp`, then rename it over
    /// the store file so readers never see a partial document
    fn persist(&self, file: &ObjectsFile) -> ObjtrailResult<()> {
        let fail = |action: &str, e: std::io::Error| {
            ObjtrailError::Storage(format!(
                "Failed to {} object file {}: {}",
                action,
                self.path.display(),
                e
            ))
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| fail("create directory for", e))?;
        }

        let temp_path = self.temp_path();
        let mut writer = BufWriter::new(File::create(&temp_path).map_err(|e| fail("stage", e))?);
        serde_json::to_writer_pretty(&mut writer, file)?;
        writer.flush().map_err(|e| fail("flush", e))?;
        writer.get_ref().sync_all().map_err(|e| fail("sync", e))?;

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            fail("replace", e)
        })
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(".");
        name.push(self.path.file_name().unwrap_or_else(|| OsStr::new("objects.json")));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Read the store file; a missing file is an empty store
fn load(path: &Path) -> ObjtrailResult<ObjectsFile> {
    if !path.exists() {
        return Ok(ObjectsFile::default());
    }

    let file = File::open(path).map_err(|e| {
        ObjtrailError::Storage(format!("Failed to open object file {}: {}", path.display(), e))
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        ObjtrailError::Storage(format!("Corrupt object file {}: {}", path.display(), e))
    })
}

impl ObjectStore for JsonFileStore {
    fn create(&self, object: &BaseObject) -> ObjtrailResult<()> {
        self.commit(|table| table.insert(object))?;
        debug!(id = %object.id(), kind = %object.kind(), "object created");
        Ok(())
    }

    fn get(&self, id: &ObjectId) -> ObjtrailResult<BaseObject> {
        self.read()?.get(id)
    }

    fn update(&self, object: &BaseObject) -> ObjtrailResult<()> {
        self.commit(|table| table.replace(object))?;
        debug!(id = %object.id(), kind = %object.kind(), "object updated");
        Ok(())
    }

    fn delete(&self, id: &ObjectId) -> ObjtrailResult<()> {
        self.commit(|table| table.remove(id).map(|_| ()))?;
        debug!(id = %id, "object deleted");
        Ok(())
    }

    fn query(&self, kind: &ObjectKind, filters: &QueryFilters) -> ObjtrailResult<Vec<BaseObject>> {
        Ok(self.read()?.query(kind, filters))
    }
}
