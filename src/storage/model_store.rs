//! Persistence of trained pipeline pairs.
//!
//! Each pipeline is stored as one blob named `<pipeline>.model`:
//!
//! ```text
//! magic "GRVM" | format version u32 | model version u64 | payload length u64 | crc32 u32 | payload
//! ```
//!
//! All integers are little-endian and the payload is the bincode encoding of a
//! [`PipelineArtifact`]. Both blobs of a pair carry the same model version;
//! a pair whose versions disagree is rejected as corrupt.
//!
//! Saving is staged: both blobs are written to temporary outputs first and
//! only then renamed over the live names, with the previous blobs kept as
//! backups until the second rename succeeds. Any failure restores the
//! previous pair.

use std::io::{Cursor, Read, Write};
use std::sync::Arc;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::{debug, warn};

use crate::classification::pipeline::{ClassifierPipeline, PipelineArtifact};
use crate::classification::statistical::{
    StatisticalClassifier, CATEGORY_PIPELINE, PRIORITY_PIPELINE,
};
use crate::classification::types::Label;
use crate::error::{GrievanceError, Result};
use crate::storage::traits::{Storage, StorageOutput};

pub const ARTIFACT_MAGIC: &[u8; 4] = b"GRVM";
pub const FORMAT_VERSION: u32 = 1;
const HEADER_LEN: usize = 4 + 4 + 8 + 8 + 4;
const BLOB_EXTENSION: &str = "model";
const BACKUP_SUFFIX: &str = "bak";

/// Loads and saves model artifacts on top of any [`Storage`] backend.
#[derive(Debug, Clone)]
pub struct ModelStore {
    storage: Arc<dyn Storage>,
}

impl ModelStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        ModelStore { storage }
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// Blob name of a pipeline.
    pub fn blob_name(pipeline: &str) -> String {
        format!("{pipeline}.{BLOB_EXTENSION}")
    }

    fn backup_name(blob: &str) -> String {
        format!("{blob}.{BACKUP_SUFFIX}")
    }

    /// Whether a blob exists for `pipeline`.
    pub fn contains(&self, pipeline: &str) -> bool {
        self.storage.file_exists(&Self::blob_name(pipeline))
    }

    /// Encode an artifact into a self-checking blob.
    pub fn encode<L: Label>(artifact: &PipelineArtifact<L>, model_version: u64) -> Result<Vec<u8>> {
        let payload = bincode::serialize(artifact)?;

        let mut blob = Vec::with_capacity(HEADER_LEN + payload.len());
        blob.extend_from_slice(ARTIFACT_MAGIC);
        blob.write_u32::<LittleEndian>(FORMAT_VERSION)?;
        blob.write_u64::<LittleEndian>(model_version)?;
        blob.write_u64::<LittleEndian>(payload.len() as u64)?;
        blob.write_u32::<LittleEndian>(crc32fast::hash(&payload))?;
        blob.extend_from_slice(&payload);
        Ok(blob)
    }

    /// Decode and verify a blob produced by [`encode`](Self::encode).
    pub fn decode<L: Label>(blob: &[u8]) -> Result<(PipelineArtifact<L>, u64)> {
        if blob.len() < HEADER_LEN {
            return Err(GrievanceError::corrupt(format!(
                "blob is {} bytes, shorter than its header",
                blob.len()
            )));
        }
        if &blob[..4] != ARTIFACT_MAGIC {
            return Err(GrievanceError::corrupt("bad magic bytes"));
        }

        let mut header = Cursor::new(&blob[4..HEADER_LEN]);
        let format_version = header.read_u32::<LittleEndian>()?;
        let model_version = header.read_u64::<LittleEndian>()?;
        let payload_len = header.read_u64::<LittleEndian>()?;
        let checksum = header.read_u32::<LittleEndian>()?;

        if format_version != FORMAT_VERSION {
            return Err(GrievanceError::corrupt(format!(
                "unsupported artifact format version {format_version}"
            )));
        }

        let payload = &blob[HEADER_LEN..];
        if payload.len() as u64 != payload_len {
            return Err(GrievanceError::corrupt(format!(
                "payload is {} bytes, header says {payload_len}",
                payload.len()
            )));
        }
        if crc32fast::hash(payload) != checksum {
            return Err(GrievanceError::corrupt("checksum mismatch"));
        }

        let artifact = bincode::deserialize(payload)
            .map_err(|e| GrievanceError::corrupt(format!("undecodable payload: {e}")))?;
        Ok((artifact, model_version))
    }

    /// Read one pipeline's artifact; `None` when no blob exists.
    pub fn load<L: Label>(&self, pipeline: &str) -> Result<Option<(PipelineArtifact<L>, u64)>> {
        let name = Self::blob_name(pipeline);
        if !self.storage.file_exists(&name) {
            return Ok(None);
        }

        let mut input = self.storage.open_input(&name)?;
        let mut blob = Vec::new();
        input.read_to_end(&mut blob)?;

        let (artifact, version) = Self::decode::<L>(&blob)?;
        if artifact.name != pipeline {
            return Err(GrievanceError::corrupt(format!(
                "blob {name} holds pipeline {:?}",
                artifact.name
            )));
        }
        Ok(Some((artifact, version)))
    }

    /// Load the category/priority pair.
    ///
    /// `Ok(None)` when either blob is missing; an error when either blob is
    /// unreadable or the two disagree on their version.
    pub fn load_pair(&self) -> Result<Option<StatisticalClassifier>> {
        let Some((category, category_version)) = self.load(CATEGORY_PIPELINE)? else {
            return Ok(None);
        };
        let Some((priority, priority_version)) = self.load(PRIORITY_PIPELINE)? else {
            return Ok(None);
        };

        if category_version != priority_version {
            return Err(GrievanceError::corrupt(format!(
                "category blob is version {category_version}, priority blob is version {priority_version}"
            )));
        }

        let classifier = StatisticalClassifier::new(
            ClassifierPipeline::from_artifact(category)?,
            ClassifierPipeline::from_artifact(priority)?,
            category_version,
        )?;
        debug!("loaded model pair version {category_version}");
        Ok(Some(classifier))
    }

    /// Persist both pipelines of `classifier` as one unit.
    pub fn save_pair(&self, classifier: &StatisticalClassifier) -> Result<()> {
        let version = classifier.version();
        let blobs = [
            (
                Self::blob_name(CATEGORY_PIPELINE),
                Self::encode(&classifier.category().to_artifact()?, version)?,
            ),
            (
                Self::blob_name(PRIORITY_PIPELINE),
                Self::encode(&classifier.priority().to_artifact()?, version)?,
            ),
        ];

        let mut staged: Vec<(String, String)> = Vec::with_capacity(blobs.len());
        for (live, bytes) in &blobs {
            match self.stage(live, bytes) {
                Ok(temp) => staged.push((temp, live.clone())),
                Err(e) => {
                    self.discard(&staged);
                    return Err(e);
                }
            }
        }

        self.commit(&staged)?;
        self.storage.sync()?;
        debug!("saved model pair version {version}");
        Ok(())
    }

    fn stage(&self, live: &str, bytes: &[u8]) -> Result<String> {
        let (temp, mut output) = self.storage.create_temp_output(&format!("{live}.staged"))?;
        let written = (|| -> Result<()> {
            output.write_all(bytes)?;
            output.flush_and_sync()?;
            output.close()
        })();
        drop(output);

        if let Err(e) = written {
            let _ = self.storage.delete_file(&temp);
            return Err(e);
        }
        Ok(temp)
    }

    fn discard(&self, staged: &[(String, String)]) {
        for (temp, _) in staged {
            if let Err(e) = self.storage.delete_file(temp) {
                warn!("could not remove staged blob {temp}: {e}");
            }
        }
    }

    fn commit(&self, staged: &[(String, String)]) -> Result<()> {
        // (live name, whether a backup of the previous blob exists)
        let mut committed: Vec<(&str, bool)> = Vec::with_capacity(staged.len());

        for (temp, live) in staged {
            let backup = Self::backup_name(live);
            let had_live = self.storage.file_exists(live);

            let swapped = (|| -> Result<()> {
                if had_live {
                    self.storage.rename_file(live, &backup)?;
                }
                if let Err(e) = self.storage.rename_file(temp, live) {
                    if had_live {
                        let _ = self.storage.rename_file(&backup, live);
                    }
                    return Err(e);
                }
                Ok(())
            })();

            if let Err(e) = swapped {
                warn!("commit of {live} failed, restoring previous models: {e}");
                self.rollback(&committed);
                self.discard(staged);
                return Err(e);
            }
            committed.push((live.as_str(), had_live));
        }

        for (live, had_backup) in committed {
            if had_backup {
                let backup = Self::backup_name(live);
                if let Err(e) = self.storage.delete_file(&backup) {
                    warn!("could not remove backup {backup}: {e}");
                }
            }
        }
        Ok(())
    }

    fn rollback(&self, committed: &[(&str, bool)]) {
        for (live, had_backup) in committed.iter().rev() {
            let restored = if *had_backup {
                self.storage.rename_file(&Self::backup_name(live), live)
            } else {
                self.storage.delete_file(live)
            };
            if let Err(e) = restored {
                warn!("could not restore {live}: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::normalize::normalize;
    use crate::classification::classifier::ComplaintClassifier;
    use crate::classification::types::{Category, PriorityLevel};
    use crate::storage::memory::MemoryStorage;
    use crate::storage::traits::{StorageInput, StorageOutput};

    fn trained(version: u64, twist: bool) -> StatisticalClassifier {
        let mut rows = vec![
            ("website is down", Category::TechnicalSupport, PriorityLevel::Critical),
            ("charged twice", Category::Billing, PriorityLevel::High),
            ("parcel arrived late", Category::Delivery, PriorityLevel::Medium),
        ];
        if twist {
            rows.push(("refund my order", Category::RefundRequest, PriorityLevel::Low));
        }
        let mut category = ClassifierPipeline::new(CATEGORY_PIPELINE, 5000, 1.0);
        let mut priority = ClassifierPipeline::new(PRIORITY_PIPELINE, 3000, 1.0);
        category
            .fit(&rows.iter().map(|(t, c, _)| (normalize(t), *c)).collect::<Vec<_>>())
            .unwrap();
        priority
            .fit(&rows.iter().map(|(t, _, p)| (normalize(t), *p)).collect::<Vec<_>>())
            .unwrap();
        StatisticalClassifier::new(category, priority, version).unwrap()
    }

    #[test]
    fn test_save_and_load_pair() {
        let store = ModelStore::new(Arc::new(MemoryStorage::new()));
        assert!(store.load_pair().unwrap().is_none());

        let original = trained(3, false);
        store.save_pair(&original).unwrap();

        let loaded = store.load_pair().unwrap().unwrap();
        assert_eq!(loaded.version(), 3);
        for text in ["the website is down", "charged twice again", "late parcel", "hi"] {
            assert_eq!(original.classify(text).unwrap(), loaded.classify(text).unwrap());
        }
        assert_eq!(
            store.storage().list_files().unwrap(),
            vec!["category.model", "priority.model"]
        );
    }

    #[test]
    fn test_missing_half_is_none() {
        let storage = Arc::new(MemoryStorage::new());
        let store = ModelStore::new(storage.clone());
        store.save_pair(&trained(1, false)).unwrap();
        storage.delete_file("priority.model").unwrap();
        assert!(store.load_pair().unwrap().is_none());
    }

    #[test]
    fn test_corruption_is_detected() {
        let storage = Arc::new(MemoryStorage::new());
        let store = ModelStore::new(storage.clone());
        store.save_pair(&trained(1, false)).unwrap();

        let mut blob = Vec::new();
        storage
            .open_input("category.model")
            .unwrap()
            .read_to_end(&mut blob)
            .unwrap();
        let last = blob.len() - 1;
        blob[last] ^= 0xFF;
        storage.put("category.model", &blob);

        assert!(matches!(
            store.load_pair(),
            Err(GrievanceError::CorruptArtifact(_))
        ));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(ModelStore::decode::<Category>(b"").is_err());
        assert!(ModelStore::decode::<Category>(&[0u8; 64]).is_err());
    }

    #[test]
    fn test_mismatched_versions_are_corrupt() {
        let storage = Arc::new(MemoryStorage::new());
        let store = ModelStore::new(storage.clone());
        let older = trained(1, false);
        let newer = trained(2, false);
        store.save_pair(&older).unwrap();

        let blob = ModelStore::encode(&newer.priority().to_artifact().unwrap(), 2).unwrap();
        storage.put("priority.model", &blob);

        assert!(store.load_pair().is_err());
    }

    #[test]
    fn test_swapped_blob_names_are_corrupt() {
        let storage = Arc::new(MemoryStorage::new());
        let store = ModelStore::new(storage.clone());
        let classifier = trained(1, false);
        let blob = ModelStore::encode(&classifier.category().to_artifact().unwrap(), 1).unwrap();
        storage.put("priority.model", &blob);
        assert!(store.load::<PriorityLevel>(PRIORITY_PIPELINE).is_err());
    }

    /// Memory storage whose renames onto one name fail.
    #[derive(Debug)]
    struct FailingRename {
        inner: MemoryStorage,
        target: &'static str,
    }

    impl Storage for FailingRename {
        fn open_input(&self, name: &str) -> Result<Box<dyn StorageInput>> {
            self.inner.open_input(name)
        }
        fn create_output(&self, name: &str) -> Result<Box<dyn StorageOutput>> {
            self.inner.create_output(name)
        }
        fn file_exists(&self, name: &str) -> bool {
            self.inner.file_exists(name)
        }
        fn delete_file(&self, name: &str) -> Result<()> {
            self.inner.delete_file(name)
        }
        fn list_files(&self) -> Result<Vec<String>> {
            self.inner.list_files()
        }
        fn rename_file(&self, old_name: &str, new_name: &str) -> Result<()> {
            if new_name == self.target && old_name.ends_with(".tmp") {
                return Err(GrievanceError::storage("injected rename failure"));
            }
            self.inner.rename_file(old_name, new_name)
        }
        fn create_temp_output(&self, prefix: &str) -> Result<(String, Box<dyn StorageOutput>)> {
            self.inner.create_temp_output(prefix)
        }
        fn sync(&self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_commit_restores_previous_pair() {
        let storage = Arc::new(FailingRename {
            inner: MemoryStorage::new(),
            target: "never",
        });
        let store = ModelStore::new(storage.clone());
        let first = trained(1, false);
        store.save_pair(&first).unwrap();

        let failing = Arc::new(FailingRename {
            inner: MemoryStorage::new(),
            target: "priority.model",
        });
        // copy the committed pair into the failing backend
        for name in ["category.model", "priority.model"] {
            let mut blob = Vec::new();
            storage.open_input(name).unwrap().read_to_end(&mut blob).unwrap();
            failing.inner.put(name, &blob);
        }

        let store = ModelStore::new(failing.clone());
        assert!(store.save_pair(&trained(2, true)).is_err());

        let loaded = store.load_pair().unwrap().unwrap();
        assert_eq!(loaded.version(), 1);
        assert_eq!(
            failing.list_files().unwrap(),
            vec!["category.model", "priority.model"]
        );
        assert_eq!(
            first.classify("refund my order").unwrap(),
            loaded.classify("refund my order").unwrap()
        );
    }

    #[test]
    fn test_failed_first_save_leaves_nothing() {
        let failing = Arc::new(FailingRename {
            inner: MemoryStorage::new(),
            target: "priority.model",
        });
        let store = ModelStore::new(failing.clone());
        assert!(store.save_pair(&trained(1, false)).is_err());
        assert!(failing.list_files().unwrap().is_empty());
        assert!(store.load_pair().unwrap().is_none());
    }
}
