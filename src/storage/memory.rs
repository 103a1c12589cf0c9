//! In-memory storage implementation for tests and throwaway engines.

use std::collections::HashMap;
use std::io::{Cursor, Read, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;
use crate::storage::traits::{Storage, StorageError, StorageInput, StorageOutput};

type FileMap = Arc<Mutex<HashMap<String, Box<[u8]>>>>;

/// An in-memory storage implementation.
///
/// Outputs become visible only once closed (or dropped), so readers never
/// observe a partially written blob.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: FileMap,
}

impl MemoryStorage {
    /// Create a new, empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a file's bytes directly.
    pub fn put(&self, name: &str, data: &[u8]) {
        self.files
            .lock()
            .insert(name.to_string(), data.to_vec().into_boxed_slice());
    }
}

impl Storage for MemoryStorage {
    fn open_input(&self, name: &str) -> Result<Box<dyn StorageInput>> {
        let files = self.files.lock();
        let data = files
            .get(name)
            .ok_or_else(|| StorageError::FileNotFound(name.to_string()))?;

        Ok(Box::new(MemoryInput::new(data.clone())))
    }

    fn create_output(&self, name: &str) -> Result<Box<dyn StorageOutput>> {
        Ok(Box::new(MemoryOutput::new(
            name.to_string(),
            Arc::clone(&self.files),
        )))
    }

    fn file_exists(&self, name: &str) -> bool {
        self.files.lock().contains_key(name)
    }

    fn delete_file(&self, name: &str) -> Result<()> {
        self.files.lock().remove(name);
        Ok(())
    }

    fn list_files(&self) -> Result<Vec<String>> {
        let mut file_names: Vec<String> = self.files.lock().keys().cloned().collect();
        file_names.sort();
        Ok(file_names)
    }

    fn rename_file(&self, old_name: &str, new_name: &str) -> Result<()> {
        let mut files = self.files.lock();
        let data = files
            .remove(old_name)
            .ok_or_else(|| StorageError::FileNotFound(old_name.to_string()))?;

        files.insert(new_name.to_string(), data);
        Ok(())
    }

    fn create_temp_output(&self, prefix: &str) -> Result<(String, Box<dyn StorageOutput>)> {
        let mut counter = 0;
        let mut temp_name;

        loop {
            temp_name = format!("{prefix}_{counter}.tmp");
            if !self.file_exists(&temp_name) {
                break;
            }
            counter += 1;

            if counter > 10000 {
                return Err(
                    StorageError::IoError("Could not create temporary file".to_string()).into(),
                );
            }
        }

        // Reserve the name so a second temp output cannot pick it.
        self.put(&temp_name, &[]);
        let output = self.create_output(&temp_name)?;
        Ok((temp_name, output))
    }

    fn sync(&self) -> Result<()> {
        Ok(())
    }
}

/// A memory-based input implementation.
#[derive(Debug)]
pub struct MemoryInput {
    cursor: Cursor<Vec<u8>>,
}

impl MemoryInput {
    fn new(data: Box<[u8]>) -> Self {
        MemoryInput {
            cursor: Cursor::new(data.into_vec()),
        }
    }
}

impl Read for MemoryInput {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl StorageInput for MemoryInput {}

/// A memory-based output implementation.
#[derive(Debug)]
pub struct MemoryOutput {
    name: String,
    buffer: Vec<u8>,
    files: FileMap,
    closed: bool,
}

impl MemoryOutput {
    fn new(name: String, files: FileMap) -> Self {
        MemoryOutput {
            name,
            buffer: Vec::new(),
            files,
            closed: false,
        }
    }
}

impl Write for MemoryOutput {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if self.closed {
            return Err(std::io::Error::other("Output is closed"));
        }

        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl StorageOutput for MemoryOutput {
    fn flush_and_sync(&mut self) -> Result<()> {
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if !self.closed {
            let data = std::mem::take(&mut self.buffer).into_boxed_slice();
            self.files.lock().insert(self.name.clone(), data);
            self.closed = true;
        }
        Ok(())
    }
}

impl Drop for MemoryOutput {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_basic_operations() {
        let storage = MemoryStorage::new();

        let mut output = storage.create_output("category.model").unwrap();
        output.write_all(b"weights").unwrap();
        assert!(!storage.file_exists("category.model"));
        output.close().unwrap();

        assert!(storage.file_exists("category.model"));
        assert_eq!(storage.list_files().unwrap(), vec!["category.model"]);

        let mut input = storage.open_input("category.model").unwrap();
        let mut buffer = Vec::new();
        input.read_to_end(&mut buffer).unwrap();
        assert_eq!(buffer, b"weights");
    }

    #[test]
    fn test_rename_replaces_target() {
        let storage = MemoryStorage::new();
        storage.put("live", b"old");
        storage.put("staged", b"new");

        storage.rename_file("staged", "live").unwrap();

        assert!(!storage.file_exists("staged"));
        let mut data = Vec::new();
        storage
            .open_input("live")
            .unwrap()
            .read_to_end(&mut data)
            .unwrap();
        assert_eq!(data, b"new");
    }

    #[test]
    fn test_missing_file() {
        let storage = MemoryStorage::new();
        assert!(storage.open_input("nope").is_err());
        assert!(storage.rename_file("nope", "other").is_err());
        assert!(storage.delete_file("nope").is_ok());
    }

    #[test]
    fn test_temp_outputs_get_distinct_names() {
        let storage = MemoryStorage::new();
        let (first, mut a) = storage.create_temp_output("stage").unwrap();
        let (second, mut b) = storage.create_temp_output("stage").unwrap();
        assert_ne!(first, second);
        a.close().unwrap();
        b.close().unwrap();
        assert_eq!(storage.list_files().unwrap(), vec![first, second]);
    }

    #[test]
    fn test_dropped_output_is_published() {
        let storage = MemoryStorage::new();
        {
            let mut output = storage.create_output("dropped").unwrap();
            output.write_all(b"x").unwrap();
        }
        assert!(storage.file_exists("dropped"));
    }
}
