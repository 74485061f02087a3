//! Durable key-value storage backed by a directory of JSON files.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::fmt::Write as _;
use std::io;
use tracing::warn;
use uuid::Uuid;

use crate::task::ports::{KeyValueStorage, StorageError, StorageResult};

const FILE_EXTENSION: &str = "json";
const TEMP_SUFFIX: &str = "tmp";

/// Key-value storage that keeps one file per key inside a single directory.
///
/// Access is confined to the opened directory. Keys are encoded into file
/// names so arbitrary keys never escape it. Each write goes through its own
/// temporary file that is renamed into place, so concurrent writers of one
/// key never share a file and readers only ever see a complete value.
#[derive(Debug)]
pub struct DirectoryStorage {
    dir: Dir,
}

impl DirectoryStorage {
    /// Opens (creating if needed) the storage directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] when the directory cannot be
    /// created or opened.
    pub fn open(path: &Utf8Path) -> StorageResult<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority()).map_err(StorageError::backend)?;
        let dir = Dir::open_ambient_dir(path, ambient_authority()).map_err(StorageError::backend)?;
        Ok(Self { dir })
    }

    /// Wraps an already opened directory.
    #[must_use]
    pub const fn from_dir(dir: Dir) -> Self {
        Self { dir }
    }

    fn discard_temp(&self, temp_name: &str) {
        if let Err(err) = self.dir.remove_file(temp_name)
            && err.kind() != io::ErrorKind::NotFound
        {
            warn!(file = temp_name, error = %err, "failed to remove temporary snapshot file");
        }
    }
}

/// Encodes a storage key as a file name.
///
/// ASCII alphanumerics, `-` and `_` are kept; every other byte becomes
/// `%XX`.
fn file_name_for(key: &str) -> StorageResult<String> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey(key.to_owned()));
    }
    let mut name = String::with_capacity(key.len() + FILE_EXTENSION.len() + 1);
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            name.push(char::from(byte));
        } else {
            write!(name, "%{byte:02X}").map_err(|_| StorageError::InvalidKey(key.to_owned()))?;
        }
    }
    name.push('.');
    name.push_str(FILE_EXTENSION);
    Ok(name)
}

impl KeyValueStorage for DirectoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let file_name = file_name_for(key)?;
        match self.dir.read_to_string(&file_name) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::backend(err)),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let file_name = file_name_for(key)?;
        let temp_name = format!("{file_name}.{}.{TEMP_SUFFIX}", Uuid::new_v4().simple());
        let written = self
            .dir
            .write(&temp_name, value)
            .map_err(|err| write_error(key, err))
            .and_then(|()| {
                self.dir
                    .rename(&temp_name, &self.dir, &file_name)
                    .map_err(StorageError::backend)
            });
        if written.is_err() {
            self.discard_temp(&temp_name);
        }
        written
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let file_name = file_name_for(key)?;
        match self.dir.remove_file(&file_name) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::backend(err)),
        }
    }
}

fn write_error(key: &str, err: io::Error) -> StorageError {
    if err.kind() == io::ErrorKind::StorageFull {
        return StorageError::QuotaExceeded {
            key: key.to_owned(),
        };
    }
    StorageError::backend(err)
}

#[cfg(test)]
mod tests {
    use super::file_name_for;
    use crate::task::ports::StorageError;
    use rstest::rstest;

    #[rstest]
    #[case("tasks", "tasks.json")]
    #[case("todo_ui-preferences", "todo_ui-preferences.json")]
    #[case("city_suggestions_New York", "city_suggestions_New%20York.json")]
    #[case("../escape", "%2E%2E%2Fescape.json")]
    fn file_name_for_encodes_unsafe_bytes(#[case] key: &str, #[case] expected: &str) {
        assert_eq!(file_name_for(key).expect("valid key"), expected);
    }

    #[rstest]
    fn file_name_for_rejects_empty_key() {
        assert!(matches!(file_name_for(""), Err(StorageError::InvalidKey(_))));
    }
}
