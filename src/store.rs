//! Durable per-network storage of deployed contract addresses

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use crate::{constants::STORE_EXTENSION, errors::ScriptError};

/// The full contract name -> address mapping persisted for one network
type NetworkRecords = BTreeMap<String, String>;

/// A persistent mapping from (network, contract name) to the address of the
/// deployed instance.
///
/// Each network gets its own JSON file under the store directory, named after
/// the network and holding a flat `{ "ContractName": "0x..." }` object. Reads
/// and writes load and persist the whole per-network mapping. There is no
/// cross-process locking: two script runs writing the same network's file
/// concurrently race, and the last writer wins. Records are only ever
/// overwritten, never deleted, by this module.
#[derive(Debug, Clone)]
pub struct AddressStore {
    /// The directory containing the per-network store files
    db_dir: PathBuf,
}

impl AddressStore {
    /// Creates a store rooted at the given directory
    pub fn new(db_dir: impl Into<PathBuf>) -> Self {
        AddressStore {
            db_dir: db_dir.into(),
        }
    }

    /// The path of the store file for the given network.
    ///
    /// The extension is appended rather than set with `with_extension`, so a
    /// dot in the network name cannot make two networks share one file.
    fn store_path(&self, network: &str) -> PathBuf {
        self.db_dir.join(format!("{network}.{STORE_EXTENSION}"))
    }

    /// Loads the full record mapping for the given network, or `None` if the
    /// network's store file has never been created.
    ///
    /// A file that exists but does not parse as a string -> string object is
    /// surfaced as [`ScriptError::CorruptStore`], never as an absent record.
    fn load(&self, network: &str) -> Result<Option<NetworkRecords>, ScriptError> {
        let path = self.store_path(network);
        if !path.exists() {
            return Ok(None);
        }

        let contents =
            fs::read_to_string(&path).map_err(|e| ScriptError::ReadStore(e.to_string()))?;
        let records = serde_json::from_str(&contents)
            .map_err(|e| ScriptError::CorruptStore(format!("{}: {}", path.display(), e)))?;

        Ok(Some(records))
    }

    /// Returns the most recently written address for the given (network,
    /// contract name) pair, or `None` if no record exists
    pub fn read(&self, network: &str, contract_name: &str) -> Result<Option<String>, ScriptError> {
        validate_identifier(network, "network")?;
        validate_identifier(contract_name, "contract name")?;

        Ok(self
            .load(network)?
            .and_then(|records| records.get(contract_name).cloned()))
    }

    /// Records the address for the given (network, contract name) pair,
    /// overwriting any prior value.
    ///
    /// The whole per-network mapping is loaded, updated, and written back; a
    /// crash between load and persist can lose the update, which is accepted
    /// for a single-operator deployment workflow.
    pub fn write(
        &self,
        network: &str,
        contract_name: &str,
        address: &str,
    ) -> Result<(), ScriptError> {
        validate_identifier(network, "network")?;
        validate_identifier(contract_name, "contract name")?;
        validate_identifier(address, "address")?;

        let mut records = self.load(network)?.unwrap_or_default();
        records.insert(contract_name.to_string(), address.to_string());

        fs::create_dir_all(&self.db_dir).map_err(|e| ScriptError::WriteStore(e.to_string()))?;
        let contents = serde_json::to_string_pretty(&records)
            .map_err(|e| ScriptError::WriteStore(e.to_string()))?;
        fs::write(self.store_path(network), contents)
            .map_err(|e| ScriptError::WriteStore(e.to_string()))?;

        Ok(())
    }

    /// The directory containing the per-network store files
    pub fn db_dir(&self) -> &Path {
        &self.db_dir
    }
}

/// Rejects empty identifiers, and identifiers that could escape the store
/// directory when used as a file name
fn validate_identifier(value: &str, what: &str) -> Result<(), ScriptError> {
    if value.trim().is_empty() {
        return Err(ScriptError::InvalidArgument(format!("empty {}", what)));
    }
    if value.contains(['/', '\\']) {
        return Err(ScriptError::InvalidArgument(format!(
            "{} {} contains a path separator",
            what, value
        )));
    }

    Ok(())
}

/// Tests for the address store
#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::AddressStore;
    use crate::errors::ScriptError;

    /// A write followed by a read on the same pair returns the written address
    #[test]
    fn test_read_write_round_trip() {
        let dir = tempdir().unwrap();
        let store = AddressStore::new(dir.path());

        store.write("sepolia", "Swap", "0xdef").unwrap();
        assert_eq!(
            store.read("sepolia", "Swap").unwrap(),
            Some("0xdef".to_string())
        );
    }

    /// Reading a pair that was never written returns `None`
    #[test]
    fn test_read_absent_record() {
        let dir = tempdir().unwrap();
        let store = AddressStore::new(dir.path());

        // Network file never created
        assert_eq!(store.read("sepolia", "Swap").unwrap(), None);

        // Network file exists but the key does not
        store.write("sepolia", "OldToken", "0xabc").unwrap();
        assert_eq!(store.read("sepolia", "Swap").unwrap(), None);
    }

    /// A rewrite of the same pair overwrites the prior address
    #[test]
    fn test_last_write_wins() {
        let dir = tempdir().unwrap();
        let store = AddressStore::new(dir.path());

        store.write("sepolia", "Swap", "0xdef").unwrap();
        store.write("sepolia", "Swap", "0x123").unwrap();
        assert_eq!(
            store.read("sepolia", "Swap").unwrap(),
            Some("0x123".to_string())
        );
    }

    /// Records for different networks live in separate files and never collide
    #[test]
    fn test_network_isolation() {
        let dir = tempdir().unwrap();
        let store = AddressStore::new(dir.path());

        store.write("sepolia", "Swap", "0xaaa").unwrap();
        store.write("base", "Swap", "0xbbb").unwrap();

        assert_eq!(
            store.read("sepolia", "Swap").unwrap(),
            Some("0xaaa".to_string())
        );
        assert_eq!(
            store.read("base", "Swap").unwrap(),
            Some("0xbbb".to_string())
        );
        assert!(dir.path().join("sepolia.json").exists());
        assert!(dir.path().join("base.json").exists());
    }

    /// A dot in the network name must not collapse two networks onto one
    /// store file
    #[test]
    fn test_dotted_network_names_stay_isolated() {
        let dir = tempdir().unwrap();
        let store = AddressStore::new(dir.path());

        store.write("net.a", "Swap", "0xaaa").unwrap();
        store.write("net.b", "Swap", "0xbbb").unwrap();

        assert_eq!(
            store.read("net.a", "Swap").unwrap(),
            Some("0xaaa".to_string())
        );
        assert_eq!(
            store.read("net.b", "Swap").unwrap(),
            Some("0xbbb".to_string())
        );
        assert!(dir.path().join("net.a.json").exists());
        assert!(dir.path().join("net.b.json").exists());
    }

    /// Identifiers with path separators cannot escape the store directory
    #[test]
    fn test_path_separators_rejected() {
        let dir = tempdir().unwrap();
        let store = AddressStore::new(dir.path());

        assert!(matches!(
            store.read("../other", "Swap"),
            Err(ScriptError::InvalidArgument(_))
        ));
        assert!(matches!(
            store.write("a/b", "Swap", "0xdef"),
            Err(ScriptError::InvalidArgument(_))
        ));
        assert!(matches!(
            store.write("a\\b", "Swap", "0xdef"),
            Err(ScriptError::InvalidArgument(_))
        ));
    }

    /// A store file that is not a valid mapping fails loudly instead of
    /// reading as an absent record
    #[test]
    fn test_corrupt_store_detected() {
        let dir = tempdir().unwrap();
        let store = AddressStore::new(dir.path());

        fs::write(dir.path().join("sepolia.json"), "not json at all").unwrap();
        assert!(matches!(
            store.read("sepolia", "Swap"),
            Err(ScriptError::CorruptStore(_))
        ));

        // Valid JSON of the wrong shape is just as corrupt
        fs::write(dir.path().join("base.json"), "[1, 2, 3]").unwrap();
        assert!(matches!(
            store.read("base", "Swap"),
            Err(ScriptError::CorruptStore(_))
        ));
    }

    /// A corrupt store file also blocks writes rather than being clobbered
    #[test]
    fn test_corrupt_store_blocks_write() {
        let dir = tempdir().unwrap();
        let store = AddressStore::new(dir.path());

        fs::write(dir.path().join("sepolia.json"), "{{{{").unwrap();
        assert!(matches!(
            store.write("sepolia", "Swap", "0xdef"),
            Err(ScriptError::CorruptStore(_))
        ));
    }

    /// Empty identifiers are rejected before touching the filesystem
    #[test]
    fn test_empty_identifiers_rejected() {
        let dir = tempdir().unwrap();
        let store = AddressStore::new(dir.path());

        assert!(matches!(
            store.read("", "Swap"),
            Err(ScriptError::InvalidArgument(_))
        ));
        assert!(matches!(
            store.read("sepolia", ""),
            Err(ScriptError::InvalidArgument(_))
        ));
        assert!(matches!(
            store.write("sepolia", "Swap", "  "),
            Err(ScriptError::InvalidArgument(_))
        ));
    }

    /// A write preserves the other records in the same network file
    #[test]
    fn test_write_preserves_existing_records() {
        let dir = tempdir().unwrap();
        let store = AddressStore::new(dir.path());

        store.write("sepolia", "OldToken", "0xabc").unwrap();
        store.write("sepolia", "Swap", "0xdef").unwrap();

        assert_eq!(
            store.read("sepolia", "OldToken").unwrap(),
            Some("0xabc".to_string())
        );
        assert_eq!(
            store.read("sepolia", "Swap").unwrap(),
            Some("0xdef".to_string())
        );
    }
}
