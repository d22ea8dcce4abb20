// tests/support.rs
//! Test fixtures — temp SQLite store, instrumented wrappers, fake object storage

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use showcase_settings::db::{SettingCreate, SettingUpdate, SettingsTx};
use showcase_settings::storage::StorageEndpoints;
use showcase_settings::{
    FieldCipher, ManualClock, ObjectStorage, Result, SettingCategory, SettingRecord,
    SettingsError, SettingsManager, SettingsStore, SqliteSettingsStore,
};
use tempfile::TempDir;

#[allow(dead_code)]
pub const TEST_KEY_HEX: &str = "8f3a1c5e7b9d2f4a6c8e0b1d3f5a7c9e2b4d6f8a0c1e3b5d7f9a2c4e6b8d0f1a";

#[allow(dead_code)]
pub const STORAGE_HOST: &str = "storage.shop.test:9000";

/// Sqlite store that counts reads and can be told to fail
pub struct CountingStore {
    pub inner: SqliteSettingsStore,
    pub unique_reads: AtomicUsize,
    pub many_reads: AtomicUsize,
    pub fail_all: AtomicBool,
    pub fail_key: Mutex<Option<String>>,
}

#[allow(dead_code)]
impl CountingStore {
    pub fn new(inner: SqliteSettingsStore) -> Self {
        Self {
            inner,
            unique_reads: AtomicUsize::new(0),
            many_reads: AtomicUsize::new(0),
            fail_all: AtomicBool::new(false),
            fail_key: Mutex::new(None),
        }
    }

    pub fn unique_reads(&self) -> usize {
        self.unique_reads.load(Ordering::SeqCst)
    }

    pub fn many_reads(&self) -> usize {
        self.many_reads.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_all.store(failing, Ordering::SeqCst);
    }

    pub fn fail_writes_for(&self, key: &str) {
        *self.fail_key.lock().unwrap() = Some(key.to_string());
    }

    /// Value exactly as persisted, bypassing the manager
    pub fn raw_value(&self, key: &str) -> Option<String> {
        self.inner.find_unique(key).unwrap().map(|r| r.value)
    }

    /// Overwrite a value behind the manager's back
    pub fn write_raw(&self, key: &str, value: &str, category: SettingCategory) {
        self.inner
            .upsert(
                key,
                &SettingCreate {
                    value,
                    category,
                    updated_by: None,
                },
                &SettingUpdate {
                    value,
                    updated_by: None,
                },
            )
            .unwrap();
    }

    fn check(&self) -> Result<()> {
        if self.fail_all.load(Ordering::SeqCst) {
            Err(SettingsError::Storage("store unavailable".into()))
        } else {
            Ok(())
        }
    }

    fn check_key(&self, key: &str) -> Result<()> {
        match self.fail_key.lock().unwrap().as_deref() {
            Some(bad) if bad == key => Err(SettingsError::Storage(format!("rejected {key}"))),
            _ => Ok(()),
        }
    }
}

struct CheckedTx<'a> {
    inner: &'a dyn SettingsTx,
    store: &'a CountingStore,
}

impl SettingsTx for CheckedTx<'_> {
    fn find_unique(&self, key: &str) -> Result<Option<SettingRecord>> {
        self.inner.find_unique(key)
    }

    fn upsert(
        &self,
        key: &str,
        create: &SettingCreate<'_>,
        update: &SettingUpdate<'_>,
    ) -> Result<SettingRecord> {
        self.store.check_key(key)?;
        self.inner.upsert(key, create, update)
    }
}

impl SettingsStore for CountingStore {
    fn find_unique(&self, key: &str) -> Result<Option<SettingRecord>> {
        self.unique_reads.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.find_unique(key)
    }

    fn find_many(&self, category: Option<SettingCategory>) -> Result<Vec<SettingRecord>> {
        self.many_reads.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.find_many(category)
    }

    fn upsert(
        &self,
        key: &str,
        create: &SettingCreate<'_>,
        update: &SettingUpdate<'_>,
    ) -> Result<SettingRecord> {
        self.check()?;
        self.check_key(key)?;
        self.inner.upsert(key, create, update)
    }

    fn transaction(&self, work: &mut dyn FnMut(&dyn SettingsTx) -> Result<()>) -> Result<()> {
        self.check()?;
        self.inner.transaction(&mut |tx: &dyn SettingsTx| -> Result<()> {
            work(&CheckedTx {
                inner: tx,
                store: self,
            })
        })
    }
}

/// Signer that returns predictable URLs and records every request
#[derive(Default)]
pub struct FakeStorage {
    pub signed: Mutex<Vec<(String, Duration)>>,
    pub failing: AtomicBool,
}

#[allow(dead_code)]
impl FakeStorage {
    pub fn sign_calls(&self) -> usize {
        self.signed.lock().unwrap().len()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl ObjectStorage for FakeStorage {
    fn presigned_url(&self, key: &str, expires_in: Duration) -> Result<String> {
        self.signed
            .lock()
            .unwrap()
            .push((key.to_string(), expires_in));
        if self.failing.load(Ordering::SeqCst) {
            return Err(SettingsError::Storage("signer offline".into()));
        }
        Ok(format!(
            "https://signed.shop.test/media/{key}?X-Amz-Expires={}",
            expires_in.as_secs()
        ))
    }
}

/// Manager wired to a fresh database, a fake signer and a manual clock
#[allow(dead_code)]
pub struct TestEnv {
    pub manager: SettingsManager,
    pub store: Arc<CountingStore>,
    pub storage: Arc<FakeStorage>,
    pub clock: Arc<ManualClock>,
    _dir: TempDir,
}

#[allow(dead_code)]
impl TestEnv {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let inner = SqliteSettingsStore::open(dir.path().join("settings.db")).expect("open db");
        let store = Arc::new(CountingStore::new(inner));
        let storage = Arc::new(FakeStorage::default());
        let clock = Arc::new(ManualClock::new());

        let manager = SettingsManager::builder(
            store.clone(),
            storage.clone(),
            FieldCipher::from_hex(TEST_KEY_HEX).expect("valid test key"),
        )
        .clock(clock.clone())
        .endpoints(StorageEndpoints::new(STORAGE_HOST))
        .build();

        Self {
            manager,
            store,
            storage,
            clock,
            _dir: dir,
        }
    }

    pub fn advance_past_ttl(&self) {
        self.clock.advance(Duration::from_millis(60_001));
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
