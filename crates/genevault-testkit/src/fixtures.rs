//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use genevault::{AccessLedger, LedgerConfig, MemorySink};
use genevault_core::{Keypair, Principal};
use genevault_store::{LedgerStore, MemoryStore, SqliteStore};

/// Seed byte reserved for the admin keypair.
pub const ADMIN_SEED: u8 = 0xa0;

/// Deterministic keypairs for multi-party tests.
///
/// Party `i` is seeded with `[i + 1; 32]`, so no party collides with the
/// admin seed for any realistic count.
pub fn multi_party_keypairs(count: usize) -> Vec<Keypair> {
    (0..count)
        .map(|i| Keypair::from_seed(&[(i as u8).wrapping_add(1); 32]))
        .collect()
}

/// A ledger with a seeded admin, a few seeded users, and a recording sink.
pub struct LedgerFixture<S: LedgerStore = MemoryStore> {
    pub admin: Keypair,
    pub users: Vec<Keypair>,
    pub sink: Arc<MemorySink>,
    pub ledger: AccessLedger<S>,
}

impl LedgerFixture<MemoryStore> {
    /// Memory-backed ledger with the default configuration and three users.
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        Self::with_store(MemoryStore::new(), config)
    }
}

impl LedgerFixture<SqliteStore> {
    /// In-memory SQLite ledger with the default configuration.
    pub fn sqlite() -> Self {
        let store = SqliteStore::open_memory().expect("open in-memory sqlite");
        Self::with_store(store, LedgerConfig::default())
    }
}

impl<S: LedgerStore> LedgerFixture<S> {
    pub fn with_store(store: S, config: LedgerConfig) -> Self {
        let admin = Keypair::from_seed(&[ADMIN_SEED; 32]);
        let sink = Arc::new(MemorySink::new());
        let ledger = AccessLedger::create(admin.principal(), store, config)
            .expect("create ledger")
            .with_sink(sink.clone());

        Self {
            admin,
            users: multi_party_keypairs(3),
            sink,
            ledger,
        }
    }

    pub fn admin_principal(&self) -> Principal {
        self.admin.principal()
    }

    /// Principal of user `i`.
    pub fn user(&self, i: usize) -> Principal {
        self.users[i].principal()
    }
}

impl Default for LedgerFixture<MemoryStore> {
    fn default() -> Self {
        Self::new()
    }
}
