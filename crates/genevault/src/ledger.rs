//! The AccessLedger: per-owner data references with gated reads.
//!
//! Every operation takes the authenticated caller explicitly. Mutations take
//! `&mut self`, so a ledger value sees one call at a time; authorization is
//! decided before the single store write each call performs, and the event
//! goes out only after that write succeeded.

use std::sync::Arc;

use genevault_core::{
    DataReference, Invocation, LedgerEvent, Operation, PermissionKey, Principal, SignedInvocation,
};
use genevault_perms::{authorize_read, Authority, ReadCheck};
use genevault_store::{InitResult, LedgerStore};

use crate::config::LedgerConfig;
use crate::error::{LedgerError, Result};
use crate::events::{EventSink, NullSink};

/// The ledger.
///
/// Provides:
/// - One data reference per owner, overwritten on upload
/// - Grant / revoke of read access under the configured [`GrantPolicy`](genevault_perms::GrantPolicy)
/// - Gated reads
/// - Dispatch of signed invocations
pub struct AccessLedger<S: LedgerStore> {
    /// The storage backend holding both maps.
    store: S,
    /// The fixed admin and active grant policy.
    authority: Authority,
    /// Configuration.
    config: LedgerConfig,
    /// Receives events after successful mutations.
    sink: Arc<dyn EventSink>,
}

/// Result of executing a signed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A mutation went through.
    Applied,
    /// A read returned this reference (empty if the owner never uploaded).
    Reference(DataReference),
}

impl<S: LedgerStore> AccessLedger<S> {
    /// Create a ledger administered by `admin`.
    ///
    /// Records the admin in the store. Reusing a store that already belongs
    /// to the same admin reopens it; a different admin is refused.
    pub fn create(admin: Principal, store: S, config: LedgerConfig) -> Result<Self> {
        match store.init_admin(&admin)? {
            InitResult::Initialized => {
                tracing::info!(%admin, policy = ?config.grant_policy, "created access ledger");
            }
            InitResult::AlreadyInitialized { existing } if existing == admin => {
                tracing::debug!(%admin, "store already initialized for this admin");
            }
            InitResult::AlreadyInitialized { existing } => {
                return Err(LedgerError::AdminMismatch {
                    existing,
                    requested: admin,
                });
            }
        }

        Ok(Self::assemble(admin, store, config))
    }

    /// Reopen a ledger from a store that already records its admin.
    pub fn open(store: S, config: LedgerConfig) -> Result<Self> {
        let admin = store.admin()?.ok_or(LedgerError::NotInitialized)?;
        tracing::debug!(%admin, "opened access ledger");
        Ok(Self::assemble(admin, store, config))
    }

    fn assemble(admin: Principal, store: S, config: LedgerConfig) -> Self {
        Self {
            store,
            authority: Authority::new(admin, config.grant_policy),
            config,
            sink: Arc::new(NullSink),
        }
    }

    /// Route events to `sink` instead of discarding them.
    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// The administrative owner fixed at creation.
    pub fn admin(&self) -> &Principal {
        self.authority.admin()
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reference Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Overwrite the caller's data reference.
    ///
    /// `caller` must already be authenticated by the host. The reference is
    /// stored as given; no format check is made.
    pub fn set_reference(
        &mut self,
        caller: &Principal,
        reference: impl Into<DataReference>,
    ) -> Result<()> {
        let reference = reference.into();
        self.store.put_reference(caller, &reference)?;

        tracing::debug!(owner = %caller, %reference, "reference updated");
        self.emit(LedgerEvent::ReferenceUpdated {
            owner: *caller,
            reference,
        });
        Ok(())
    }

    /// Read `owner`'s reference as `caller`.
    ///
    /// Allowed for the owner itself or a reader holding a granted entry.
    /// Returns [`DataReference::EMPTY`] if the owner never uploaded.
    pub fn get_reference(&self, caller: &Principal, owner: &Principal) -> Result<DataReference> {
        let allowed = ReadCheck::for_call(caller, owner).decide(|key| self.store.is_granted(key))?;

        if let Err(e) = authorize_read(allowed) {
            tracing::warn!(%caller, %owner, "read rejected");
            return Err(e.into());
        }

        Ok(self.store.get_reference(owner)?.unwrap_or_default())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Permission Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Grant read access; which entry is flipped depends on the grant policy.
    pub fn grant_access(&mut self, caller: &Principal, reader: &Principal) -> Result<()> {
        let key = self.resolve(
            caller,
            self.authority
                .grant_target(Operation::GrantAccess, caller, reader),
        )?;
        self.set_entry(caller, key, true)
    }

    /// Revoke read access; same authorization and keying as [`Self::grant_access`].
    pub fn revoke_access(&mut self, caller: &Principal, reader: &Principal) -> Result<()> {
        let key = self.resolve(
            caller,
            self.authority
                .grant_target(Operation::RevokeAccess, caller, reader),
        )?;
        self.set_entry(caller, key, false)
    }

    /// Admin-only: let `reader` read `owner`'s reference.
    pub fn grant_access_for(
        &mut self,
        caller: &Principal,
        owner: &Principal,
        reader: &Principal,
    ) -> Result<()> {
        let key = self.resolve(
            caller,
            self.authority
                .moderated_target(Operation::GrantAccessFor, caller, owner, reader),
        )?;
        self.set_entry(caller, key, true)
    }

    /// Admin-only: stop `reader` from reading `owner`'s reference.
    pub fn revoke_access_for(
        &mut self,
        caller: &Principal,
        owner: &Principal,
        reader: &Principal,
    ) -> Result<()> {
        let key = self.resolve(
            caller,
            self.authority
                .moderated_target(Operation::RevokeAccessFor, caller, owner, reader),
        )?;
        self.set_entry(caller, key, false)
    }

    /// Whether `reader` may currently read `owner`'s reference.
    ///
    /// Arguments follow [`Self::get_reference`]: would `get_reference(reader, owner)`
    /// succeed? Permission state is public; anyone may ask.
    pub fn has_access(&self, reader: &Principal, owner: &Principal) -> Result<bool> {
        Ok(ReadCheck::for_call(reader, owner).decide(|key| self.store.is_granted(key))?)
    }

    /// Readers holding a granted entry for `owner` (the owner itself is implicit).
    pub fn granted_readers(&self, owner: &Principal) -> Result<Vec<Principal>> {
        Ok(self.store.granted_readers(owner)?)
    }

    /// Owners that have uploaded a reference.
    pub fn owners(&self) -> Result<Vec<Principal>> {
        Ok(self.store.owners()?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Signed Invocations
    // ─────────────────────────────────────────────────────────────────────────

    /// Verify a signed invocation and run it as its signer.
    ///
    /// A bad signature fails with [`LedgerError::Core`] before any state is touched.
    pub fn execute(&mut self, signed: &SignedInvocation) -> Result<Outcome> {
        let caller = match signed.verify() {
            Ok(caller) => caller,
            Err(e) => {
                tracing::warn!(
                    claimed = %signed.caller,
                    op = %signed.invocation.operation(),
                    "rejected invocation with bad signature"
                );
                return Err(e.into());
            }
        };

        self.apply(&caller, &signed.invocation)
    }

    /// Run one invocation as `caller`, who the host has already authenticated.
    ///
    /// This is the dispatch behind [`Self::execute`].
    pub fn apply(&mut self, caller: &Principal, invocation: &Invocation) -> Result<Outcome> {
        match invocation {
            Invocation::SetReference { reference } => {
                self.set_reference(caller, reference.clone())?;
                Ok(Outcome::Applied)
            }
            Invocation::GrantAccess { reader } => {
                self.grant_access(caller, reader)?;
                Ok(Outcome::Applied)
            }
            Invocation::RevokeAccess { reader } => {
                self.revoke_access(caller, reader)?;
                Ok(Outcome::Applied)
            }
            Invocation::GrantAccessFor { owner, reader } => {
                self.grant_access_for(caller, owner, reader)?;
                Ok(Outcome::Applied)
            }
            Invocation::RevokeAccessFor { owner, reader } => {
                self.revoke_access_for(caller, owner, reader)?;
                Ok(Outcome::Applied)
            }
            Invocation::GetReference { owner } => {
                Ok(Outcome::Reference(self.get_reference(caller, owner)?))
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    /// Log and convert a rejected permission change.
    fn resolve(
        &self,
        caller: &Principal,
        target: genevault_perms::Result<PermissionKey>,
    ) -> Result<PermissionKey> {
        target.map_err(|e| {
            tracing::warn!(%caller, error = %e, policy = ?self.authority.policy(), "permission change rejected");
            LedgerError::from(e)
        })
    }

    fn set_entry(&mut self, caller: &Principal, key: PermissionKey, granted: bool) -> Result<()> {
        self.store.set_permission(&key, granted)?;

        tracing::debug!(
            %caller,
            owner = %key.owner,
            reader = %key.reader,
            granted,
            "permission entry set"
        );

        self.emit(if granted {
            LedgerEvent::access_granted(*caller, key)
        } else {
            LedgerEvent::access_revoked(*caller, key)
        });
        Ok(())
    }

    fn emit(&self, event: LedgerEvent) {
        if self.config.emit_events {
            tracing::trace!(event = event.name(), owner = %event.owner(), "emitting");
            self.sink.emit(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MemorySink;
    use genevault_core::Keypair;
    use genevault_perms::GrantPolicy;
    use genevault_store::MemoryStore;

    fn principal(b: u8) -> Principal {
        Principal::from_bytes([b; 32])
    }

    const ADMIN: u8 = 0xaa;

    fn ledger(policy: GrantPolicy) -> (AccessLedger<MemoryStore>, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let ledger = AccessLedger::create(
            principal(ADMIN),
            MemoryStore::new(),
            LedgerConfig::default().with_grant_policy(policy),
        )
        .unwrap()
        .with_sink(sink.clone());
        (ledger, sink)
    }

    #[test]
    fn test_self_read_after_upload() {
        let (mut ledger, _) = ledger(GrantPolicy::AdminControlled);
        let u1 = principal(1);

        ledger.set_reference(&u1, "hash123").unwrap();

        assert_eq!(ledger.get_reference(&u1, &u1).unwrap(), DataReference::from("hash123"));
    }

    #[test]
    fn test_never_set_reads_empty() {
        let (ledger, _) = ledger(GrantPolicy::AdminControlled);
        let u1 = principal(1);

        assert!(ledger.get_reference(&u1, &u1).unwrap().is_empty());
    }

    #[test]
    fn test_default_deny() {
        let (mut ledger, _) = ledger(GrantPolicy::AdminControlled);
        ledger.set_reference(&principal(1), "hash123").unwrap();

        let err = ledger.get_reference(&principal(2), &principal(1)).unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_admin_grant_uses_literal_keying() {
        let (mut ledger, sink) = ledger(GrantPolicy::AdminControlled);
        let admin = principal(ADMIN);
        let u1 = principal(1);
        ledger.set_reference(&u1, "hash123").unwrap();
        sink.take();

        ledger.grant_access(&admin, &u1).unwrap();

        // The grant lets the admin read u1, not u1 read anyone.
        assert_eq!(ledger.get_reference(&admin, &u1).unwrap(), DataReference::from("hash123"));
        assert!(ledger.has_access(&admin, &u1).unwrap());
        assert_eq!(
            sink.events(),
            vec![LedgerEvent::AccessGranted {
                caller: admin,
                owner: u1,
                reader: admin,
            }]
        );

        ledger.revoke_access(&admin, &u1).unwrap();
        assert!(ledger.get_reference(&admin, &u1).unwrap_err().is_unauthorized());
    }

    #[test]
    fn test_non_admin_grant_changes_nothing() {
        let (mut ledger, sink) = ledger(GrantPolicy::AdminControlled);
        let u1 = principal(1);
        let u3 = principal(3);

        let err = ledger.grant_access(&u3, &u1).unwrap_err();
        assert!(err.is_unauthorized());
        let err = ledger.revoke_access(&u3, &u1).unwrap_err();
        assert!(err.is_unauthorized());

        assert!(!ledger.has_access(&u3, &u1).unwrap());
        assert!(!ledger.has_access(&u1, &u3).unwrap());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_owner_controlled_self_service() {
        let (mut ledger, _) = ledger(GrantPolicy::OwnerControlled);
        let u1 = principal(1);
        let u2 = principal(2);
        ledger.set_reference(&u1, "hash123").unwrap();

        ledger.grant_access(&u1, &u2).unwrap();
        assert_eq!(ledger.get_reference(&u2, &u1).unwrap(), DataReference::from("hash123"));
        assert_eq!(ledger.granted_readers(&u1).unwrap(), vec![u2]);

        ledger.revoke_access(&u1, &u2).unwrap();
        assert!(ledger.get_reference(&u2, &u1).unwrap_err().is_unauthorized());
    }

    #[test]
    fn test_moderated_grant() {
        let (mut ledger, sink) = ledger(GrantPolicy::AdminControlled);
        let admin = principal(ADMIN);
        let u1 = principal(1);
        let u2 = principal(2);
        ledger.set_reference(&u1, "hash123").unwrap();

        assert!(ledger
            .grant_access_for(&u1, &u1, &u2)
            .unwrap_err()
            .is_unauthorized());

        ledger.grant_access_for(&admin, &u1, &u2).unwrap();
        assert_eq!(ledger.get_reference(&u2, &u1).unwrap(), DataReference::from("hash123"));

        ledger.revoke_access_for(&admin, &u1, &u2).unwrap();
        assert!(!ledger.has_access(&u2, &u1).unwrap());

        let kinds: Vec<_> = sink.events().iter().map(|e| e.name()).collect();
        assert_eq!(kinds, vec!["reference_updated", "access_granted", "access_revoked"]);
    }

    #[test]
    fn test_self_access_survives_revoke() {
        let (mut ledger, _) = ledger(GrantPolicy::OwnerControlled);
        let u1 = principal(1);
        ledger.set_reference(&u1, "hash123").unwrap();

        ledger.revoke_access(&u1, &u1).unwrap();

        assert_eq!(ledger.get_reference(&u1, &u1).unwrap(), DataReference::from("hash123"));
    }

    #[test]
    fn test_events_can_be_disabled() {
        let sink = Arc::new(MemorySink::new());
        let mut ledger = AccessLedger::create(
            principal(ADMIN),
            MemoryStore::new(),
            LedgerConfig::default().with_events(false),
        )
        .unwrap()
        .with_sink(sink.clone());

        ledger.set_reference(&principal(1), "hash123").unwrap();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_create_rejects_other_admin() {
        let store = Arc::new(MemoryStore::new());
        AccessLedger::create(principal(ADMIN), store.clone(), LedgerConfig::default()).unwrap();

        assert!(AccessLedger::create(principal(ADMIN), store.clone(), LedgerConfig::default()).is_ok());
        assert!(matches!(
            AccessLedger::create(principal(7), store, LedgerConfig::default()),
            Err(LedgerError::AdminMismatch { .. })
        ));
    }

    #[test]
    fn test_open_requires_admin() {
        assert!(matches!(
            AccessLedger::open(MemoryStore::new(), LedgerConfig::default()),
            Err(LedgerError::NotInitialized)
        ));
    }

    #[test]
    fn test_execute_signed_calls() {
        let (mut ledger, _) = ledger(GrantPolicy::OwnerControlled);
        let alice = Keypair::from_seed(&[1u8; 32]);
        let bob = Keypair::from_seed(&[2u8; 32]);

        let outcome = ledger
            .execute(
                &Invocation::SetReference {
                    reference: "hash123".into(),
                }
                .sign(&alice),
            )
            .unwrap();
        assert_eq!(outcome, Outcome::Applied);

        let read = Invocation::GetReference {
            owner: alice.principal(),
        }
        .sign(&bob);
        assert!(ledger.execute(&read).unwrap_err().is_unauthorized());

        ledger
            .execute(
                &Invocation::GrantAccess {
                    reader: bob.principal(),
                }
                .sign(&alice),
            )
            .unwrap();
        assert_eq!(
            ledger.execute(&read).unwrap(),
            Outcome::Reference("hash123".into())
        );
    }

    #[test]
    fn test_execute_rejects_forged_caller() {
        let (mut ledger, sink) = ledger(GrantPolicy::AdminControlled);
        let mallory = Keypair::from_seed(&[6u8; 32]);

        let mut forged = Invocation::GrantAccess {
            reader: mallory.principal(),
        }
        .sign(&mallory);
        forged.caller = principal(ADMIN);

        assert!(matches!(
            ledger.execute(&forged),
            Err(LedgerError::Core(genevault_core::CoreError::InvalidSignature))
                | Err(LedgerError::Core(genevault_core::CoreError::InvalidPublicKey))
        ));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_has_access_mirrors_get_reference_order() {
        let (mut ledger, _) = ledger(GrantPolicy::OwnerControlled);
        let u1 = principal(1);
        let u2 = principal(2);
        ledger.set_reference(&u1, "hash123").unwrap();
        ledger.grant_access(&u1, &u2).unwrap();

        assert!(ledger.has_access(&u2, &u1).unwrap());
        assert!(ledger.get_reference(&u2, &u1).is_ok());

        assert!(!ledger.has_access(&u1, &u2).unwrap());
        assert!(ledger.get_reference(&u1, &u2).is_err());
    }

    #[test]
    fn test_apply_dispatches_like_direct_calls() {
        let (mut ledger, sink) = ledger(GrantPolicy::AdminControlled);
        let admin = principal(ADMIN);
        let u1 = principal(1);
        let u2 = principal(2);

        let upload = Invocation::SetReference {
            reference: "hash123".into(),
        };
        assert_eq!(ledger.apply(&u1, &upload).unwrap(), Outcome::Applied);

        let read = Invocation::GetReference { owner: u1 };
        assert!(ledger.apply(&u2, &read).unwrap_err().is_unauthorized());

        let grant = Invocation::GrantAccessFor { owner: u1, reader: u2 };
        assert!(ledger.apply(&u2, &grant).unwrap_err().is_unauthorized());
        ledger.apply(&admin, &grant).unwrap();

        assert_eq!(
            ledger.apply(&u2, &read).unwrap(),
            Outcome::Reference(DataReference::from("hash123"))
        );
        assert_eq!(sink.len(), 2);
    }
}
