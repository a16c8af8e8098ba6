//! Rotation cache for the mounted signing keys.
//!
//! The cache owns exactly one immutable `KeySnapshot` at a time. A refresh
//! builds a complete new snapshot from disk and swaps it in under the write
//! lock; readers clone the current `Arc` and never see a partial update.

use crate::config::JwksFileConfig;
use crate::errors::KeyError;
use crate::models::{Jwk, Jwks, RealmInfo, RotationSlot};
use crate::observability::metrics::{record_key_refresh, set_cached_keys};
use crate::repositories::mounted_keys;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::instrument;

/// Immutable mapping from rotation slot to key.
///
/// No two slots hold the same kid. When loaded slots collide, the slot that
/// comes first in `RotationSlot::ASSIGNMENT_ORDER` keeps the key and the
/// later ones are left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySnapshot {
    slots: BTreeMap<RotationSlot, Jwk>,
}

impl KeySnapshot {
    /// Build a snapshot from loaded slot keys, dropping kid collisions.
    pub fn from_slots(loaded: impl IntoIterator<Item = (RotationSlot, Jwk)>) -> Self {
        let mut pending: BTreeMap<RotationSlot, Jwk> = loaded.into_iter().collect();
        let mut seen_kids = HashSet::new();
        let mut slots = BTreeMap::new();

        for slot in RotationSlot::ASSIGNMENT_ORDER {
            let Some(jwk) = pending.remove(&slot) else {
                continue;
            };

            if seen_kids.insert(jwk.kid.clone()) {
                slots.insert(slot, jwk);
            } else {
                tracing::debug!(
                    target: "issuer.keys",
                    slot = %slot,
                    kid = %jwk.kid,
                    "Key id already cached for a higher-priority slot, skipping"
                );
            }
        }

        Self { slots }
    }

    /// Load all three slots from disk. Any slot failure fails the whole build.
    #[instrument(skip_all, name = "issuer.keys.build_snapshot")]
    pub async fn build(config: &JwksFileConfig) -> Result<Self, KeyError> {
        let next = mounted_keys::load_slot(config, RotationSlot::Next).await?;
        let active = mounted_keys::load_slot(config, RotationSlot::Active).await?;
        let previous = mounted_keys::load_slot(config, RotationSlot::Previous).await?;

        Ok(Self::from_slots([
            (RotationSlot::Next, next),
            (RotationSlot::Active, active),
            (RotationSlot::Previous, previous),
        ]))
    }

    pub fn get(&self, slot: RotationSlot) -> Option<&Jwk> {
        self.slots.get(&slot)
    }

    /// Keys in exposure order (Next, Active, Previous), skipping empty slots.
    pub fn ordered_keys(&self) -> Vec<Jwk> {
        RotationSlot::EXPOSURE_ORDER
            .iter()
            .filter_map(|slot| self.slots.get(slot))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Shared cache of the current key snapshot.
pub struct KeyCache {
    config: JwksFileConfig,
    snapshot: RwLock<Arc<KeySnapshot>>,
}

impl KeyCache {
    /// Load all slots and build the cache.
    ///
    /// Fails if any slot cannot be loaded; no cache exists in that case and
    /// the service must not start.
    #[instrument(skip_all, name = "issuer.keys.initialize")]
    pub async fn load(config: JwksFileConfig) -> Result<Self, KeyError> {
        tracing::info!(
            target: "issuer.keys",
            mount_path = %config.mount_path().display(),
            "Initializing JWKS cache"
        );

        let start = Instant::now();
        let snapshot = match KeySnapshot::build(&config).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                record_key_refresh("error", start.elapsed());
                return Err(e);
            }
        };
        record_key_refresh("success", start.elapsed());
        set_cached_keys(snapshot.len());

        tracing::info!(
            target: "issuer.keys",
            key_count = snapshot.len(),
            "JWKS cache initialized"
        );

        Ok(Self {
            config,
            snapshot: RwLock::new(Arc::new(snapshot)),
        })
    }

    pub fn config(&self) -> &JwksFileConfig {
        &self.config
    }

    /// Current snapshot. The returned `Arc` stays valid across later swaps.
    pub async fn snapshot(&self) -> Arc<KeySnapshot> {
        Arc::clone(&*self.snapshot.read().await)
    }

    /// Current key set in exposure order.
    pub async fn jwks(&self) -> Jwks {
        Jwks {
            keys: self.snapshot().await.ordered_keys(),
        }
    }

    /// Realm summary built from the active key.
    ///
    /// Returns `None` only when the installed snapshot has no active key.
    pub async fn realm_info(&self, realm: &str) -> Option<RealmInfo> {
        let snapshot = self.snapshot().await;
        snapshot.get(RotationSlot::Active).map(|jwk| RealmInfo {
            realm: realm.to_string(),
            public_key: jwk.public_key.clone(),
        })
    }

    /// Install `snapshot`, replacing the current one in a single swap.
    pub async fn replace(&self, snapshot: KeySnapshot) {
        let key_count = snapshot.len();
        let snapshot = Arc::new(snapshot);
        *self.snapshot.write().await = snapshot;
        set_cached_keys(key_count);
    }

    /// Rebuild the snapshot from disk and install it.
    ///
    /// On failure the current snapshot is left untouched.
    #[instrument(skip_all, name = "issuer.keys.refresh")]
    pub async fn refresh(&self) -> Result<(), KeyError> {
        let start = Instant::now();

        match KeySnapshot::build(&self.config).await {
            Ok(snapshot) => {
                let key_count = snapshot.len();
                self.replace(snapshot).await;
                record_key_refresh("success", start.elapsed());
                tracing::debug!(target: "issuer.keys", key_count, "JWKS cache refreshed");
                Ok(())
            }
            Err(e) => {
                record_key_refresh("error", start.elapsed());
                Err(e)
            }
        }
    }
}
