//! Memoized keystroke buffers keyed by (profile, category).
//!
//! ## Single-flight rendering
//!
//! Each key owns an `Arc<OnceCell<..>>`. The map lock is held only long
//! enough to fetch or insert that cell; rendering happens inside
//! [`OnceCell::get_or_try_init`], which blocks concurrent callers for the
//! *same* key until the first render finishes and lets every other key
//! proceed in parallel. Two threads asking for `(tactile, spacebar)` at once
//! therefore trigger exactly one render.
//!
//! ## Invalidation
//!
//! [`SoundCache::invalidate`] drops cells from the map. A render already in
//! flight for a dropped cell still completes and is handed to its waiters,
//! but the result never reaches the map, so the next `get` renders anew.
//!
//! Buffers are rendered with the key volume deferred
//! ([`RenderOptions::deferred_volume`]) so the same buffer serves any
//! volume setting; the mixer applies [`RenderedBuffer::volume_multiplier`].

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use mechvibe_core::{EntropySource, KeyCategory, ProfileId, RandomSource};
use once_cell::sync::OnceCell;
use parking_lot::{Mutex, RwLock};

use crate::buffer::RenderedBuffer;
use crate::error::{Result, SynthError};
use crate::profile::SwitchProfile;
use crate::registry::ProfileRegistry;
use crate::render::{RenderOptions, render_with};

/// Creates a fresh random source for each render.
pub type RngFactory = Arc<dyn Fn() -> Box<dyn RandomSource> + Send + Sync>;

type Slot = Arc<OnceCell<Arc<RenderedBuffer>>>;

/// Cache occupancy snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Rendered entries currently cached.
    pub entries: usize,
    /// Bytes held by cached sample data.
    pub bytes: usize,
    /// Renders performed since creation.
    pub renders: u64,
}

/// Thread-safe cache of rendered keystroke buffers.
pub struct SoundCache {
    registry: RwLock<ProfileRegistry>,
    sample_rate: u32,
    pitch_variation: AtomicU32,
    rng_factory: RngFactory,
    slots: Mutex<HashMap<(ProfileId, KeyCategory), Slot>>,
    renders: AtomicU64,
}

impl std::fmt::Debug for SoundCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundCache")
            .field("sample_rate", &self.sample_rate)
            .field("pitch_variation", &self.pitch_variation())
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

impl SoundCache {
    /// Cache over the built-in profiles, seeding each render from the OS.
    pub fn new(sample_rate: u32) -> Self {
        Self::with_registry(ProfileRegistry::new(), sample_rate)
    }

    /// Cache over a custom registry.
    pub fn with_registry(registry: ProfileRegistry, sample_rate: u32) -> Self {
        Self {
            registry: RwLock::new(registry),
            sample_rate,
            pitch_variation: AtomicU32::new(0.0f32.to_bits()),
            rng_factory: Arc::new(|| Box::new(EntropySource::new())),
            slots: Mutex::new(HashMap::new()),
            renders: AtomicU64::new(0),
        }
    }

    /// Replace the random source factory (for deterministic tests).
    #[must_use]
    pub fn with_rng_factory(mut self, factory: RngFactory) -> Self {
        self.rng_factory = factory;
        self
    }

    /// Sample rate buffers are rendered at.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Set the pitch jitter depth used by future renders.
    ///
    /// Already cached buffers are kept.
    pub fn set_pitch_variation(&self, depth: f32) {
        self.pitch_variation.store(depth.to_bits(), Ordering::Relaxed);
    }

    /// Current pitch jitter depth.
    pub fn pitch_variation(&self) -> f32 {
        f32::from_bits(self.pitch_variation.load(Ordering::Relaxed))
    }

    /// Copy of the registered profile for `id`.
    pub fn profile(&self, id: ProfileId) -> Option<SwitchProfile> {
        self.registry.read().get(id).cloned()
    }

    /// Register (or replace) a profile and drop its cached buffers.
    pub fn register_profile(&self, profile: SwitchProfile) {
        let id = profile.id;
        self.registry.write().register(profile);
        self.invalidate(Some(id));
    }

    /// Get the buffer for `(profile, category)`, rendering it on first use.
    ///
    /// Repeated calls return the same `Arc` until the entry is invalidated.
    pub fn get(&self, profile: ProfileId, category: KeyCategory) -> Result<Arc<RenderedBuffer>> {
        let slot = {
            let mut slots = self.slots.lock();
            Arc::clone(slots.entry((profile, category)).or_default())
        };
        slot.get_or_try_init(|| self.render_entry(profile, category))
            .map(Arc::clone)
    }

    /// Cached buffer for `(profile, category)` without rendering.
    pub fn peek(&self, profile: ProfileId, category: KeyCategory) -> Option<Arc<RenderedBuffer>> {
        let slots = self.slots.lock();
        slots
            .get(&(profile, category))
            .and_then(|slot| slot.get().cloned())
    }

    /// Render every category of `profile` that is not cached yet.
    ///
    /// Returns the number of categories that rendered successfully.
    pub fn prewarm(&self, profile: ProfileId) -> usize {
        KeyCategory::ALL
            .into_iter()
            .filter(|&category| match self.get(profile, category) {
                Ok(_) => true,
                Err(e) => {
                    tracing::warn!(profile = %profile, category = %category, error = %e, "prewarm failed");
                    false
                }
            })
            .count()
    }

    /// Drop cached buffers for `profile`, or every buffer when `None`.
    pub fn invalidate(&self, profile: Option<ProfileId>) {
        let mut slots = self.slots.lock();
        let before = slots.len();
        match profile {
            Some(id) => slots.retain(|(p, _), _| *p != id),
            None => slots.clear(),
        }
        tracing::debug!(
            profile = ?profile,
            dropped = before - slots.len(),
            "sound cache invalidated"
        );
    }

    /// Number of rendered entries.
    pub fn len(&self) -> usize {
        self.slots.lock().values().filter(|s| s.get().is_some()).count()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entry count, memory use and render count.
    pub fn stats(&self) -> CacheStats {
        let slots = self.slots.lock();
        let (entries, bytes) = slots
            .values()
            .filter_map(|s| s.get())
            .fold((0, 0), |(n, b), buf| (n + 1, b + buf.memory_bytes()));
        CacheStats {
            entries,
            bytes,
            renders: self.renders.load(Ordering::Relaxed),
        }
    }

    fn render_entry(&self, id: ProfileId, category: KeyCategory) -> Result<Arc<RenderedBuffer>> {
        let profile = self.profile(id).ok_or(SynthError::UnknownProfile(id))?;
        let options = RenderOptions::new(self.sample_rate)
            .pitch_variation(self.pitch_variation())
            .deferred_volume();
        let mut rng = (self.rng_factory)();
        let buffer = render_with(&profile, category, options, &mut *rng)?;
        self.renders.fetch_add(1, Ordering::Relaxed);
        Ok(Arc::new(buffer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mechvibe_core::Silence;

    fn cache() -> SoundCache {
        SoundCache::new(22050).with_rng_factory(Arc::new(|| Box::new(Silence)))
    }

    #[test]
    fn test_get_is_idempotent() {
        let cache = cache();
        let a = cache.get(ProfileId::Tactile, KeyCategory::Enter).unwrap();
        let b = cache.get(ProfileId::Tactile, KeyCategory::Enter).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.stats().renders, 1);
    }

    #[test]
    fn test_invalidate_single_profile() {
        let cache = cache();
        let tactile = cache.get(ProfileId::Tactile, KeyCategory::Default).unwrap();
        let clicky = cache.get(ProfileId::Clicky, KeyCategory::Default).unwrap();

        cache.invalidate(Some(ProfileId::Tactile));

        let tactile2 = cache.get(ProfileId::Tactile, KeyCategory::Default).unwrap();
        let clicky2 = cache.get(ProfileId::Clicky, KeyCategory::Default).unwrap();
        assert!(!Arc::ptr_eq(&tactile, &tactile2));
        assert!(Arc::ptr_eq(&clicky, &clicky2));
    }

    #[test]
    fn test_invalidate_all() {
        let cache = cache();
        cache.get(ProfileId::Linear, KeyCategory::Tab).unwrap();
        cache.get(ProfileId::Clicky, KeyCategory::Tab).unwrap();
        assert_eq!(cache.len(), 2);
        cache.invalidate(None);
        assert!(cache.is_empty());
        assert!(cache.peek(ProfileId::Linear, KeyCategory::Tab).is_none());
    }

    #[test]
    fn test_stats_bytes() {
        let cache = cache();
        let buf = cache.get(ProfileId::Linear, KeyCategory::Default).unwrap();
        let stats = cache.stats();
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.bytes, buf.frames() * 2 * 4);
    }

    #[test]
    fn test_cached_buffers_defer_volume() {
        let cache = cache();
        let buf = cache.get(ProfileId::Linear, KeyCategory::Spacebar).unwrap();
        assert_eq!(buf.volume_multiplier(), 1.2);
    }

    #[test]
    fn test_unknown_profile_errors_and_is_not_cached() {
        let cache = SoundCache::with_registry(ProfileRegistry::empty(), 22050);
        let err = cache.get(ProfileId::Clicky, KeyCategory::Default).unwrap_err();
        assert_eq!(err, SynthError::UnknownProfile(ProfileId::Clicky));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_register_profile_invalidates() {
        let cache = cache();
        let before = cache.get(ProfileId::Linear, KeyCategory::Default).unwrap();
        let mut tuned = cache.profile(ProfileId::Linear).unwrap();
        tuned.adjustments.default.duration = 0.1;
        cache.register_profile(tuned);

        let after = cache.get(ProfileId::Linear, KeyCategory::Default).unwrap();
        assert_ne!(before.frames(), after.frames());
        assert_eq!(after.frames(), 2205);
    }

    #[test]
    fn test_prewarm_renders_every_category() {
        let cache = cache();
        assert_eq!(cache.prewarm(ProfileId::Typewriter), KeyCategory::ALL.len());
        assert_eq!(cache.len(), KeyCategory::ALL.len());
        // A second prewarm is served from the cache
        cache.prewarm(ProfileId::Typewriter);
        assert_eq!(cache.stats().renders, KeyCategory::ALL.len() as u64);
    }
}
