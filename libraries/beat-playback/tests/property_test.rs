//! Property-based tests for the playback store
//!
//! Uses proptest to check invariants over arbitrary command sequences.

use async_trait::async_trait;
use beat_core::{BeatError, MarketplaceApi, Track, TrackId};
use beat_playback::{clamp_volume, PlaybackConfig, PlaybackStore, RecentlyPlayed, RepeatMode};
use beat_storage::MemoryStore;
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

// ===== Helpers =====

struct Offline;

#[async_trait]
impl MarketplaceApi for Offline {
    async fn get_trending(&self, _limit: usize) -> beat_core::Result<Vec<Track>> {
        Err(BeatError::network("offline"))
    }

    async fn record_play(&self, _track_id: &TrackId) -> beat_core::Result<()> {
        Ok(())
    }
}

fn store() -> PlaybackStore {
    PlaybackStore::new(
        Arc::new(Offline),
        Arc::new(MemoryStore::new()),
        PlaybackConfig::default(),
    )
}

/// Small id space so sequences revisit tracks often
fn arbitrary_track() -> impl Strategy<Value = Track> {
    (0u64..40, "[A-Za-z ]{1,20}").prop_map(|(id, title)| {
        Track::new(id, title, format!("https://cdn.example.com/{}.mp3", id))
    })
}

fn arbitrary_queue() -> impl Strategy<Value = Vec<Track>> {
    prop::collection::vec(arbitrary_track(), 1..12).prop_map(|tracks| {
        let mut seen = HashSet::new();
        tracks
            .into_iter()
            .filter(|t| seen.insert(t.id.clone()))
            .collect()
    })
}

fn assert_history_invariants(history: &RecentlyPlayed) -> Result<(), TestCaseError> {
    prop_assert!(history.len() <= 20);
    let ids: HashSet<_> = history.iter().map(|t| t.id.clone()).collect();
    prop_assert_eq!(ids.len(), history.len(), "duplicate ids in history");
    Ok(())
}

// ===== Property Tests =====

proptest! {
    /// Property: history stays bounded, unique and newest-first
    #[test]
    fn history_bounded_unique_newest_first(
        plays in prop::collection::vec(arbitrary_track(), 1..100)
    ) {
        let mut store = store();

        for track in plays {
            store.play_track(track.clone(), None);

            let history = &store.state().recently_played;
            assert_history_invariants(history)?;
            prop_assert_eq!(&history.latest().unwrap().id, &track.id);
        }
    }

    /// Property: three toggles return to the starting repeat mode
    #[test]
    fn repeat_cycle_has_period_three(start in 0usize..3) {
        let mut store = store();
        for _ in 0..start {
            store.toggle_repeat();
        }
        let initial = store.state().repeat;

        for _ in 0..3 {
            store.toggle_repeat();
        }

        prop_assert_eq!(store.state().repeat, initial);
        prop_assert_eq!(initial.cycle().cycle().cycle(), initial);
    }

    /// Property: stored volume is always inside [0, 1]
    #[test]
    fn volume_always_in_range(volume in prop::num::f32::ANY) {
        let mut store = store();
        store.set_volume(volume);

        let stored = store.state().volume;
        prop_assert!((0.0..=1.0).contains(&stored));
        prop_assert_eq!(stored, clamp_volume(volume));
    }

    /// Property: sequential previous always lands inside the queue
    #[test]
    fn previous_stays_in_queue(queue in arbitrary_queue(), start in 0usize..12, steps in 1usize..30) {
        let mut store = store();
        let first = queue[start % queue.len()].clone();
        store.play_track(first, Some(queue.clone()));

        let ids: HashSet<_> = queue.iter().map(|t| t.id.clone()).collect();
        for _ in 0..steps {
            let track = store.previous_track().unwrap();
            prop_assert!(ids.contains(&track.id));
        }
        assert_history_invariants(&store.state().recently_played)?;
    }

    /// Property: shuffle never picks the current track when alternatives exist
    #[test]
    fn shuffle_previous_excludes_current(queue in arbitrary_queue(), steps in 1usize..30) {
        prop_assume!(queue.len() > 1);

        let mut store = store();
        store.play_track(queue[0].clone(), Some(queue.clone()));
        store.toggle_shuffle();

        for _ in 0..steps {
            let before = store.state().current_track.clone().unwrap();
            let picked = store.previous_track().unwrap();
            prop_assert_ne!(picked.id, before.id);
        }
    }
}

#[test]
fn repeat_cycle_order() {
    let mut mode = RepeatMode::Off;
    let mut seen = Vec::new();
    for _ in 0..3 {
        mode = mode.cycle();
        seen.push(mode);
    }
    assert_eq!(seen, [RepeatMode::One, RepeatMode::All, RepeatMode::Off]);
}
