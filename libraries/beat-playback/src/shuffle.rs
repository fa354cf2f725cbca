//! Shuffle pick
//!
//! Shuffle does not reorder the queue; every advance draws one track
//! uniformly from the queue, skipping the one that is playing.

use beat_core::{Track, TrackId};
use rand::seq::IteratorRandom;
use rand::Rng;

/// Pick a random queue entry other than `current`
///
/// Falls back to the head of the queue when the current track is the only
/// entry. Returns `None` only for an empty queue.
pub fn pick_other<R: Rng + ?Sized>(
    queue: &[Track],
    current: Option<&TrackId>,
    rng: &mut R,
) -> Option<Track> {
    queue
        .iter()
        .filter(|t| Some(&t.id) != current)
        .choose(rng)
        .or_else(|| queue.first())
        .cloned()
}
