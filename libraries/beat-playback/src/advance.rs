//! Queue advance policy
//!
//! Decides which track comes next or before, given the queue, the current
//! track, shuffle and repeat. Planning is synchronous and pure; the only
//! suspension point is a trending refill, which the caller performs and then
//! hands back to [`RefillRequest::resolve`].
//!
//! `RepeatMode::One` is deliberately not consulted here. Looping a single
//! track is a reaction to the sink's `Ended` event, not an advance.

use beat_core::{Track, TrackId};
use rand::Rng;
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::shuffle::pick_other;
use crate::types::RepeatMode;

/// Inputs to an advance decision
#[derive(Debug, Clone, Copy)]
pub struct QueueContext<'a> {
    pub queue: &'a [Track],
    pub current: Option<&'a Track>,
    pub shuffle: bool,
    pub repeat: RepeatMode,
}

impl QueueContext<'_> {
    fn current_id(&self) -> Option<&TrackId> {
        self.current.map(|t| &t.id)
    }

    fn current_index(&self) -> Option<usize> {
        let id = self.current_id()?;
        self.queue.iter().position(|t| &t.id == id)
    }
}

/// A decided advance
#[derive(Debug, Clone, PartialEq)]
pub struct Advance {
    /// Track to make current
    pub track: Track,

    /// Replacement queue, when the advance came from a trending refill
    pub replace_queue: Option<Vec<Track>>,
}

impl Advance {
    fn pick(track: Track) -> Self {
        Self {
            track,
            replace_queue: None,
        }
    }
}

/// Outcome of planning a forward advance
#[derive(Debug, Clone, PartialEq)]
pub enum NextPlan {
    /// Nothing to advance to
    Stay,

    /// Advance within the current queue
    Pick(Track),

    /// The queue is exhausted; fetch trending before deciding
    Refill(RefillRequest),
}

/// A pending trending refill and what to do with its result
#[derive(Debug, Clone, PartialEq)]
pub struct RefillRequest {
    /// Ids a fetched track must not have to be chosen
    exclude: HashSet<TrackId>,

    /// Track to use when the fetch fails or brings nothing new
    fallback: Option<Track>,
}

impl RefillRequest {
    /// Choose from a fetched trending batch
    ///
    /// The first fetched track not excluded wins and the whole batch becomes
    /// the new queue. A failed or unusable fetch falls back (possibly to no
    /// advance at all).
    pub fn resolve(self, fetched: beat_core::Result<Vec<Track>>) -> Option<Advance> {
        let batch = match fetched {
            Ok(batch) => batch,
            Err(e) => {
                warn!(error = %e, "Trending refill failed");
                return self.fallback.map(Advance::pick);
            }
        };

        let chosen = batch.iter().find(|t| !self.exclude.contains(&t.id)).cloned();
        match chosen {
            Some(track) => {
                debug!(track_id = %track.id, batch = batch.len(), "Queue refilled from trending");
                Some(Advance {
                    track,
                    replace_queue: Some(batch),
                })
            }
            None => {
                debug!(batch = batch.len(), "Trending refill brought nothing new");
                self.fallback.map(Advance::pick)
            }
        }
    }

    pub fn fallback(&self) -> Option<&Track> {
        self.fallback.as_ref()
    }
}

/// Plan the next track
pub fn plan_next<R: Rng + ?Sized>(ctx: &QueueContext<'_>, rng: &mut R) -> NextPlan {
    if ctx.queue.is_empty() {
        // Played outside any queue: keep the music going from trending
        return match ctx.current {
            Some(current) => NextPlan::Refill(RefillRequest {
                exclude: HashSet::from([current.id.clone()]),
                fallback: None,
            }),
            None => NextPlan::Stay,
        };
    }

    if ctx.shuffle {
        return pick_other(ctx.queue, ctx.current_id(), rng).map_or(NextPlan::Stay, NextPlan::Pick);
    }

    let Some(index) = ctx.current_index() else {
        // Current track is not part of this queue: start at its head
        return NextPlan::Pick(ctx.queue[0].clone());
    };

    if index + 1 < ctx.queue.len() {
        return NextPlan::Pick(ctx.queue[index + 1].clone());
    }

    if ctx.repeat == RepeatMode::All {
        return NextPlan::Pick(ctx.queue[0].clone());
    }

    NextPlan::Refill(RefillRequest {
        exclude: ctx.queue.iter().map(|t| t.id.clone()).collect(),
        fallback: Some(ctx.queue[0].clone()),
    })
}

/// Pick the previous track
///
/// Sequential mode steps back and wraps from the head to the tail. Shuffle
/// draws at random exactly like a forward advance.
pub fn plan_previous<R: Rng + ?Sized>(ctx: &QueueContext<'_>, rng: &mut R) -> Option<Track> {
    if ctx.queue.is_empty() {
        return None;
    }

    if ctx.shuffle {
        return pick_other(ctx.queue, ctx.current_id(), rng);
    }

    match ctx.current_index() {
        Some(index) if index > 0 => Some(ctx.queue[index - 1].clone()),
        _ => ctx.queue.last().cloned(),
    }
}
