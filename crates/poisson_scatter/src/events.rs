//! Event types and sinks for observing sampling runs.
//!
//! This module defines [`SamplingEvent`] and a small set of sinks to emit, collect,
//! or forward events while a run executes via
//! [`crate::sampling::poisson_disk::sample`]. Sinks are purely observational; a run
//! behaves identically whichever sink is attached.
use glam::Vec2;

use crate::geometry::Rect;
use crate::sampling::poisson_disk::SamplingStats;

/// Describes events emitted by a sampling run.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum SamplingEvent {
    /// Emitted once before any point is placed.
    RunStarted {
        /// Sampling domain.
        bounds: Rect,
        /// Number of caller-supplied initial points.
        initial_count: usize,
        /// Candidates spawned per active point.
        k: usize,
    },

    /// Emitted when the domain center is used because no initial points were given.
    Seeded {
        /// The seeded position.
        position: Vec2,
    },

    /// Emitted when a candidate passes every test and joins the output.
    PointAccepted {
        /// Accepted position.
        position: Vec2,
        /// Active point the candidate was spawned around.
        parent: Vec2,
        /// Separation that was enforced for this candidate.
        separation: f32,
    },

    /// A point joined the output but could not be placed in the spatial grid.
    /// Later queries will not see it.
    IndexInsertDropped {
        /// The point that was not indexed.
        position: Vec2,
    },

    /// An active point produced a non-finite or non-positive separation and
    /// spawned no candidates.
    SeparationSkipped {
        /// The active point.
        position: Vec2,
        /// The separation it produced.
        separation: f32,
    },

    /// Emitted once the active list is exhausted.
    RunFinished {
        /// Counters for the whole run.
        stats: SamplingStats,
    },
}

/// A generic event sink that accepts [`SamplingEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: SamplingEvent);

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = SamplingEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: SamplingEvent) {}
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    #[inline]
    fn send(&mut self, event: SamplingEvent) {
        (**self).send(event);
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(SamplingEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(SamplingEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(SamplingEvent),
{
    #[inline]
    fn send(&mut self, event: SamplingEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<SamplingEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<SamplingEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[SamplingEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: SamplingEvent) {
        self.events.push(event);
    }
}
