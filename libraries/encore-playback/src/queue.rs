//! Ordered track queue
//!
//! The queue is supplied from outside (search results, a listing) and is
//! read-only here. All "is there a next/previous track" questions are
//! answered by [`TrackQueue::neighbor`] so every caller shares one
//! boundary rule.

use encore_core::{Track, TrackId};
use std::collections::HashSet;

use crate::error::{PlaybackError, Result};
use crate::types::{Direction, QueueEntry};

/// Ordered sequence of unique tracks
///
/// ```text
///   index:   0      1      2
///          [ A ] [ B ] [ C ]
///   neighbor(0, Backward) = None      neighbor(2, Forward) = None
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackQueue {
    entries: Vec<QueueEntry>,
}

impl TrackQueue {
    /// Build a queue, rejecting duplicate track ids
    pub fn new(entries: Vec<QueueEntry>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.id()) {
                return Err(PlaybackError::DuplicateTrack(entry.id().clone()));
            }
        }

        Ok(Self { entries })
    }

    /// Build a queue from bare tracks
    pub fn from_tracks(tracks: impl IntoIterator<Item = Track>) -> Result<Self> {
        Self::new(tracks.into_iter().map(QueueEntry::new).collect())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the queue has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`
    pub fn get(&self, index: usize) -> Option<&QueueEntry> {
        self.entries.get(index)
    }

    /// Entries in queue order
    pub fn iter(&self) -> impl Iterator<Item = &QueueEntry> {
        self.entries.iter()
    }

    /// Index of the first entry whose track has `id`
    pub fn index_of(&self, id: &TrackId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id() == id)
    }

    /// Entry whose track has `id`
    pub fn entry(&self, id: &TrackId) -> Option<&QueueEntry> {
        self.index_of(id).and_then(|index| self.entries.get(index))
    }

    /// Whether a track with `id` is queued
    pub fn contains(&self, id: &TrackId) -> bool {
        self.index_of(id).is_some()
    }

    /// Entry one step away from `index`
    ///
    /// Returns `None` when the step leaves `[0, len)`.
    pub fn neighbor(&self, index: usize, direction: Direction) -> Option<&QueueEntry> {
        let target = match direction {
            Direction::Forward => index.checked_add(1)?,
            Direction::Backward => index.checked_sub(1)?,
        };
        self.entries.get(target)
    }

    /// Entry one step away from the track with `id`
    ///
    /// `None` also covers the case where `id` is not queued at all.
    pub fn neighbor_of(&self, id: &TrackId, direction: Direction) -> Option<&QueueEntry> {
        self.neighbor(self.index_of(id)?, direction)
    }
}

impl<'a> IntoIterator for &'a TrackQueue {
    type Item = &'a QueueEntry;
    type IntoIter = std::slice::Iter<'a, QueueEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encore_core::User;

    fn create_test_track(id: &str) -> Track {
        Track::new(id, format!("Track {}", id), User::new("Test Artist"))
    }

    fn abc() -> TrackQueue {
        TrackQueue::from_tracks(["a", "b", "c"].map(create_test_track)).unwrap()
    }

    #[test]
    fn create_empty_queue() {
        let queue = TrackQueue::default();
        assert_eq!(queue.len(), 0);
        assert!(queue.is_empty());
        assert!(queue.neighbor(0, Direction::Forward).is_none());
        assert!(queue.neighbor(0, Direction::Backward).is_none());
    }

    #[test]
    fn rejects_duplicate_tracks() {
        let result = TrackQueue::from_tracks(vec![
            create_test_track("a"),
            create_test_track("b"),
            create_test_track("a"),
        ]);

        match result {
            Err(PlaybackError::DuplicateTrack(id)) => assert_eq!(id.as_str(), "a"),
            other => panic!("expected duplicate error, got {:?}", other),
        }
    }

    #[test]
    fn index_of_matches_by_id() {
        let queue = abc();
        assert_eq!(queue.index_of(&TrackId::new("a")), Some(0));
        assert_eq!(queue.index_of(&TrackId::new("c")), Some(2));
        assert_eq!(queue.index_of(&TrackId::new("missing")), None);
    }

    #[test]
    fn neighbors_respect_boundaries() {
        let queue = abc();

        assert!(queue.neighbor(0, Direction::Backward).is_none());
        assert_eq!(queue.neighbor(0, Direction::Forward).unwrap().id().as_str(), "b");
        assert_eq!(queue.neighbor(1, Direction::Backward).unwrap().id().as_str(), "a");
        assert_eq!(queue.neighbor(1, Direction::Forward).unwrap().id().as_str(), "c");
        assert!(queue.neighbor(2, Direction::Forward).is_none());
    }

    #[test]
    fn neighbor_of_unknown_track_is_none() {
        let queue = abc();
        let missing = TrackId::new("zzz");
        assert!(queue.neighbor_of(&missing, Direction::Forward).is_none());
        assert!(queue.neighbor_of(&missing, Direction::Backward).is_none());
    }

    #[test]
    fn entry_keeps_samples() {
        let queue = TrackQueue::new(vec![
            QueueEntry::new(create_test_track("a")).with_samples(vec![0.1, 0.5, 0.2]),
        ])
        .unwrap();

        let entry = queue.entry(&TrackId::new("a")).unwrap();
        assert_eq!(entry.samples.as_deref(), Some(&[0.1, 0.5, 0.2][..]));
    }
}
