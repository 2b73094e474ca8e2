//! Media attribute types

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

/// Preload hint for a media element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Preload {
    /// Do not fetch until playback is requested
    None,
    /// Fetch metadata only
    #[default]
    Metadata,
    /// Fetch eagerly
    Auto,
}

impl Preload {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preload::None => "none",
            Preload::Metadata => "metadata",
            Preload::Auto => "auto",
        }
    }
}

/// How much of the resource is available for playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum ReadyState {
    #[default]
    HaveNothing = 0,
    HaveMetadata = 1,
    HaveCurrentData = 2,
    HaveFutureData = 3,
    HaveEnoughData = 4,
}

impl ReadyState {
    /// Numeric value as exposed by the host
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether playback can advance at this state
    pub fn can_play(self) -> bool {
        self >= ReadyState::HaveFutureData
    }
}

impl Serialize for ReadyState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

/// Ordered, non-overlapping time ranges in seconds
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeRanges {
    ranges: Vec<(f64, f64)>,
}

impl TimeRanges {
    /// Create an empty set of ranges
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set holding a single range
    pub fn single(start: f64, end: f64) -> Self {
        let mut ranges = Self::new();
        ranges.add(start, end);
        ranges
    }

    /// Add a range, merging it with any range it overlaps or touches
    pub fn add(&mut self, start: f64, end: f64) {
        if !(start.is_finite() && end.is_finite()) || end < start {
            return;
        }

        let mut merged = (start, end);
        let mut kept = Vec::with_capacity(self.ranges.len() + 1);

        for &(s, e) in &self.ranges {
            if e < merged.0 || s > merged.1 {
                kept.push((s, e));
            } else {
                merged = (merged.0.min(s), merged.1.max(e));
            }
        }

        let pos = kept
            .iter()
            .position(|&(s, _)| s > merged.0)
            .unwrap_or(kept.len());
        kept.insert(pos, merged);
        self.ranges = kept;
    }

    /// Remove all ranges
    pub fn clear(&mut self) {
        self.ranges.clear();
    }

    /// Number of ranges
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Start of the range at `index`
    pub fn start(&self, index: usize) -> Option<f64> {
        self.ranges.get(index).map(|&(s, _)| s)
    }

    /// End of the range at `index`
    pub fn end(&self, index: usize) -> Option<f64> {
        self.ranges.get(index).map(|&(_, e)| e)
    }

    /// Whether `time` falls inside any range
    pub fn contains(&self, time: f64) -> bool {
        self.ranges.iter().any(|&(s, e)| s <= time && time <= e)
    }

    /// Iterate over `(start, end)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.ranges.iter().copied()
    }
}

impl Serialize for TimeRanges {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.ranges.len()))?;
        for (start, end) in &self.ranges {
            seq.serialize_element(&[start, end])?;
        }
        seq.end()
    }
}
