//! Splitting one employee's shift into zone blocks.
//!
//! Editing happens in two phases. While splitting, boundaries are added or
//! undone inside the shift blocks; while assigning, each block receives a
//! zone. Every rejected edit leaves the editor exactly as it was.

use super::models::{DayEmployee, ZoneAssignment, ZoneSegment};
use crate::utils::time::{format_time_short, TimePoint, TimeRange, SLOT_MINUTES};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Rejections raised while splitting a shift into zones
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum SplitError {
    #[error("Employee has no shift to split")]
    #[diagnostic(code(dco::split::no_shift))]
    NoShift,

    #[error("{0} is already a block boundary")]
    #[diagnostic(code(dco::split::boundary))]
    AlreadyBoundary(String),

    #[error("{0} falls in a break gap, not a shift block")]
    #[diagnostic(code(dco::split::break_gap))]
    InBreakGap(String),

    #[error("{0} is outside the shift")]
    #[diagnostic(code(dco::split::outside_shift))]
    OutsideShift(String),

    #[error("{0} is not on a half-hour mark")]
    #[diagnostic(code(dco::split::off_grid))]
    OffSlotGrid(String),

    #[error("Add at least one split before setting zones")]
    #[diagnostic(code(dco::split::no_splits))]
    NoSplits,

    #[error("No splits to remove")]
    #[diagnostic(code(dco::split::nothing_to_undo))]
    NothingToUndo,

    #[error("Go back to splitting before changing block boundaries")]
    #[diagnostic(code(dco::split::phase))]
    NotSplitting,

    #[error("Block {0} has no zone assigned")]
    #[diagnostic(code(dco::split::missing_zone))]
    MissingZone(usize),

    #[error("No block at position {0}")]
    #[diagnostic(code(dco::split::block_index))]
    BlockOutOfRange(usize),

    #[error("Zone segment {0} overlaps the segment before it")]
    #[diagnostic(code(dco::split::overlap))]
    Overlap(String),

    #[error("Zone segment {0} lies outside the shift")]
    #[diagnostic(code(dco::split::segment_outside))]
    SegmentOutsideShift(String),
}

/// Check that segments are ordered, disjoint, zoned and inside the shift
pub fn validate_segments(segments: &[ZoneSegment], span: TimeRange) -> Result<(), SplitError> {
    if segments.is_empty() {
        return Err(SplitError::NoSplits);
    }
    let mut previous_end: Option<TimePoint> = None;
    for (i, segment) in segments.iter().enumerate() {
        if segment.zone.trim().is_empty() {
            return Err(SplitError::MissingZone(i + 1));
        }
        if segment.start() < span.start() || segment.end() > span.end() {
            return Err(SplitError::SegmentOutsideShift(segment.range.format_short()));
        }
        if previous_end.is_some_and(|end| segment.start() < end) {
            return Err(SplitError::Overlap(segment.range.format_short()));
        }
        previous_end = Some(segment.end());
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitPhase {
    Splitting,
    Assigning,
}

/// A contiguous piece of the shift and the zone chosen for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitBlock {
    pub range: TimeRange,
    pub zone: Option<String>,
}

impl SplitBlock {
    fn unzoned(range: TimeRange) -> Self {
        Self { range, zone: None }
    }
}

#[derive(Debug, Clone)]
pub struct SplitEditor {
    span: TimeRange,
    original: Vec<TimeRange>,
    blocks: Vec<SplitBlock>,
    /// Split points in the order they were added
    history: Vec<TimePoint>,
    phase: SplitPhase,
    current: usize,
}

impl SplitEditor {
    /// Start from the employee's existing split, or from their shift segments
    pub fn new(employee: &DayEmployee) -> Result<Self, SplitError> {
        let span = employee.span().ok_or(SplitError::NoShift)?;
        let original = employee.shift_segments.clone();

        let blocks: Vec<SplitBlock> = match &employee.zone {
            ZoneAssignment::Split(segments) if !segments.is_empty() => segments
                .iter()
                .map(|s| SplitBlock {
                    range: s.range,
                    zone: Some(s.zone.clone()),
                })
                .collect(),
            _ => original.iter().copied().map(SplitBlock::unzoned).collect(),
        };
        // Boundaries that are not shift segment starts came from earlier splits
        let history = blocks
            .iter()
            .map(|b| b.range.start())
            .filter(|start| !original.iter().any(|o| o.start() == *start))
            .collect();

        Ok(Self {
            span,
            original,
            blocks,
            history,
            phase: SplitPhase::Splitting,
            current: 0,
        })
    }

    pub fn blocks(&self) -> &[SplitBlock] {
        &self.blocks
    }

    pub fn phase(&self) -> SplitPhase {
        self.phase
    }

    /// Index of the block being edited
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn split_count(&self) -> usize {
        self.history.len()
    }

    /// Number of blocks that already have a zone
    pub fn zoned_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.zone.is_some()).count()
    }

    /// Split the block containing `at` into two
    pub fn add_split(&mut self, at: TimePoint) -> Result<(), SplitError> {
        if self.phase != SplitPhase::Splitting {
            return Err(SplitError::NotSplitting);
        }
        let label = format_time_short(at);
        if at.minutes() % SLOT_MINUTES != 0 {
            return Err(SplitError::OffSlotGrid(label));
        }
        if self
            .blocks
            .iter()
            .any(|b| b.range.start() == at || b.range.end() == at)
        {
            return Err(SplitError::AlreadyBoundary(label));
        }
        if !self.span.contains(at) {
            return Err(SplitError::OutsideShift(label));
        }
        let Some(index) = self.blocks.iter().position(|b| b.range.contains(at)) else {
            return Err(SplitError::InBreakGap(label));
        };

        let block = &self.blocks[index];
        let (Some(head), Some(tail)) = (
            TimeRange::new(block.range.start(), at),
            TimeRange::new(at, block.range.end()),
        ) else {
            return Err(SplitError::AlreadyBoundary(label));
        };
        let head = SplitBlock {
            range: head,
            zone: block.zone.clone(),
        };
        self.blocks[index] = head;
        self.blocks.insert(index + 1, SplitBlock::unzoned(tail));
        self.history.push(at);
        self.current = index + 1;
        debug!(at = %label, blocks = self.blocks.len(), "Added split");
        Ok(())
    }

    /// Undo the most recently added split
    pub fn remove_last_split(&mut self) -> Result<(), SplitError> {
        if self.phase != SplitPhase::Splitting {
            return Err(SplitError::NotSplitting);
        }
        let Some(&at) = self.history.last() else {
            return Err(SplitError::NothingToUndo);
        };
        let Some(index) = self.blocks.windows(2).position(|pair| {
            pair[0].range.end() == at && pair[1].range.start() == at
        }) else {
            return Err(SplitError::NothingToUndo);
        };
        let Some(merged) =
            TimeRange::new(self.blocks[index].range.start(), self.blocks[index + 1].range.end())
        else {
            return Err(SplitError::NothingToUndo);
        };

        self.history.pop();
        self.blocks[index].range = merged;
        self.blocks.remove(index + 1);
        self.current = self.current.min(self.blocks.len() - 1);
        Ok(())
    }

    /// Return to the plain shift segments
    pub fn remove_all_splits(&mut self) {
        self.blocks = self.original.iter().copied().map(SplitBlock::unzoned).collect();
        self.history.clear();
        self.phase = SplitPhase::Splitting;
        self.current = 0;
    }

    /// Move on to zone assignment, clearing previous zone choices
    pub fn begin_assignment(&mut self) -> Result<(), SplitError> {
        if self.blocks.len() < 2 {
            return Err(SplitError::NoSplits);
        }
        for block in &mut self.blocks {
            block.zone = None;
        }
        self.phase = SplitPhase::Assigning;
        self.current = 0;
        Ok(())
    }

    pub fn back_to_splitting(&mut self) {
        self.phase = SplitPhase::Splitting;
    }

    pub fn select_block(&mut self, index: usize) -> Result<(), SplitError> {
        if index >= self.blocks.len() {
            return Err(SplitError::BlockOutOfRange(index));
        }
        self.current = index;
        Ok(())
    }

    /// Zone the current block and advance to the next one
    pub fn assign_current(&mut self, zone: &str) -> Result<(), SplitError> {
        let zone = zone.trim();
        if zone.is_empty() {
            return Err(SplitError::MissingZone(self.current + 1));
        }
        self.blocks[self.current].zone = Some(zone.to_string());
        if self.current + 1 < self.blocks.len() {
            self.current += 1;
        }
        Ok(())
    }

    /// Zone segments for every block; fails on the first unzoned block
    pub fn finish(&self) -> Result<Vec<ZoneSegment>, SplitError> {
        self.blocks
            .iter()
            .enumerate()
            .map(|(i, block)| match &block.zone {
                Some(zone) => Ok(ZoneSegment::new(block.range, zone)),
                None => Err(SplitError::MissingZone(i + 1)),
            })
            .collect()
    }

    /// Finish and store the segments on the employee
    pub fn apply_to(&self, employee: &mut DayEmployee) -> Result<(), SplitError> {
        let segments = self.finish()?;
        employee.apply_split(segments)
    }
}
