// /////////////////////////////////////////////////////////////////////////////
// Waveforge
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Chunk: the streaming unit, and the waveform `Record` shape it carries.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::WaveforgeError;

/// Where a record's raw samples live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Samples {
    /// Samples stored inline in the record.
    Inline(Vec<i16>),
    /// Samples stored in a separate `wave_pool`, referenced by offset.
    Pooled { offset: u64, length: u32 },
}

/// Minimum-viable waveform record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Absolute (if epoch known) or relative time, nanoseconds.
    pub time: i64,
    /// Raw digitizer timestamp, picoseconds.
    pub timestamp: i64,
    /// Sample interval, nanoseconds.
    pub dt: i32,
    /// Number of samples.
    pub length: i32,
    pub channel: i16,
    pub baseline: f64,
    pub samples: Samples,
}

impl Record {
    /// The record's exclusive end time in the same unit as `time`.
    pub fn end_time(&self) -> i64 {
        self.time + (self.dt as i64) * (self.length as i64)
    }
}

/// A record batch bounded by `[start, end)` in a unified time unit — the
/// streaming unit dispatched through the executor and emitted in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub data: Vec<Record>,
    pub start: i64,
    pub end: i64,
    pub run_id: String,
    pub chunk_index: u64,
    pub extra: Map<String, Value>,
}

impl Chunk {
    pub fn new(data: Vec<Record>, start: i64, end: i64, run_id: impl Into<String>, chunk_index: u64) -> Self {
        Self {
            data,
            start,
            end,
            run_id: run_id.into(),
            chunk_index,
            extra: Map::new(),
        }
    }

    /// Validates `start < end` and that every record satisfies
    /// `time + dt*length ≤ end`.
    pub fn validate_boundaries(&self) -> Result<(), WaveforgeError> {
        if self.start >= self.end {
            return Err(WaveforgeError::internal_error(format!(
                "chunk {} has start {} >= end {}",
                self.chunk_index, self.start, self.end
            )));
        }
        for record in &self.data {
            if record.end_time() > self.end {
                return Err(WaveforgeError::internal_error(format!(
                    "chunk {} record ends at {} past chunk end {}",
                    self.chunk_index,
                    record.end_time(),
                    self.end
                )));
            }
        }
        Ok(())
    }

    /// Restricts this chunk's data to `[start, end)`, dropping records that
    /// fall entirely outside the new bounds.
    pub fn clip(&self, start: i64, end: i64) -> Chunk {
        let data = self
            .data
            .iter()
            .filter(|r| r.time >= start && r.time < end)
            .cloned()
            .collect();
        Chunk {
            data,
            start,
            end,
            run_id: self.run_id.clone(),
            chunk_index: self.chunk_index,
            extra: self.extra.clone(),
        }
    }
}

/// Verifies a sequence of chunks is sorted by `start` and non-overlapping.
pub fn check_no_overlap(chunks: &[Chunk]) -> Result<(), WaveforgeError> {
    for pair in chunks.windows(2) {
        let [a, b] = pair else { unreachable!() };
        if a.start > b.start {
            return Err(WaveforgeError::internal_error("chunks are not sorted by start"));
        }
        if a.end > b.start {
            return Err(WaveforgeError::internal_error(format!(
                "chunk {} [{}, {}) overlaps chunk {} [{}, {})",
                a.chunk_index, a.start, a.end, b.chunk_index, b.start, b.end
            )));
        }
    }
    Ok(())
}

/// Verifies chunk indices are strictly increasing and contiguous from 0.
pub fn check_monotonic_indices(chunks: &[Chunk]) -> Result<(), WaveforgeError> {
    for (expected, chunk) in chunks.iter().enumerate() {
        if chunk.chunk_index != expected as u64 {
            return Err(WaveforgeError::internal_error(format!(
                "expected chunk index {expected}, found {}",
                chunk.chunk_index
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(time: i64, dt: i32, length: i32) -> Record {
        Record {
            time,
            timestamp: time * 1000,
            dt,
            length,
            channel: 0,
            baseline: 0.0,
            samples: Samples::Inline(vec![0; length as usize]),
        }
    }

    #[test]
    fn validate_boundaries_rejects_start_past_end() {
        let chunk = Chunk::new(vec![], 10, 10, "r", 0);
        assert!(chunk.validate_boundaries().is_err());
    }

    #[test]
    fn validate_boundaries_rejects_record_past_chunk_end() {
        let chunk = Chunk::new(vec![record(90, 2, 10)], 0, 100, "r", 0);
        assert!(chunk.validate_boundaries().is_err());
    }

    #[test]
    fn validate_boundaries_accepts_record_within_bounds() {
        let chunk = Chunk::new(vec![record(50, 2, 10)], 0, 100, "r", 0);
        assert!(chunk.validate_boundaries().is_ok());
    }

    #[test]
    fn clip_drops_records_outside_new_bounds() {
        let chunk = Chunk::new(vec![record(10, 1, 1), record(60, 1, 1)], 0, 100, "r", 0);
        let clipped = chunk.clip(50, 100);
        assert_eq!(clipped.data.len(), 1);
        assert_eq!(clipped.data[0].time, 60);
    }

    #[test]
    fn check_no_overlap_detects_overlapping_chunks() {
        let a = Chunk::new(vec![], 0, 50, "r", 0);
        let b = Chunk::new(vec![], 40, 90, "r", 1);
        assert!(check_no_overlap(&[a, b]).is_err());
    }

    #[test]
    fn check_no_overlap_accepts_adjacent_chunks() {
        let a = Chunk::new(vec![], 0, 50, "r", 0);
        let b = Chunk::new(vec![], 50, 90, "r", 1);
        assert!(check_no_overlap(&[a, b]).is_ok());
    }

    #[test]
    fn check_monotonic_indices_detects_gap() {
        let a = Chunk::new(vec![], 0, 50, "r", 0);
        let b = Chunk::new(vec![], 50, 90, "r", 2);
        assert!(check_monotonic_indices(&[a, b]).is_err());
    }
}
