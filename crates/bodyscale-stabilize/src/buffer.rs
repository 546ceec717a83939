//! Measurement buffer - the last N records in arrival order

use std::collections::VecDeque;

use bodyscale_core::MeasurementRecord;

/// Default buffer capacity (about two seconds of frames at 30 fps)
pub const MEASUREMENT_BUFFER_SIZE: usize = 60;

/// Fixed-capacity FIFO of measurement records
#[derive(Debug, Clone)]
pub struct MeasurementBuffer {
    records: VecDeque<MeasurementRecord>,
    capacity: usize,
}

impl Default for MeasurementBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl MeasurementBuffer {
    pub fn new() -> Self {
        Self::with_capacity(MEASUREMENT_BUFFER_SIZE)
    }

    /// Buffer holding at most `capacity` records (minimum 1)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        MeasurementBuffer {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a record, evicting the oldest when over capacity.
    /// Returns the evicted record, if any.
    pub fn push(&mut self, record: MeasurementRecord) -> Option<MeasurementRecord> {
        self.records.push_back(record);
        if self.records.len() > self.capacity {
            self.records.pop_front()
        } else {
            None
        }
    }

    pub(crate) fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.records.len() == self.capacity
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &MeasurementRecord> {
        self.records.iter()
    }

    pub fn latest(&self) -> Option<&MeasurementRecord> {
        self.records.back()
    }

    pub fn oldest(&self) -> Option<&MeasurementRecord> {
        self.records.front()
    }
}
