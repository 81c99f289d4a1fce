//! Distinct filter values derived from the unfiltered point collection.
//!
//! Ordering differs per dimension: dataset ids and incubation times ascend
//! numerically, donors sort lexicographically, buffers stay in first-seen
//! order.

use std::collections::{BTreeSet, HashSet};

use api::{DatasetId, IncubationHours, PlotPoint};

use super::selection::{Dimension, FilterValue};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    pub datasets: Vec<DatasetId>,
    pub donors: Vec<String>,
    pub buffers: Vec<String>,
    pub incubation_times: Vec<IncubationHours>,
}

impl FilterOptions {
    pub fn derive(points: &[PlotPoint]) -> Self {
        let mut datasets = BTreeSet::new();
        let mut donors = BTreeSet::new();
        let mut incubation_times = BTreeSet::new();

        let mut seen_buffers = HashSet::new();
        let mut buffers = Vec::new();

        for point in points {
            let sample = &point.sample;
            datasets.insert(sample.dataset.id);
            donors.insert(sample.metadata.donor.clone());
            incubation_times.insert(sample.metadata.incubation_time);

            if seen_buffers.insert(sample.metadata.buffer.as_str()) {
                buffers.push(sample.metadata.buffer.clone());
            }
        }

        Self {
            datasets: datasets.into_iter().collect(),
            donors: donors.into_iter().collect(),
            buffers,
            incubation_times: incubation_times.into_iter().collect(),
        }
    }

    /// The options of one dimension as checkbox values, in display order.
    pub fn values(&self, dimension: Dimension) -> Vec<FilterValue> {
        match dimension {
            Dimension::Dataset => self.datasets.iter().copied().map(FilterValue::Dataset).collect(),
            Dimension::Donor => self.donors.iter().cloned().map(FilterValue::Donor).collect(),
            Dimension::Buffer => self.buffers.iter().cloned().map(FilterValue::Buffer).collect(),
            Dimension::IncubationTime => self
                .incubation_times
                .iter()
                .copied()
                .map(FilterValue::Incubation)
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
            && self.donors.is_empty()
            && self.buffers.is_empty()
            && self.incubation_times.is_empty()
    }
}
