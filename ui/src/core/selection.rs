//! The user's active filter values and target choice.
//!
//! An empty set means the dimension imposes no constraint, which is the same
//! outcome as every option being selected. Seeding selects everything.

use std::collections::BTreeSet;

use api::{DatasetId, IncubationHours, TargetId};

use super::options::FilterOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Dataset,
    Donor,
    Buffer,
    IncubationTime,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Dataset,
        Dimension::Donor,
        Dimension::Buffer,
        Dimension::IncubationTime,
    ];
}

/// A single checkbox value, tagged with the dimension it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilterValue {
    Dataset(DatasetId),
    Donor(String),
    Buffer(String),
    Incubation(IncubationHours),
}

impl FilterValue {
    pub fn dimension(&self) -> Dimension {
        match self {
            FilterValue::Dataset(_) => Dimension::Dataset,
            FilterValue::Donor(_) => Dimension::Donor,
            FilterValue::Buffer(_) => Dimension::Buffer,
            FilterValue::Incubation(_) => Dimension::IncubationTime,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    pub datasets: BTreeSet<DatasetId>,
    pub donors: BTreeSet<String>,
    pub buffers: BTreeSet<String>,
    pub incubation_times: BTreeSet<IncubationHours>,
    active_target: Option<TargetId>,
}

impl SelectionState {
    /// Every derived option selected, no active target. Used on each load so
    /// values from a previous snapshot never survive a reload.
    pub fn seeded(options: &FilterOptions) -> Self {
        Self {
            datasets: options.datasets.iter().copied().collect(),
            donors: options.donors.iter().cloned().collect(),
            buffers: options.buffers.iter().cloned().collect(),
            incubation_times: options.incubation_times.iter().copied().collect(),
            active_target: None,
        }
    }

    /// Adds `value` to its dimension if absent, removes it if present.
    pub fn toggle(&mut self, value: FilterValue) {
        fn flip<T: Ord>(set: &mut BTreeSet<T>, value: T) {
            if set.contains(&value) {
                set.remove(&value);
            } else {
                set.insert(value);
            }
        }

        match value {
            FilterValue::Dataset(id) => flip(&mut self.datasets, id),
            FilterValue::Donor(donor) => flip(&mut self.donors, donor),
            FilterValue::Buffer(buffer) => flip(&mut self.buffers, buffer),
            FilterValue::Incubation(hours) => flip(&mut self.incubation_times, hours),
        }
    }

    pub fn is_selected(&self, value: &FilterValue) -> bool {
        match value {
            FilterValue::Dataset(id) => self.datasets.contains(id),
            FilterValue::Donor(donor) => self.donors.contains(donor),
            FilterValue::Buffer(buffer) => self.buffers.contains(buffer),
            FilterValue::Incubation(hours) => self.incubation_times.contains(hours),
        }
    }

    pub fn selected_count(&self, dimension: Dimension) -> usize {
        match dimension {
            Dimension::Dataset => self.datasets.len(),
            Dimension::Donor => self.donors.len(),
            Dimension::Buffer => self.buffers.len(),
            Dimension::IncubationTime => self.incubation_times.len(),
        }
    }

    pub fn active_target(&self) -> Option<TargetId> {
        self.active_target
    }

    /// `None` disables target filtering and signal colouring.
    pub fn set_active_target(&mut self, target: Option<TargetId>) {
        self.active_target = target;
    }
}
