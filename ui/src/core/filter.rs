//! Join & filter pass: which points are displayed for a selection.
//!
//! Signals are pre-indexed by `(sample id, target id)`. When the backend
//! returns duplicate pairs the first record in input order wins, which is
//! what a front-to-back scan of the signal list would find.

use std::collections::HashMap;

use api::{PlotPoint, SampleId, SignalMeasurement, TargetId};

use super::selection::SelectionState;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalIndex {
    by_pair: HashMap<(SampleId, TargetId), f64>,
}

impl SignalIndex {
    pub fn build(signals: &[SignalMeasurement]) -> Self {
        let mut by_pair = HashMap::with_capacity(signals.len());
        for measurement in signals {
            by_pair
                .entry((measurement.sample.id, measurement.target.id))
                .or_insert(measurement.signal);
        }
        Self { by_pair }
    }

    pub fn lookup(&self, sample: SampleId, target: TargetId) -> Option<f64> {
        self.by_pair.get(&(sample, target)).copied()
    }

    pub fn contains(&self, sample: SampleId, target: TargetId) -> bool {
        self.by_pair.contains_key(&(sample, target))
    }

    pub fn len(&self) -> usize {
        self.by_pair.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_pair.is_empty()
    }
}

/// All five predicates must hold. An empty dimension set matches everything.
pub fn passes(point: &PlotPoint, index: &SignalIndex, selection: &SelectionState) -> bool {
    let sample = &point.sample;
    let metadata = &sample.metadata;

    let dataset_ok =
        selection.datasets.is_empty() || selection.datasets.contains(&sample.dataset.id);
    let donor_ok = selection.donors.is_empty() || selection.donors.contains(&metadata.donor);
    let buffer_ok = selection.buffers.is_empty() || selection.buffers.contains(&metadata.buffer);
    let incubation_ok = selection.incubation_times.is_empty()
        || selection
            .incubation_times
            .contains(&metadata.incubation_time);
    let target_ok = selection
        .active_target()
        .map_or(true, |target| index.contains(sample.id, target));

    dataset_ok && donor_ok && buffer_ok && incubation_ok && target_ok
}

/// Stable filter over `points` using a prebuilt index.
pub fn filter_indexed<'a>(
    points: &'a [PlotPoint],
    index: &SignalIndex,
    selection: &SelectionState,
) -> Vec<&'a PlotPoint> {
    points
        .iter()
        .filter(|point| passes(point, index, selection))
        .collect()
}

pub fn filter_points<'a>(
    points: &'a [PlotPoint],
    signals: &[SignalMeasurement],
    selection: &SelectionState,
) -> Vec<&'a PlotPoint> {
    let index = SignalIndex::build(signals);
    filter_indexed(points, &index, selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::IncubationHours;

    use crate::core::fixtures::{mixed_points, point, signal};
    use crate::core::options::FilterOptions;
    use crate::core::selection::FilterValue;

    fn ids(points: &[&PlotPoint]) -> Vec<i64> {
        points.iter().map(|p| p.sample_id()).collect()
    }

    #[test]
    fn full_selection_keeps_every_point_in_order() {
        let points = mixed_points();
        let selection = SelectionState::seeded(&FilterOptions::derive(&points));
        let shown = filter_points(&points, &[], &selection);
        assert_eq!(ids(&shown), vec![1, 2, 3]);
    }

    #[test]
    fn empty_selection_means_unconstrained() {
        let points = mixed_points();
        let shown = filter_points(&points, &[], &SelectionState::default());
        assert_eq!(ids(&shown), vec![1, 2, 3]);
    }

    #[test]
    fn dataset_subset_keeps_matching_points() {
        let points = vec![
            point(1, 1, "D1", "PBS", 1.0),
            point(2, 1, "D1", "PBS", 1.0),
            point(3, 2, "D1", "PBS", 1.0),
        ];
        let mut selection = SelectionState::seeded(&FilterOptions::derive(&points));
        selection.toggle(FilterValue::Dataset(2));

        let shown = filter_points(&points, &[], &selection);
        assert_eq!(ids(&shown), vec![1, 2]);
    }

    #[test]
    fn deselecting_last_value_reopens_the_dimension() {
        let points = mixed_points();
        let mut selection = SelectionState::seeded(&FilterOptions::derive(&points));
        selection.toggle(FilterValue::Buffer("PBS".into()));
        assert_eq!(ids(&filter_points(&points, &[], &selection)), vec![2]);

        selection.toggle(FilterValue::Buffer("Tris".into()));
        assert!(selection.buffers.is_empty());
        assert_eq!(ids(&filter_points(&points, &[], &selection)), vec![1, 2, 3]);
    }

    #[test]
    fn predicates_are_conjunctive() {
        let points = mixed_points();
        let mut selection = SelectionState::default();
        selection.toggle(FilterValue::Donor("D1".into()));
        selection.toggle(FilterValue::Incubation(IncubationHours::new(2.0)));

        let shown = filter_points(&points, &[], &selection);
        assert_eq!(ids(&shown), vec![3]);
    }

    #[test]
    fn active_target_requires_a_measurement() {
        let points = mixed_points();
        let signals = vec![signal(1, 7, 3.2), signal(3, 9, 1.0)];
        let mut selection = SelectionState::default();

        selection.set_active_target(Some(7));
        assert_eq!(ids(&filter_points(&points, &signals, &selection)), vec![1]);

        selection.set_active_target(Some(42));
        assert!(filter_points(&points, &signals, &selection).is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let points = mixed_points();
        let signals = vec![signal(2, 7, 0.5), signal(3, 7, 1.5)];
        let mut selection = SelectionState::seeded(&FilterOptions::derive(&points));
        selection.set_active_target(Some(7));

        let first = filter_points(&points, &signals, &selection);
        let second = filter_points(&points, &signals, &selection);
        assert_eq!(first, second);
    }

    #[test]
    fn first_duplicate_measurement_wins() {
        let index = SignalIndex::build(&[signal(5, 7, 3.2), signal(5, 7, 9.9)]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.lookup(5, 7), Some(3.2));
        assert_eq!(index.lookup(5, 9), None);
    }

    #[test]
    fn no_measurements_build_an_empty_index() {
        let index = SignalIndex::build(&[]);
        assert!(index.is_empty());
        assert!(!index.contains(1, 7));
    }
}
