//! Load outcome and the page-level view state derived from it.

use api::{ApiClient, LoadError, PlotPoint, Snapshot, Target, TargetId};
use tracing::{debug, info, warn};

use super::filter::{filter_indexed, SignalIndex};
use super::options::FilterOptions;
use super::selection::SelectionState;
use super::series::ScatterSeries;

/// A loaded snapshot together with everything derived from it once per load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Explorer {
    snapshot: Snapshot,
    options: FilterOptions,
    index: SignalIndex,
}

impl Explorer {
    pub fn new(snapshot: Snapshot) -> Self {
        let options = FilterOptions::derive(&snapshot.points);
        let index = SignalIndex::build(&snapshot.signals);
        if snapshot.is_empty() {
            info!("snapshot has no plot points");
        }
        if index.is_empty() {
            debug!("no signal measurements; target colouring unavailable");
        } else {
            debug!(pairs = index.len(), "signal index built");
        }
        Self {
            snapshot,
            options,
            index,
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn targets(&self) -> &[Target] {
        &self.snapshot.targets
    }

    pub fn target_name(&self, id: TargetId) -> Option<&str> {
        self.snapshot.target(id).map(|target| target.name.as_str())
    }

    /// Fresh selection for this snapshot: everything selected, no target.
    pub fn seed_selection(&self) -> SelectionState {
        SelectionState::seeded(&self.options)
    }

    pub fn visible_points(&self, selection: &SelectionState) -> Vec<&PlotPoint> {
        filter_indexed(&self.snapshot.points, &self.index, selection)
    }

    pub fn series(&self, selection: &SelectionState) -> ScatterSeries {
        let visible = self.visible_points(selection);
        ScatterSeries::build(&visible, &self.index, selection.active_target())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(Explorer),
    Failed(String),
}

impl LoadOutcome {
    pub fn from_result(result: Result<Snapshot, LoadError>) -> Self {
        match result {
            Ok(snapshot) => LoadOutcome::Loaded(Explorer::new(snapshot)),
            Err(err) => LoadOutcome::Failed(err.to_string()),
        }
    }

    pub fn explorer(&self) -> Option<&Explorer> {
        match self {
            LoadOutcome::Loaded(explorer) => Some(explorer),
            LoadOutcome::Failed(_) => None,
        }
    }
}

/// Runs the sequential three-collection fetch as one unit.
pub async fn load_snapshot(client: &ApiClient) -> LoadOutcome {
    info!(base_url = %client.config().base_url, "loading snapshot");
    let result = client.fetch_snapshot().await;
    if let Err(err) = &result {
        warn!(error = %err, "snapshot load failed");
    }
    LoadOutcome::from_result(result)
}

/// What the page renders. A failure supersedes everything else, and an
/// empty filtered result is its own state rather than an empty plot.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Failed(String),
    Empty,
    Ready(ScatterSeries),
}

impl ViewState {
    pub fn resolve(outcome: Option<&LoadOutcome>, selection: &SelectionState) -> Self {
        match outcome {
            None => ViewState::Loading,
            Some(LoadOutcome::Failed(message)) => ViewState::Failed(message.clone()),
            Some(LoadOutcome::Loaded(explorer)) => {
                let series = explorer.series(selection);
                if series.is_empty() {
                    ViewState::Empty
                } else {
                    ViewState::Ready(series)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{Resource, StatusCode};

    use crate::core::fixtures::{mixed_points, signal};
    use crate::core::selection::FilterValue;

    fn explorer() -> Explorer {
        Explorer::new(Snapshot {
            points: mixed_points(),
            signals: vec![signal(1, 7, 3.2)],
            targets: vec![Target {
                id: 7,
                name: "IFNG".into(),
            }],
        })
    }

    #[test]
    fn pending_load_is_loading() {
        let state = ViewState::resolve(None, &SelectionState::default());
        assert_eq!(state, ViewState::Loading);
    }

    #[test]
    fn failure_carries_its_message() {
        let outcome = LoadOutcome::from_result(Err(LoadError::Status {
            resource: Resource::Signals,
            status: StatusCode::NOT_FOUND,
        }));
        match ViewState::resolve(Some(&outcome), &SelectionState::default()) {
            ViewState::Failed(message) => {
                assert!(message.starts_with("Sample Signal response was not ok"))
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn zero_points_resolve_to_empty() {
        let outcome = LoadOutcome::from_result(Ok(Snapshot::default()));
        let explorer = outcome.explorer().unwrap();
        assert!(explorer.snapshot().is_empty());
        assert!(explorer.options().is_empty());

        let selection = explorer.seed_selection();
        assert!(explorer.visible_points(&selection).is_empty());
        assert_eq!(ViewState::resolve(Some(&outcome), &selection), ViewState::Empty);
    }

    #[test]
    fn filtering_everything_out_is_empty_not_failed() {
        let outcome = LoadOutcome::Loaded(explorer());
        let mut selection = outcome.explorer().unwrap().seed_selection();
        selection.set_active_target(Some(99));
        assert_eq!(ViewState::resolve(Some(&outcome), &selection), ViewState::Empty);
    }

    #[test]
    fn ready_series_reflects_selection() {
        let explorer = explorer();
        let mut selection = explorer.seed_selection();
        selection.toggle(FilterValue::Dataset(2));
        selection.set_active_target(Some(7));

        let outcome = LoadOutcome::Loaded(explorer);
        match ViewState::resolve(Some(&outcome), &selection) {
            ViewState::Ready(series) => {
                assert_eq!(series.samples, vec![1]);
                assert_eq!(series.color, vec![3.2]);
            }
            other => panic!("expected ready, got {other:?}"),
        }
        assert_eq!(outcome.explorer().unwrap().target_name(7), Some("IFNG"));
    }
}
