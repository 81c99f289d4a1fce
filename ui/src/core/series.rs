//! Plot-ready projection of the filtered points.
//!
//! A point without a measurement for the active target is coloured with
//! [`MISSING_SIGNAL`] (zero). That is indistinguishable from a measured zero;
//! the ambiguity is known and kept.

use api::{PlotPoint, SampleId, SignalMeasurement, TargetId};

use super::colorscale::ColorScale;
use super::filter::SignalIndex;

/// Colour value used when `(sample, active target)` has no measurement.
pub const MISSING_SIGNAL: f64 = 0.0;

/// Three parallel sequences (plus sample ids for tooltips and exports).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScatterSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub color: Vec<f64>,
    pub samples: Vec<SampleId>,
}

impl ScatterSeries {
    pub fn build(
        points: &[&PlotPoint],
        index: &SignalIndex,
        active_target: Option<TargetId>,
    ) -> Self {
        let mut series = Self {
            x: Vec::with_capacity(points.len()),
            y: Vec::with_capacity(points.len()),
            color: Vec::with_capacity(points.len()),
            samples: Vec::with_capacity(points.len()),
        };

        for point in points {
            let color = active_target
                .and_then(|target| index.lookup(point.sample_id(), target))
                .unwrap_or(MISSING_SIGNAL);

            series.x.push(point.x_coor);
            series.y.push(point.y_coor);
            series.color.push(color);
            series.samples.push(point.sample_id());
        }

        series
    }

    pub fn from_signals(
        points: &[&PlotPoint],
        signals: &[SignalMeasurement],
        active_target: Option<TargetId>,
    ) -> Self {
        Self::build(points, &SignalIndex::build(signals), active_target)
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x_extent(&self) -> Option<Extent> {
        Extent::of(&self.x)
    }

    pub fn y_extent(&self) -> Option<Extent> {
        Extent::of(&self.y)
    }

    pub fn color_extent(&self) -> Option<Extent> {
        Extent::of(&self.color)
    }
}

/// Closed range over the finite values of a sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    pub fn of(values: &[f64]) -> Option<Self> {
        values
            .iter()
            .copied()
            .filter(|value| value.is_finite())
            .fold(None, |acc: Option<Extent>, value| {
                Some(match acc {
                    None => Extent {
                        min: value,
                        max: value,
                    },
                    Some(extent) => Extent {
                        min: extent.min.min(value),
                        max: extent.max.max(value),
                    },
                })
            })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Widens by `fraction` of the span on each side. A zero-width extent
    /// is widened by one unit so it still has somewhere to draw.
    pub fn padded(&self, fraction: f64) -> Self {
        let span = self.span();
        if span <= 0.0 {
            return Self {
                min: self.min - 1.0,
                max: self.max + 1.0,
            };
        }
        Self {
            min: self.min - span * fraction,
            max: self.max + span * fraction,
        }
    }

    /// Position of `value` within the extent, in `[0, 1]`.
    /// Zero-width extents place everything at the midpoint.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.span();
        if span <= 0.0 {
            return 0.5;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }

    /// Axis ticks on a 1/2/5 × 10^k grid inside the extent.
    pub fn ticks(&self, target_count: usize) -> Vec<f64> {
        let span = self.span();
        if span <= 0.0 || !span.is_finite() || target_count == 0 {
            return vec![self.min];
        }

        let step = nice_step(span / target_count as f64);
        if !step.is_finite() || step <= 0.0 {
            return vec![self.min];
        }

        let first = (self.min / step).ceil();
        let last = (self.max / step).floor();
        if !first.is_finite() || !last.is_finite() || last < first {
            return vec![self.min];
        }

        let count = ((last - first) as usize).min(MAX_TICKS);
        (0..=count).map(|i| (first + i as f64) * step).collect()
    }
}

const MAX_TICKS: usize = 64;

fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let step = if normalized < 1.5 {
        1.0
    } else if normalized < 3.5 {
        2.0
    } else if normalized < 7.5 {
        5.0
    } else {
        10.0
    };
    step * magnitude
}

/// Static presentation settings for the single scatter trace.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotLabels {
    pub title: &'static str,
    pub x_axis: &'static str,
    pub y_axis: &'static str,
    pub colorbar: &'static str,
    pub marker_size: f64,
    pub color_scale: ColorScale,
}

impl Default for PlotLabels {
    fn default() -> Self {
        Self {
            title: "IFN gamma",
            x_axis: "X Coordinate",
            y_axis: "Y Coordinate",
            colorbar: "nELISA signal",
            marker_size: 10.0,
            color_scale: ColorScale::Viridis,
        }
    }
}
