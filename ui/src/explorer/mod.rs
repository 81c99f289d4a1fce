//! Components for the UMAP explorer page.

pub mod export;
pub mod filters;
pub mod scatter;
pub mod target_picker;

pub use export::{ExportPanel, ExportRow};
pub use filters::FilterPanel;
pub use scatter::{render_svg, ScatterPlot};
pub use target_picker::TargetPicker;

use api::PlotPoint;

use crate::core::format::{format_coordinate, format_signal};
use crate::core::series::ScatterSeries;
use crate::t;

/// Hover text for each displayed point, parallel to `series`.
pub fn point_tooltips(points: &[&PlotPoint], series: &ScatterSeries) -> Vec<String> {
    points
        .iter()
        .zip(series.color.iter())
        .map(|(point, signal)| {
            let meta = &point.sample.metadata;
            t!(
                "plot-tooltip",
                sample = point.sample_id().to_string(),
                donor = meta.donor.clone(),
                buffer = meta.buffer.clone(),
                hours = meta.incubation_time.to_string(),
                signal = format_signal(*signal),
                x = format_coordinate(point.x_coor),
                y = format_coordinate(point.y_coor)
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::{mixed_points, signal};

    #[test]
    fn tooltips_name_sample_metadata_and_signal() {
        crate::i18n::init();
        let _ = crate::i18n::set_language("en-US");
        let points = mixed_points();
        let refs: Vec<&PlotPoint> = points.iter().collect();
        let series = ScatterSeries::from_signals(&refs, &[signal(2, 7, 3.5)], Some(7));

        let tips = point_tooltips(&refs, &series);
        assert_eq!(tips.len(), 3);
        assert!(tips[1].contains("Sample 2"));
        assert!(tips[1].contains("Tris"));
        assert!(tips[1].contains("3.5"));
        assert!(tips[0].contains("4 hr"));
    }
}
