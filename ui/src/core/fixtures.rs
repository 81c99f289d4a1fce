//! Record builders shared by the core unit tests.

use api::{DatasetRef, PlotPoint, Sample, SampleMetadata, SampleRef, SignalMeasurement, Target};

pub(crate) fn point(
    sample_id: i64,
    dataset: i64,
    donor: &str,
    buffer: &str,
    hours: f64,
) -> PlotPoint {
    PlotPoint {
        id: Some(sample_id * 10),
        x_coor: sample_id as f64,
        y_coor: -(sample_id as f64),
        sample: Sample {
            id: sample_id,
            metadata: SampleMetadata {
                donor: donor.to_string(),
                buffer: buffer.to_string(),
                incubation_time: hours.into(),
            },
            dataset: DatasetRef {
                id: dataset,
                name: None,
            },
            plate_barcode: None,
            well_id: None,
        },
    }
}

pub(crate) fn signal(sample_id: i64, target_id: i64, value: f64) -> SignalMeasurement {
    SignalMeasurement {
        signal: value,
        sample: SampleRef { id: sample_id },
        target: Target {
            id: target_id,
            name: format!("target-{target_id}"),
        },
    }
}

/// Three points over two datasets, two donors, two buffers, two times.
pub(crate) fn mixed_points() -> Vec<PlotPoint> {
    vec![
        point(1, 1, "D1", "PBS", 4.0),
        point(2, 1, "D2", "Tris", 1.0),
        point(3, 2, "D1", "PBS", 2.0),
    ]
}
