//! Data retrieval for the UMAP explorer.
//!
//! The backend exposes three read-only collections (plot points, sample
//! signals, targets). This crate owns their wire shape and the sequential
//! load step that turns them into one immutable [`Snapshot`].

pub mod client;
pub mod config;
pub mod error;
pub mod model;

pub use client::ApiClient;
pub use config::{ApiConfig, Resource};
pub use error::LoadError;
pub use reqwest::StatusCode;

pub use model::{
    DatasetId, DatasetRef, IncubationHours, PlotPoint, Sample, SampleId, SampleMetadata,
    SampleRef, SignalMeasurement, Snapshot, Target, TargetId,
};
