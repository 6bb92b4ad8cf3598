//! # Engagement Core Library
//!
//! Generates a reproducible 7×24 table of synthetic customer engagement
//! scores (day of week × hour of day) and renders it as a fixed-size PNG
//! heatmap. The `engagement-cli` binary is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Score model**: base level per day plus a time-of-day factor per hour
//! - **Noise**: one seeded draw per cell, passed in explicitly
//! - **Table**: immutable 7×24 grid with labels, aggregates and long-form records
//! - **Export**: plotters bitmap backend with an exact canvas size
//! - **Config**: TOML file whose defaults give the stock 512×512 chart
//!
//! ## Key Components
//!
//! - [`TableGenerator`]: fills an [`EngagementTable`] from a [`ScoreModel`]
//! - [`PngExporter`]: writes the heatmap image
//! - [`ChartConfig`]: application configuration
//! - [`pipeline::run`]: generate then export in one call

pub mod config;
pub mod error;
pub mod generator;
pub mod model;
pub mod noise;
pub mod palette;
pub mod pipeline;
pub mod render;
pub mod table;

pub use config::{ChartConfig, ChartStyle};
pub use error::{ConfigError, CoreError, RenderError, ValidationError};
pub use generator::{generate, TableGenerator};
pub use model::{HourWindow, NoiseRange, ScoreModel, TimeBucket};
pub use noise::{NoiseSource, ScriptedNoise, SeededNoise, DEFAULT_SEED};
pub use palette::Palette;
pub use pipeline::RunReport;
pub use render::{ExportSummary, Exporter, Layout, PngExporter};
pub use table::{EngagementTable, ScoreRecord, DAYS};
