//! # eventgrid Core Library
//!
//! Lays out calendar events that overlap in time into side-by-side columns.
//! The CLI binary is a thin shell over the same library.
//!
//! ## Architecture
//!
//! - **Layout**: overlap cluster detection plus greedy column assignment and
//!   expansion, each backed by its own augmented binary search tree
//! - **Bucketing**: conversion of timestamped events into per-day numeric
//!   intervals (seconds of day) or month-grid day offsets
//! - **Overflow**: optional cap on columns per cluster
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`LayoutEngine`]: full per-day pipeline
//! - [`OverlapClusterDetector`], [`ColumnAssigner`], [`ColumnExpander`]: the
//!   individual stages
//! - [`DayBucketer`]: per-day interval conversion
//! - [`Config`]: application configuration management

pub mod bucket;
pub mod error;
pub mod interval;
pub mod layout;
pub mod overflow;
pub mod storage;

pub use bucket::{day_offset_intervals, CalendarEvent, DayBucketer};
pub use error::{ConfigError, CoreError, LayoutError};
pub use interval::{Interval, IntervalModel};
pub use layout::{
    detect_clusters, layout_cluster, layout_day, Cluster, ClusterLayout, ColumnAssigner,
    ColumnAssignment, ColumnExpander, DayLayout, LayoutEngine, OverlapClusterDetector, Placement,
};
pub use overflow::OverflowPolicy;
pub use storage::Config;
