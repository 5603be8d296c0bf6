/// Data layer: typed records, loading, and the two chart computations.
///
/// Architecture:
/// ```text
///  spacex_launch_dash.csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchTable (+ payload bounds)
///   └──────────┘
///        │
///        ├──────────────┬────────────────┐
///        ▼              ▼                ▼
///   ┌──────────┐  ┌───────────┐   ┌──────────┐
///   │ catalog   │  │ aggregate  │   │  filter   │
///   └──────────┘  └───────────┘   └──────────┘
///   site options    pie slices      scatter rows
/// ```
///
/// Nothing in here knows about egui; every function takes the table by
/// reference and returns a fresh value.

pub mod aggregate;
pub mod catalog;
pub mod filter;
pub mod loader;
pub mod model;
