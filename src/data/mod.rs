/// Data layer: core types, loading, filtering and view projection.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐      ┌──────────┐
///   │  filter   │ ◄─── │  bounds   │  category → slider bounds
///   └──────────┘      └──────────┘
///        │ VisibleSubset (ordered dataset indices)
///        ▼
///   ┌───────────┐
///   │ selection  │  chart point indices → dataset indices
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   view    │  chart points, table rows, pagination
///   └──────────┘
/// ```

pub mod bounds;
pub mod filter;
pub mod loader;
pub mod model;
pub mod selection;
pub mod view;
