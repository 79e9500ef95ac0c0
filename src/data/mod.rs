/// Data layer: typed records, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  data/sample/*.csv + sample_graphrag_paths.json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate → DatasetBundle (all or nothing)
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ DatasetBundle  │  Vec<ControlRecord>, Vec<MappingRecord>, Vec<PathRecord>, …
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐      ┌────────────┐
///   │  filter   │  →   │ aggregate   │  counts, histogram, path statistics
///   └──────────┘      └────────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;

pub use error::{LoadError, ViewError};
pub use loader::load;
pub use model::DatasetBundle;
