//! Nested zoom hierarchies: per-level grids and their construction.

pub mod config;
pub mod grid_hierarchy;
pub mod level;

pub use config::{DEFAULT_PAD, HierarchyConfig, MAX_LEVEL};
pub use grid_hierarchy::GridHierarchy;
pub use level::LevelGrid;
