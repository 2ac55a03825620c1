//! Data layer: core types and loading.
//!
//! Architecture:
//! ```text
//!  .json / .csv / .parquet
//!        │
//!        ▼
//!   ┌────────┐
//!   │ loader │  parse file → LossTable
//!   └────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ LossTable │  Vec<LossSeries>, drawn by ui::plot
//!   └───────────┘
//! ```

pub mod loader;
pub mod model;
