//! Modelo de datos neutral del core.

pub mod context;
pub mod data;
pub mod info;

pub use context::ActivityContext;
pub use data::{data_truthiness, truthiness, ActivityData, DataShape};
pub use info::ActivityInfo;
