//! Estrategias de ejecución de batches de activities.
//!
//! Dos implementaciones detrás de un mismo contrato: `SequentialEngine`
//! (encadenamiento in-line) y `ParallelEngine` (fan-out sobre un
//! `TaskExecutor` + agregación).

pub mod builder;
pub mod parallel;
pub mod sequential;

use async_trait::async_trait;

use crate::errors::CoreError;
use crate::model::{ActivityData, ActivityInfo};

pub use builder::ParallelEngineBuilder;
pub use parallel::ParallelEngine;
pub use sequential::SequentialEngine;

/// Contrato común de los engines.
///
/// `Ok(None)` significa "sin datos" (batch secuencial vacío); cualquier error
/// aborta el resultado agregado del batch (no hay éxito parcial).
#[async_trait]
pub trait ActivityEngine: Send + Sync {
    async fn execute(&self, batch: Vec<ActivityInfo>) -> Result<Option<ActivityData>, CoreError>;
}
