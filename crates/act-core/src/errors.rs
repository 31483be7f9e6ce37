//! Errores del core: una sola taxonomía serializable para todas las capas.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::DataShape;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum CoreError {
    /// La activity no implementa la operación para la forma recibida.
    #[error("activity {activity} does not implement the {shape} operation")]
    Unsupported { activity: String, shape: DataShape },

    /// Un Aggregator recibió Scalar o un Splitter recibió Vector.
    #[error("activity {activity} expects {expected} input, got {actual}")]
    CardinalityMismatch {
        activity: String,
        expected: DataShape,
        actual: DataShape,
    },

    /// El valor no tiene el tipo/forma que la activity requiere.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// El cuerpo de una task falló o fue interrumpido. La causa original se
    /// conserva como texto para que el error siga siendo serializable.
    #[error("task failed: {0}")]
    TaskFailed(String),

    /// Venció el plazo impuesto por el caller antes de drenar todas las
    /// señales de completitud. `pending_slots` lista los índices sin llegar.
    #[error("timed out waiting for slots {pending_slots:?}")]
    TimedOut { pending_slots: Vec<usize> },

    /// Un servicio/activity con nombre no pudo ser localizado.
    #[error("not found: {0}")]
    NotFound(String),

    /// Índice fuera de rango en un Vector (incluye índices negativos).
    #[error("index {index} out of bounds for vector of length {len}")]
    IndexOutOfBounds { index: isize, len: usize },

    /// Configuración inválida del engine o del batch.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// El executor fue liberado; no admite más submissions.
    #[error("executor already disposed")]
    ExecutorDisposed,

    #[error("internal: {0}")]
    Internal(String),
}
