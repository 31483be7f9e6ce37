//! Unidad de trabajo concurrente, independiente de la abstracción Activity.
use async_trait::async_trait;

use crate::errors::CoreError;

/// Task con resultado tipado.
///
/// Una task no tiene identidad propia: el slot index (base cero, por orden de
/// submission dentro de un batch) lo asigna el executor y es la clave de
/// correlación entre la señal de completitud y su resultado.
#[async_trait]
pub trait Task: Send + Sync {
    type Output: Send + 'static;

    /// Cuerpo de la task. Un error aquí se propaga al coordinador recién
    /// cuando el resultado del slot se resuelve (resolución perezosa).
    async fn run(&self) -> Result<Self::Output, CoreError>;

    /// Descripción para diagnósticos y trazas.
    fn describe(&self) -> String {
        "task".to_string()
    }
}

/// Cómo recolecta resultados un engine o executor sobre un batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitMode {
    /// Esperar todas las tasks y devolver la colección ordenada por slot.
    WaitForAll,
    /// Devolver apenas complete la primera; las demás siguen corriendo
    /// (fire-and-forget, sin cancelación).
    WaitForAny,
}
