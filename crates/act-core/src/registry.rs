//! Engine por defecto a nivel de proceso, sin estado global oculto.
//!
//! El registry es un objeto de configuración explícito: lo crea la raíz de
//! composición de la aplicación y se pasa por parámetro a quien lo necesite.
//! Conserva la semántica del setter original (el default es reemplazable en
//! caliente) pero sin singleton perezoso.
use std::sync::{Arc, RwLock};

use crate::engine::{ActivityEngine, SequentialEngine};

pub struct EngineRegistry {
    default_engine: RwLock<Arc<dyn ActivityEngine>>,
}

impl EngineRegistry {
    pub fn new(default_engine: Arc<dyn ActivityEngine>) -> Self {
        Self { default_engine: RwLock::new(default_engine) }
    }

    /// Engine por defecto vigente.
    pub fn default_engine(&self) -> Arc<dyn ActivityEngine> {
        Arc::clone(&self.default_engine.read().unwrap_or_else(|e| e.into_inner()))
    }

    /// Reemplaza el engine por defecto; los callers que ya tomaron un Arc
    /// siguen usando el anterior hasta volver a pedirlo.
    pub fn set_default(&self, engine: Arc<dyn ActivityEngine>) {
        *self.default_engine.write().unwrap_or_else(|e| e.into_inner()) = engine;
    }
}

impl Default for EngineRegistry {
    /// Estrategia usable sin wiring explícito: engine secuencial.
    fn default() -> Self {
        Self::new(Arc::new(SequentialEngine::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ParallelEngine;
    use crate::model::ActivityData;

    #[tokio::test]
    async fn default_engine_is_replaceable() {
        let registry = EngineRegistry::default();
        // El default secuencial acepta batch vacío sin error.
        let out = registry.default_engine().execute(vec![]).await.expect("sequential default");
        assert_eq!(out, None::<ActivityData>);

        registry.set_default(Arc::new(ParallelEngine::new()));
        // El paralelo rechaza batch vacío: el reemplazo quedó vigente.
        assert!(registry.default_engine().execute(vec![]).await.is_err());
    }
}
