//! Builder para `ParallelEngine`.
//!
//! Acumula la configuración del pool, el modo de espera, el aggregator
//! opcional y los observers, y construye el engine consumiendo el builder.
use std::sync::Arc;

use crate::activity::Activity;
use crate::engine::ParallelEngine;
use crate::executor::{ExecutorConfig, TaskExecutor, TaskObserver, WaitMode};
use crate::model::ActivityData;

pub struct ParallelEngineBuilder {
    config: ExecutorConfig,
    wait_mode: WaitMode,
    aggregator: Option<Arc<dyn Activity>>,
    observers: Vec<Arc<dyn TaskObserver<ActivityData>>>,
}

impl ParallelEngineBuilder {
    pub fn new() -> Self {
        Self { config: ExecutorConfig::default(),
               wait_mode: WaitMode::WaitForAll,
               aggregator: None,
               observers: Vec::new() }
    }

    /// Cantidad máxima de tasks corriendo a la vez (default: una por CPU).
    pub fn pool_size(mut self, pool_size: usize) -> Self {
        self.config = ExecutorConfig::with_pool_size(pool_size);
        self
    }

    pub fn wait_mode(mut self, wait_mode: WaitMode) -> Self {
        self.wait_mode = wait_mode;
        self
    }

    /// Activity que reduce el Vector de resultados. Sin aggregator, el engine
    /// devuelve el Vector rearmado tal cual.
    pub fn aggregator(mut self, aggregator: Arc<dyn Activity>) -> Self {
        self.aggregator = Some(aggregator);
        self
    }

    pub fn observer(mut self, observer: Arc<dyn TaskObserver<ActivityData>>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn build(self) -> ParallelEngine {
        let mut executor = TaskExecutor::new(self.config);
        for observer in self.observers {
            executor.add_observer(observer);
        }
        ParallelEngine { executor,
                         wait_mode: self.wait_mode,
                         aggregator: self.aggregator }
    }
}

impl Default for ParallelEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
