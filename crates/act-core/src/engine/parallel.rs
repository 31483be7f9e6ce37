//! Engine paralelo: cada entrada del batch corre como Task independiente
//! sobre un `TaskExecutor`.
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::activity::Activity;
use crate::engine::ActivityEngine;
use crate::errors::CoreError;
use crate::executor::{Task, TaskExecutor, WaitMode};
use crate::model::{ActivityContext, ActivityData, ActivityInfo};

/// Adaptador Activity → Task para el executor.
struct ActivityTask {
    activity: Arc<dyn Activity>,
    context: Arc<ActivityContext>,
    data: ActivityData,
}

#[async_trait]
impl Task for ActivityTask {
    type Output = ActivityData;

    async fn run(&self) -> Result<ActivityData, CoreError> {
        self.activity.perform(Arc::clone(&self.context), self.data.clone()).await
    }

    fn describe(&self) -> String {
        self.activity.id()
    }
}

/// Corre un batch fan-out y agrega resultados.
///
/// - Batch vacío: error de configuración.
/// - Batch de una sola entrada: corre in-line en la task llamadora (sin pasar
///   por el pool), con el mismo resultado observable y la misma semántica de
///   error que invocar la activity directamente.
/// - Batch de N entradas: submit al executor; según `WaitMode` espera todas
///   (resultados rearmados en Vector por orden de submission) o la primera.
pub struct ParallelEngine {
    pub(crate) executor: TaskExecutor<ActivityData>,
    pub(crate) wait_mode: WaitMode,
    pub(crate) aggregator: Option<Arc<dyn Activity>>,
}

impl ParallelEngine {
    pub fn builder() -> super::builder::ParallelEngineBuilder {
        super::builder::ParallelEngineBuilder::new()
    }

    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Replica de input compartido: la entrada 0 conserva el original y cada
    /// entrada sin data propia recibe una copia independiente (los payloads
    /// JSON siempre soportan copia profunda).
    fn prepare_inputs(batch: Vec<ActivityInfo>) -> Result<Vec<(Arc<dyn Activity>, Arc<ActivityContext>, ActivityData)>, CoreError> {
        let shared = batch.first().and_then(|info| info.data.clone());
        let mut prepared = Vec::with_capacity(batch.len());
        for (position, info) in batch.into_iter().enumerate() {
            let data = match info.data {
                Some(own) => own,
                None if position == 0 => {
                    return Err(CoreError::Configuration("parallel batch entry 0 must supply input data".into()))
                }
                None => match &shared {
                    Some(original) => {
                        debug!(entry = position, "replicating shared input for fan-out entry");
                        original.deep_copy()
                    }
                    None => {
                        return Err(CoreError::Configuration(format!("batch entry {position} has no input data")))
                    }
                },
            };
            prepared.push((info.activity, info.context, data));
        }
        Ok(prepared)
    }

    /// Rearma los resultados (en orden de submission) en un Vector. Un
    /// resultado con forma Vector queda como un único elemento array para
    /// conservar la correlación un-slot-un-elemento.
    fn assemble(results: Vec<ActivityData>) -> ActivityData {
        let values = results.into_iter()
                            .map(|result| match result {
                                ActivityData::Scalar(value) => value,
                                ActivityData::Vector(values) => Value::Array(values),
                            })
                            .collect();
        ActivityData::Vector(values)
    }

    async fn reduce(&self,
                    ctx: Arc<ActivityContext>,
                    results: Vec<ActivityData>)
                    -> Result<Option<ActivityData>, CoreError> {
        match &self.aggregator {
            Some(aggregator) => aggregator.perform(ctx, Self::assemble(results)).await.map(Some),
            None => Ok(Some(Self::assemble(results))),
        }
    }
}

impl Default for ParallelEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ActivityEngine for ParallelEngine {
    async fn execute(&self, batch: Vec<ActivityInfo>) -> Result<Option<ActivityData>, CoreError> {
        if batch.is_empty() {
            return Err(CoreError::Configuration("at least one activity required".into()));
        }

        let mut prepared = Self::prepare_inputs(batch)?;

        // Atajo de una sola entrada: sin overhead de pool, misma semántica
        // que la invocación directa (tampoco pasa por el aggregator).
        if prepared.len() == 1 {
            let (activity, context, data) = match prepared.pop() {
                Some(entry) => entry,
                None => return Err(CoreError::Internal("prepared batch lost its single entry".into())),
            };
            return activity.perform(context, data).await.map(Some);
        }

        let agg_context = Arc::clone(&prepared[0].1);
        let tasks: Vec<Arc<dyn Task<Output = ActivityData>>> =
            prepared.into_iter()
                    .map(|(activity, context, data)| {
                        Arc::new(ActivityTask { activity, context, data }) as Arc<dyn Task<Output = ActivityData>>
                    })
                    .collect();

        let pending = self.executor.execute(tasks).await?;
        match self.wait_mode {
            WaitMode::WaitForAll => {
                let results = self.executor.wait_for_all(pending).await?;
                self.reduce(agg_context, results).await
            }
            WaitMode::WaitForAny => {
                let first = self.executor.wait_for_any(pending).await?;
                match &self.aggregator {
                    Some(_) => self.reduce(agg_context, vec![first]).await,
                    None => Ok(Some(first)),
                }
            }
        }
    }
}
