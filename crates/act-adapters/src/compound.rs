//! Activities compuestas: componen los engines del core como sub-pipelines.
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use act_core::{Activity, ActivityBehavior, ActivityContext, ActivityData, ActivityEngine, ActivityInfo, ActivityRole,
               ParallelEngine, SequentialEngine, WaitMode};
use act_core::CoreError;

/// Encadena activities hijas en secuencia: el input alimenta a la primera y
/// la salida de cada una alimenta a la siguiente. Acepta ambas formas.
#[derive(Debug)]
pub struct Compound {
    children: Vec<Arc<dyn Activity>>,
    label: Option<String>,
}

impl Compound {
    pub fn new(children: Vec<Arc<dyn Activity>>) -> Self {
        Self { children, label: None }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    async fn run_chain(&self, ctx: Arc<ActivityContext>, input: ActivityData) -> Result<ActivityData, CoreError> {
        let mut batch = Vec::with_capacity(self.children.len());
        for (position, child) in self.children.iter().enumerate() {
            let data = if position == 0 { Some(input.clone()) } else { None };
            batch.push(ActivityInfo::new(Arc::clone(child), data, Arc::clone(&ctx)));
        }
        match SequentialEngine::new().execute(batch).await? {
            Some(output) => Ok(output),
            // Sin hijas no hay transformación: el input pasa sin cambios.
            None => Ok(input),
        }
    }
}

#[async_trait]
impl ActivityBehavior for Compound {
    fn role(&self) -> ActivityRole {
        ActivityRole::Transformation
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    async fn on_scalar(&self, ctx: Arc<ActivityContext>, value: Value) -> Result<ActivityData, CoreError> {
        self.run_chain(ctx, ActivityData::Scalar(value)).await
    }

    async fn on_vector(&self, ctx: Arc<ActivityContext>, values: Vec<Value>) -> Result<ActivityData, CoreError> {
        self.run_chain(ctx, ActivityData::Vector(values)).await
    }
}

/// Fan-out del input a N activities hijas sobre un `ParallelEngine` y
/// agregación del Vector resultante. La entrada 0 conserva el input original
/// y las demás reciben réplicas (copia profunda); el aggregator y el modo de
/// espera se fijan al construir.
#[derive(Debug)]
pub struct FanOut {
    children: Vec<Arc<dyn Activity>>,
    aggregator: Option<Arc<dyn Activity>>,
    wait_mode: WaitMode,
    pool_size: Option<usize>,
    label: Option<String>,
}

impl FanOut {
    pub fn new(children: Vec<Arc<dyn Activity>>) -> Self {
        Self { children,
               aggregator: None,
               wait_mode: WaitMode::WaitForAll,
               pool_size: None,
               label: None }
    }

    pub fn with_aggregator(mut self, aggregator: Arc<dyn Activity>) -> Self {
        self.aggregator = Some(aggregator);
        self
    }

    pub fn with_wait_mode(mut self, wait_mode: WaitMode) -> Self {
        self.wait_mode = wait_mode;
        self
    }

    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = Some(pool_size);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    async fn run_fan_out(&self, ctx: Arc<ActivityContext>, input: ActivityData) -> Result<ActivityData, CoreError> {
        let mut builder = ParallelEngine::builder().wait_mode(self.wait_mode);
        if let Some(pool_size) = self.pool_size {
            builder = builder.pool_size(pool_size);
        }
        if let Some(aggregator) = &self.aggregator {
            builder = builder.aggregator(Arc::clone(aggregator));
        }
        let engine = builder.build();

        let mut batch = Vec::with_capacity(self.children.len());
        for (position, child) in self.children.iter().enumerate() {
            // Sólo la entrada 0 lleva el input; el engine replica para el resto.
            let data = if position == 0 { Some(input.clone()) } else { None };
            batch.push(ActivityInfo::new(Arc::clone(child), data, Arc::clone(&ctx)));
        }
        match engine.execute(batch).await? {
            Some(output) => Ok(output),
            None => Err(CoreError::Internal("parallel engine returned no data for a non-empty batch".into())),
        }
    }
}

#[async_trait]
impl ActivityBehavior for FanOut {
    fn role(&self) -> ActivityRole {
        ActivityRole::Transformation
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    async fn on_scalar(&self, ctx: Arc<ActivityContext>, value: Value) -> Result<ActivityData, CoreError> {
        self.run_fan_out(ctx, ActivityData::Scalar(value)).await
    }

    async fn on_vector(&self, ctx: Arc<ActivityContext>, values: Vec<Value>) -> Result<ActivityData, CoreError> {
        self.run_fan_out(ctx, ActivityData::Vector(values)).await
    }
}
