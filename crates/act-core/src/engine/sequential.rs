//! Engine secuencial: encadenamiento in-line sin concurrencia.
use async_trait::async_trait;
use tracing::warn;

use crate::engine::ActivityEngine;
use crate::errors::CoreError;
use crate::model::{ActivityData, ActivityInfo};

/// Itera el batch en orden: la salida del paso *i* es la entrada del paso
/// *i+1* salvo que la entrada traiga su propio input (el primer paso siempre
/// usa el input que trae). Aborta ante el primer error.
#[derive(Debug, Default)]
pub struct SequentialEngine;

impl SequentialEngine {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ActivityEngine for SequentialEngine {
    async fn execute(&self, batch: Vec<ActivityInfo>) -> Result<Option<ActivityData>, CoreError> {
        if batch.is_empty() {
            warn!("sequential batch is empty; nothing to execute");
            return Ok(None);
        }

        let mut carried: Option<ActivityData> = None;
        for (position, info) in batch.into_iter().enumerate() {
            let input = match info.data {
                Some(own) => own,
                None => carried.take().ok_or_else(|| {
                                        CoreError::Configuration(format!("batch entry {position} has no input data"))
                                    })?,
            };
            let output = info.activity.perform(info.context, input).await?;
            carried = Some(output);
        }
        Ok(carried)
    }
}
