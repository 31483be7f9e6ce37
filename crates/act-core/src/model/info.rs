//! Entrada de batch para un engine.
use std::sync::Arc;

use crate::activity::Activity;
use crate::model::{ActivityContext, ActivityData};

/// Tripla transitoria `(activity, data, context)` que un engine agenda.
///
/// Pertenece exclusivamente al engine durante un batch; no se comparte entre
/// batches. `data: None` indica que la entrada toma su input del
/// encadenamiento (engine secuencial) o de la réplica del input compartido
/// (engine paralelo).
pub struct ActivityInfo {
    pub activity: Arc<dyn Activity>,
    pub data: Option<ActivityData>,
    pub context: Arc<ActivityContext>,
}

impl ActivityInfo {
    pub fn new(activity: Arc<dyn Activity>, data: Option<ActivityData>, context: Arc<ActivityContext>) -> Self {
        Self { activity, data, context }
    }
}
