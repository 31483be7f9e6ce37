//! Bifurcación por predicado.
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use act_core::{data_truthiness, Activity, ActivityBehavior, ActivityContext, ActivityData, ActivityRole, CoreError};

/// Corre la activity de prueba sobre el input escalar, coerciona su
/// resultado a booleano con la regla genérica de truthiness y ejecuta la
/// activity de éxito (true) o la de fallo (false). Sin activity de fallo
/// configurada, el input original pasa sin cambios.
#[derive(Debug)]
pub struct Conditional {
    test: Arc<dyn Activity>,
    on_true: Arc<dyn Activity>,
    on_false: Option<Arc<dyn Activity>>,
    label: Option<String>,
}

impl Conditional {
    pub fn new(test: Arc<dyn Activity>, on_true: Arc<dyn Activity>) -> Self {
        Self { test,
               on_true,
               on_false: None,
               label: None }
    }

    pub fn with_failure(mut self, on_false: Arc<dyn Activity>) -> Self {
        self.on_false = Some(on_false);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[async_trait]
impl ActivityBehavior for Conditional {
    fn role(&self) -> ActivityRole {
        ActivityRole::Transformation
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    async fn on_scalar(&self, ctx: Arc<ActivityContext>, value: Value) -> Result<ActivityData, CoreError> {
        let verdict = self.test
                          .perform(Arc::clone(&ctx), ActivityData::Scalar(value.clone()))
                          .await?;
        if data_truthiness(&verdict) {
            self.on_true.perform(ctx, ActivityData::Scalar(value)).await
        } else {
            match &self.on_false {
                Some(on_false) => on_false.perform(ctx, ActivityData::Scalar(value)).await,
                None => Ok(ActivityData::Scalar(value)),
            }
        }
    }
}
