//! Despacho por rol: una implementación opta por exactamente una forma de
//! procesamiento sin boilerplate de herencia.
//!
//! Implementadores escriben `on_scalar` y/o `on_vector` con su rol declarado;
//! un adaptador blanket (abajo) convierte cualquier `ActivityBehavior` en una
//! `Activity` neutra que inspecciona la variante en runtime y hace cumplir
//! los contratos de cardinalidad:
//! - `Transformation` despacha a la forma que coincide con el input. Si la
//!   forma no fue sobreescrita, el default devuelve `Unsupported` (no hay
//!   mapeo automático por elemento; cada implementación decide si itera).
//! - `Aggregator` rechaza Scalar con `CardinalityMismatch`.
//! - `Splitter` rechaza Vector con `CardinalityMismatch`.
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::definition::{compose_id, Activity, ActivityRole};
use crate::errors::CoreError;
use crate::model::{ActivityContext, ActivityData, DataShape};

#[async_trait]
pub trait ActivityBehavior: Send + Sync + std::fmt::Debug {
    /// Rol declarado; fija el contrato de cardinalidad.
    fn role(&self) -> ActivityRole;

    /// Fragmento de id provisto por el usuario (None → "-").
    fn label(&self) -> Option<&str> {
        None
    }

    /// Operación sobre forma Scalar. Default: no implementada.
    async fn on_scalar(&self, ctx: Arc<ActivityContext>, value: Value) -> Result<ActivityData, CoreError> {
        let _ = (ctx, value);
        Err(CoreError::Unsupported { activity: compose_id(self.label(), std::any::type_name::<Self>()),
                                     shape: DataShape::Scalar })
    }

    /// Operación sobre forma Vector. Default: no implementada.
    async fn on_vector(&self, ctx: Arc<ActivityContext>, values: Vec<Value>) -> Result<ActivityData, CoreError> {
        let _ = (ctx, values);
        Err(CoreError::Unsupported { activity: compose_id(self.label(), std::any::type_name::<Self>()),
                                     shape: DataShape::Vector })
    }
}

// -------------------------------------------------------------
// Adaptador: cualquier `ActivityBehavior` implementa `Activity` neutra.
// -------------------------------------------------------------
#[async_trait]
impl<T> Activity for T where T: ActivityBehavior + 'static
{
    fn id(&self) -> String {
        compose_id(self.label(), std::any::type_name::<T>())
    }

    async fn perform(&self, ctx: Arc<ActivityContext>, data: ActivityData) -> Result<ActivityData, CoreError> {
        match (self.role(), data) {
            (ActivityRole::Transformation, ActivityData::Scalar(value)) => self.on_scalar(ctx, value).await,
            (ActivityRole::Transformation, ActivityData::Vector(values)) => self.on_vector(ctx, values).await,
            (ActivityRole::Aggregator, ActivityData::Vector(values)) => self.on_vector(ctx, values).await,
            (ActivityRole::Aggregator, ActivityData::Scalar(_)) => {
                Err(CoreError::CardinalityMismatch { activity: self.id(),
                                                     expected: DataShape::Vector,
                                                     actual: DataShape::Scalar })
            }
            (ActivityRole::Splitter, ActivityData::Scalar(value)) => self.on_scalar(ctx, value).await,
            (ActivityRole::Splitter, ActivityData::Vector(_)) => {
                Err(CoreError::CardinalityMismatch { activity: self.id(),
                                                     expected: DataShape::Scalar,
                                                     actual: DataShape::Vector })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // Transformation que sólo sobreescribe la forma escalar.
    #[derive(Debug)]
    struct ScalarOnly;

    #[async_trait]
    impl ActivityBehavior for ScalarOnly {
        fn role(&self) -> ActivityRole {
            ActivityRole::Transformation
        }

        async fn on_scalar(&self, _ctx: Arc<ActivityContext>, value: Value) -> Result<ActivityData, CoreError> {
            Ok(ActivityData::Scalar(value))
        }
    }

    // Aggregator mínimo: cuenta elementos.
    #[derive(Debug)]
    struct CountItems;

    #[async_trait]
    impl ActivityBehavior for CountItems {
        fn role(&self) -> ActivityRole {
            ActivityRole::Aggregator
        }

        fn label(&self) -> Option<&str> {
            Some("count")
        }

        async fn on_vector(&self, _ctx: Arc<ActivityContext>, values: Vec<Value>) -> Result<ActivityData, CoreError> {
            Ok(ActivityData::scalar(values.len()))
        }
    }

    #[tokio::test]
    async fn transformation_dispatches_on_runtime_variant() {
        let ctx = Arc::new(ActivityContext::new());
        let out = ScalarOnly.perform(Arc::clone(&ctx), ActivityData::scalar(json!(5))).await.unwrap();
        assert_eq!(out, ActivityData::scalar(json!(5)));

        // La forma vector no fue sobreescrita: error "not implemented".
        let err = ScalarOnly.perform(ctx, ActivityData::vector(vec![json!(1)])).await.unwrap_err();
        assert!(matches!(err, CoreError::Unsupported { shape: DataShape::Vector, .. }));
    }

    #[tokio::test]
    async fn aggregator_rejects_scalar_input() {
        let ctx = Arc::new(ActivityContext::new());
        let err = CountItems.perform(ctx, ActivityData::scalar(json!(1))).await.unwrap_err();
        assert_eq!(err,
                   CoreError::CardinalityMismatch { activity: "count@CountItems".into(),
                                                    expected: DataShape::Vector,
                                                    actual: DataShape::Scalar });
    }

    #[tokio::test]
    async fn identity_composes_label_and_type_name() {
        assert_eq!(Activity::id(&CountItems), "count@CountItems");
        assert_eq!(Activity::id(&ScalarOnly), "-@ScalarOnly");
    }
}
