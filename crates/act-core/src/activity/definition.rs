//! Contrato neutral de una activity.
use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::CoreError;
use crate::model::{ActivityContext, ActivityData};

/// Rol de procesamiento de una activity.
///
/// - `Transformation`: misma cardinalidad entrada/salida.
/// - `Aggregator`: Vector → Scalar.
/// - `Splitter`: Scalar → Vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityRole {
    Transformation,
    Aggregator,
    Splitter,
}

/// Unidad polimórfica de trabajo sobre payloads Scalar/Vector.
///
/// La identidad se compone una sola vez a partir de un fragmento opcional
/// provisto por el usuario más el nombre del tipo concreto (formato
/// `"<id-or-dash>@<TypeName>"`), y es inmutable una vez construida.
#[async_trait]
pub trait Activity: Send + Sync + std::fmt::Debug {
    /// Identificador estable con formato `"<id-or-dash>@<TypeName>"`.
    fn id(&self) -> String;

    /// Ejecuta la activity sobre el payload dentro del contexto dado. El
    /// contexto viaja como `Arc` para que activities compuestas puedan
    /// compartirlo con sus hijos sin copiarlo.
    async fn perform(&self, ctx: Arc<ActivityContext>, data: ActivityData) -> Result<ActivityData, CoreError>;
}

/// Compone el identificador `"<id-or-dash>@<TypeName>"`.
pub fn compose_id(label: Option<&str>, type_name: &str) -> String {
    let short = type_name.rsplit("::").next().unwrap_or(type_name);
    format!("{}@{}", label.unwrap_or("-"), short)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_id_uses_dash_for_missing_label() {
        assert_eq!(compose_id(None, "act_adapters::logic::And"), "-@And");
        assert_eq!(compose_id(Some("gate"), "And"), "gate@And");
    }
}
