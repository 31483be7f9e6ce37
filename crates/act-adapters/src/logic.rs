//! Operadores booleanos sobre payloads.
//!
//! - `And` / `Or` son aggregators Vector → Scalar con corto circuito: dejan
//!   de recorrer en el primer `false` / `true` respectivamente. Vector vacío
//!   → `Scalar(false)` por política.
//! - Un elemento no booleano encontrado antes del punto de corte es error de
//!   argumento inválido (nunca un cast crash); los elementos posteriores al
//!   corte no se visitan.
//! - `Not` es una transformation sólo escalar: niega el booleano de entrada.
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use act_core::{ActivityBehavior, ActivityContext, ActivityData, ActivityRole, CoreError};

fn non_boolean(op: &str, value: &Value) -> CoreError {
    CoreError::InvalidArgument(format!("logical {op} expects boolean elements, got {value}"))
}

/// Conjunción con corto circuito.
#[derive(Debug, Default)]
pub struct And {
    label: Option<String>,
}

impl And {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[async_trait]
impl ActivityBehavior for And {
    fn role(&self) -> ActivityRole {
        ActivityRole::Aggregator
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    async fn on_vector(&self, _ctx: Arc<ActivityContext>, values: Vec<Value>) -> Result<ActivityData, CoreError> {
        if values.is_empty() {
            return Ok(ActivityData::scalar(false));
        }
        for value in &values {
            match value {
                Value::Bool(true) => continue,
                Value::Bool(false) => return Ok(ActivityData::scalar(false)),
                other => return Err(non_boolean("and", other)),
            }
        }
        Ok(ActivityData::scalar(true))
    }
}

/// Disyunción con corto circuito.
#[derive(Debug, Default)]
pub struct Or {
    label: Option<String>,
}

impl Or {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[async_trait]
impl ActivityBehavior for Or {
    fn role(&self) -> ActivityRole {
        ActivityRole::Aggregator
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    async fn on_vector(&self, _ctx: Arc<ActivityContext>, values: Vec<Value>) -> Result<ActivityData, CoreError> {
        for value in &values {
            match value {
                Value::Bool(false) => continue,
                Value::Bool(true) => return Ok(ActivityData::scalar(true)),
                other => return Err(non_boolean("or", other)),
            }
        }
        Ok(ActivityData::scalar(false))
    }
}

/// Negación escalar.
#[derive(Debug, Default)]
pub struct Not {
    label: Option<String>,
}

impl Not {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[async_trait]
impl ActivityBehavior for Not {
    fn role(&self) -> ActivityRole {
        ActivityRole::Transformation
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    async fn on_scalar(&self, _ctx: Arc<ActivityContext>, value: Value) -> Result<ActivityData, CoreError> {
        match value {
            Value::Bool(b) => Ok(ActivityData::scalar(!b)),
            other => Err(non_boolean("not", &other)),
        }
    }
}
