//! Splitter y aggregator de texto de ejemplo.
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use act_core::{ActivityBehavior, ActivityContext, ActivityData, ActivityRole, CoreError};

/// Scalar string → Vector de tokens separados por un delimitador.
#[derive(Debug)]
pub struct SplitText {
    separator: String,
    label: Option<String>,
}

impl SplitText {
    pub fn new(separator: impl Into<String>) -> Self {
        Self { separator: separator.into(),
               label: None }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[async_trait]
impl ActivityBehavior for SplitText {
    fn role(&self) -> ActivityRole {
        ActivityRole::Splitter
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    async fn on_scalar(&self, _ctx: Arc<ActivityContext>, value: Value) -> Result<ActivityData, CoreError> {
        let text = value.as_str()
                        .ok_or_else(|| CoreError::InvalidArgument(format!("split expects a string, got {value}")))?;
        let tokens = text.split(self.separator.as_str()).map(|token| Value::from(token.trim())).collect();
        Ok(ActivityData::Vector(tokens))
    }
}

/// Vector de strings → Scalar con los elementos unidos por un separador.
#[derive(Debug)]
pub struct JoinText {
    separator: String,
    label: Option<String>,
}

impl JoinText {
    pub fn new(separator: impl Into<String>) -> Self {
        Self { separator: separator.into(),
               label: None }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[async_trait]
impl ActivityBehavior for JoinText {
    fn role(&self) -> ActivityRole {
        ActivityRole::Aggregator
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    async fn on_vector(&self, _ctx: Arc<ActivityContext>, values: Vec<Value>) -> Result<ActivityData, CoreError> {
        let mut parts = Vec::with_capacity(values.len());
        for value in &values {
            let text = value.as_str()
                            .ok_or_else(|| CoreError::InvalidArgument(format!("join expects strings, got {value}")))?;
            parts.push(text);
        }
        Ok(ActivityData::scalar(parts.join(self.separator.as_str())))
    }
}
