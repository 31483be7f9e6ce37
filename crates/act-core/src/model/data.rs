//! Payload neutral del flujo.
//!
//! `ActivityData` es la unidad de datos que circula entre activities. Es
//! neutral: los valores son JSON genérico (`serde_json::Value`) y el core no
//! interpreta su semántica. Dos formas:
//! - `Scalar`: envuelve exactamente un valor.
//! - `Vector`: secuencia ordenada de valores, direccionable por índice
//!   positivo o negativo contado desde el final (`-1` = último elemento).
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::CoreError;

/// Forma de un payload, usada en mensajes de error y contratos de rol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataShape {
    Scalar,
    Vector,
}

impl std::fmt::Display for DataShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataShape::Scalar => write!(f, "scalar"),
            DataShape::Vector => write!(f, "vector"),
        }
    }
}

/// Payload consumido/producido por una activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActivityData {
    Scalar(Value),
    Vector(Vec<Value>),
}

impl ActivityData {
    /// Construye un Scalar desde cualquier valor convertible a JSON.
    pub fn scalar(value: impl Into<Value>) -> Self {
        ActivityData::Scalar(value.into())
    }

    /// Construye un Vector preservando el orden de inserción.
    pub fn vector(values: Vec<Value>) -> Self {
        ActivityData::Vector(values)
    }

    pub fn shape(&self) -> DataShape {
        match self {
            ActivityData::Scalar(_) => DataShape::Scalar,
            ActivityData::Vector(_) => DataShape::Vector,
        }
    }

    /// Resuelve un elemento de un Vector por índice positivo o negativo
    /// (`-1` = último). Índices fuera de rango son error de programación.
    pub fn element(&self, index: isize) -> Result<&Value, CoreError> {
        let values = match self {
            ActivityData::Vector(values) => values,
            ActivityData::Scalar(_) => {
                return Err(CoreError::InvalidArgument("element() requires vector data".into()))
            }
        };
        let len = values.len();
        let resolved = if index < 0 {
            let back = index.unsigned_abs();
            if back > len {
                return Err(CoreError::IndexOutOfBounds { index, len });
            }
            len - back
        } else {
            index as usize
        };
        values.get(resolved).ok_or(CoreError::IndexOutOfBounds { index, len })
    }

    /// Copia independiente del payload. Los valores JSON siempre soportan
    /// copia profunda, así que la réplica nunca comparte estado mutable.
    pub fn deep_copy(&self) -> Self {
        self.clone()
    }

    /// Cantidad de valores envueltos (1 para Scalar).
    pub fn len(&self) -> usize {
        match self {
            ActivityData::Scalar(_) => 1,
            ActivityData::Vector(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ActivityData::Vector(values) if values.is_empty())
    }
}

/// Regla genérica de coerción objeto→booleano:
/// - booleanos pasan tal cual;
/// - strings son true sii equivalen (case-insensitive) a "true";
/// - números enteros son true sii son positivos;
/// - null es false; cualquier otro valor no nulo es true.
pub fn truthiness(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i > 0
            } else if let Some(u) = n.as_u64() {
                u > 0
            } else {
                // no entero: objeto no nulo
                true
            }
        }
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => true,
    }
}

/// Coerción de un payload completo: Scalar aplica `truthiness` al valor
/// envuelto; Vector cuenta como objeto no nulo (true).
pub fn data_truthiness(data: &ActivityData) -> bool {
    match data {
        ActivityData::Scalar(value) => truthiness(value),
        ActivityData::Vector(_) => true,
    }
}
