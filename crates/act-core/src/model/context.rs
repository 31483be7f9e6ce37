//! Contexto mutable de una corrida.
//!
//! `ActivityContext` es un mapa string→JSON usado como canal lateral de
//! estado (configuración, resultados parciales). Lo respalda un mapa
//! concurrente porque el engine paralelo comparte un mismo contexto entre
//! tasks; no hay contrato de orden ni de iteración. El ciclo de vida es del
//! caller: se crea antes de una corrida y se descarta al terminar.
use dashmap::DashMap;
use serde_json::Value;

#[derive(Debug, Default)]
pub struct ActivityContext {
    entries: DashMap<String, Value>,
}

impl ActivityContext {
    pub fn new() -> Self {
        Self { entries: DashMap::new() }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Inserta un valor y devuelve el anterior si existía.
    pub fn set(&self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    /// Elimina una clave y devuelve el valor anterior si existía.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.entries.remove(key).map(|(_, value)| value)
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
