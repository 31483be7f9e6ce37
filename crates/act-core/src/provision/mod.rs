//! Poblado determinista del contexto antes de una corrida.
//!
//! Lectores de configuración externos implementan `ContextProvider`;
//! `CompositeProvider` los aplica en orden de declaración (las escrituras
//! posteriores pisan a las anteriores).
use std::collections::HashMap;

use serde_json::Value;

use crate::model::ActivityContext;

/// Proveedor de valores de contexto.
pub trait ContextProvider: Send + Sync + std::fmt::Debug {
    fn provide(&self, ctx: &ActivityContext);
}

/// Aplica una serie de providers en orden fijo.
#[derive(Debug, Default)]
pub struct CompositeProvider {
    providers: Vec<Box<dyn ContextProvider>>,
}

impl CompositeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_providers(providers: Vec<Box<dyn ContextProvider>>) -> Self {
        Self { providers }
    }

    pub fn push(&mut self, provider: Box<dyn ContextProvider>) {
        self.providers.push(provider);
    }

    pub fn apply(&self, ctx: &ActivityContext) {
        for provider in &self.providers {
            provider.provide(ctx);
        }
    }
}

/// Provider estático: copia un mapa fijo de claves al contexto.
#[derive(Debug, Default)]
pub struct StaticProvider {
    entries: HashMap<String, Value>,
}

impl StaticProvider {
    pub fn new(entries: HashMap<String, Value>) -> Self {
        Self { entries }
    }

    pub fn entry(mut self, key: impl Into<String>, value: Value) -> Self {
        self.entries.insert(key.into(), value);
        self
    }
}

impl ContextProvider for StaticProvider {
    fn provide(&self, ctx: &ActivityContext) {
        for (key, value) in &self.entries {
            ctx.set(key.clone(), value.clone());
        }
    }
}
