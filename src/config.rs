//! Carga de configuración del proceso desde variables de entorno.
//! Usa convención `ACTFLOW_*` con defaults razonables.

use std::env;

use dotenvy::dotenv;
use once_cell::sync::Lazy;
use serde_json::Value;

use act_core::{ActivityContext, ContextProvider, WaitMode};

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub pool_size: usize,
    pub wait_mode: WaitMode,
}

impl AppConfig {
    pub fn from_env() -> Self {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        let pool_size = env::var("ACTFLOW_POOL_SIZE").ok()
                                                     .and_then(|v| v.parse().ok())
                                                     .unwrap_or_else(default_pool_size);
        let wait_mode = match env::var("ACTFLOW_WAIT_MODE").ok() {
            Some(v) if v.eq_ignore_ascii_case("any") => WaitMode::WaitForAny,
            _ => WaitMode::WaitForAll,
        };
        Self { pool_size, wait_mode }
    }
}

/// Un worker por CPU lógica disponible.
fn default_pool_size() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

/// Provider de contexto que copia variables de entorno seleccionadas.
#[derive(Debug)]
pub struct EnvProvider {
    /// Pares (clave de contexto, variable de entorno).
    mappings: Vec<(String, String)>,
}

impl EnvProvider {
    pub fn new(mappings: Vec<(&str, &str)>) -> Self {
        Lazy::force(&DOTENV_LOADED);
        Self { mappings: mappings.into_iter().map(|(k, v)| (k.to_string(), v.to_string())).collect() }
    }
}

impl ContextProvider for EnvProvider {
    fn provide(&self, ctx: &ActivityContext) {
        for (key, var) in &self.mappings {
            if let Ok(value) = env::var(var) {
                ctx.set(key.clone(), Value::String(value));
            }
        }
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
