//! Raíz de composición: acá (y sólo acá) se hace el wiring del proceso.
//!
//! - Inicializa el subscriber de tracing.
//! - Construye el `EngineRegistry` explícitamente desde `AppConfig` (nada de
//!   singletons perezosos escondidos).
//! - Puebla un contexto vía providers y corre pipelines de demostración.
mod config;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use act_adapters::{And, Conditional, FanOut, JoinText, Not, SplitText};
use act_core::{Activity, ActivityBehavior, ActivityContext, ActivityData, ActivityInfo,
               ActivityRole, CompositeProvider, CoreError, EngineRegistry, ParallelEngine, SequentialEngine};

use crate::config::{AppConfig, EnvProvider};

/// Predicado de demo: truthiness de una clave del contexto.
#[derive(Debug)]
struct ContextFlag {
    key: &'static str,
}

#[async_trait]
impl ActivityBehavior for ContextFlag {
    fn role(&self) -> ActivityRole {
        ActivityRole::Transformation
    }

    async fn on_scalar(&self, ctx: Arc<ActivityContext>, _value: Value) -> Result<ActivityData, CoreError> {
        Ok(ActivityData::Scalar(ctx.get(self.key).unwrap_or(Value::Null)))
    }
}

#[tokio::main]
async fn main() -> Result<(), CoreError> {
    config::init_dotenv();
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let cfg = AppConfig::from_env();
    info!(pool_size = cfg.pool_size, wait_mode = ?cfg.wait_mode, "actflow starting");

    // Registry explícito: default secuencial, reemplazable por bootstrap.
    let registry = EngineRegistry::new(Arc::new(SequentialEngine::new()));

    // Contexto poblado por providers (estáticos + entorno).
    let mut providers = CompositeProvider::new();
    providers.push(Box::new(EnvProvider::new(vec![("feature_enabled", "ACTFLOW_FEATURE")])));
    let ctx = Arc::new(ActivityContext::new());
    providers.apply(&ctx);

    // Demo 1: cadena secuencial split → join con el engine por defecto.
    let batch = vec![ActivityInfo::new(Arc::new(SplitText::new(" ")),
                                       Some(ActivityData::scalar("actividades en secuencia")),
                                       Arc::clone(&ctx)),
                     ActivityInfo::new(Arc::new(JoinText::new("/")), None, Arc::clone(&ctx))];
    let sequential_out = registry.default_engine().execute(batch).await?;
    println!("secuencial: {sequential_out:?}");

    // Demo 2: reemplazo del default por un engine paralelo configurado.
    registry.set_default(Arc::new(ParallelEngine::builder().pool_size(cfg.pool_size)
                                                           .wait_mode(cfg.wait_mode)
                                                           .build()));
    let fan_out = FanOut::new(vec![Arc::new(Not::new()) as Arc<dyn Activity>,
                                   Arc::new(Not::new()) as Arc<dyn Activity>])
        .with_aggregator(Arc::new(And::new().with_label("all")))
        .with_pool_size(cfg.pool_size);
    let parallel_out = fan_out.perform(Arc::clone(&ctx), ActivityData::scalar(false)).await?;
    println!("paralelo: {parallel_out:?}");

    // Demo 3: bifurcación por truthiness de `feature_enabled` (ver .env).
    let conditional = Conditional::new(Arc::new(ContextFlag { key: "feature_enabled" }),
                                       Arc::new(SplitText::new(" ")));
    let conditional_out = conditional.perform(Arc::clone(&ctx), ActivityData::scalar("rama de exito")).await?;
    println!("condicional: {conditional_out:?}");

    Ok(())
}
