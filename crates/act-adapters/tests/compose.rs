//! Composición: Conditional, Compound (cadena secuencial) y FanOut
//! (paralelo + agregación) sobre los engines del core.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use act_adapters::{And, Compound, Conditional, FanOut, JoinText, Not, SplitText};
use act_core::{Activity, ActivityBehavior, ActivityContext, ActivityData, ActivityRole, CoreError, WaitMode};

fn ctx() -> Arc<ActivityContext> {
    Arc::new(ActivityContext::new())
}

/// Predicado: truthiness de una clave del contexto.
#[derive(Debug)]
struct KeyIsTrue {
    key: &'static str,
}

#[async_trait]
impl ActivityBehavior for KeyIsTrue {
    fn role(&self) -> ActivityRole {
        ActivityRole::Transformation
    }

    async fn on_scalar(&self, ctx: Arc<ActivityContext>, _value: Value) -> Result<ActivityData, CoreError> {
        Ok(ActivityData::Scalar(ctx.get(self.key).unwrap_or(Value::Null)))
    }
}

/// Transformation que marca un flag al ejecutarse y devuelve una etiqueta.
#[derive(Debug)]
struct Visited {
    name: &'static str,
    seen: Arc<AtomicBool>,
}

#[async_trait]
impl ActivityBehavior for Visited {
    fn role(&self) -> ActivityRole {
        ActivityRole::Transformation
    }

    async fn on_scalar(&self, _ctx: Arc<ActivityContext>, _value: Value) -> Result<ActivityData, CoreError> {
        self.seen.store(true, Ordering::SeqCst);
        Ok(ActivityData::scalar(self.name))
    }
}

#[tokio::test]
async fn conditional_runs_only_the_selected_branch() {
    let ctx = ctx();
    ctx.set("flag", json!("TRUE")); // coerción truthiness case-insensitive

    let success_seen = Arc::new(AtomicBool::new(false));
    let failure_seen = Arc::new(AtomicBool::new(false));
    let conditional = Conditional::new(Arc::new(KeyIsTrue { key: "flag" }),
                                       Arc::new(Visited { name: "success", seen: Arc::clone(&success_seen) }))
        .with_failure(Arc::new(Visited { name: "failure", seen: Arc::clone(&failure_seen) }));

    let out = conditional.perform(Arc::clone(&ctx), ActivityData::scalar("input")).await.expect("run ok");
    assert_eq!(out, ActivityData::scalar("success"));
    assert!(success_seen.load(Ordering::SeqCst));
    assert!(!failure_seen.load(Ordering::SeqCst));
}

#[tokio::test]
async fn conditional_without_failure_activity_passes_the_input_through() {
    let ctx = ctx();
    ctx.set("flag", json!(0)); // entero no positivo: false

    let success_seen = Arc::new(AtomicBool::new(false));
    let conditional = Conditional::new(Arc::new(KeyIsTrue { key: "flag" }),
                                       Arc::new(Visited { name: "success", seen: Arc::clone(&success_seen) }));

    let out = conditional.perform(Arc::clone(&ctx), ActivityData::scalar("original")).await.expect("run ok");
    assert_eq!(out, ActivityData::scalar("original"));
    assert!(!success_seen.load(Ordering::SeqCst));
}

#[tokio::test]
async fn compound_chains_split_and_join() {
    let chain = Compound::new(vec![Arc::new(SplitText::new(",")) as Arc<dyn Activity>,
                                   Arc::new(JoinText::new(" - ")) as Arc<dyn Activity>]);

    let out = chain.perform(ctx(), ActivityData::scalar("a, b, c")).await.expect("chain ok");
    assert_eq!(out, ActivityData::scalar("a - b - c"));
}

#[tokio::test]
async fn fan_out_replicates_input_and_aggregates() {
    // false → dos Not en paralelo → [true, true] → And → true.
    let fan_out = FanOut::new(vec![Arc::new(Not::new()) as Arc<dyn Activity>,
                                   Arc::new(Not::new()) as Arc<dyn Activity>])
        .with_aggregator(Arc::new(And::new().with_label("all")))
        .with_pool_size(2);

    let out = fan_out.perform(ctx(), ActivityData::scalar(false)).await.expect("fan out ok");
    assert_eq!(out, ActivityData::scalar(true));
}

#[tokio::test]
async fn fan_out_with_a_single_child_matches_the_direct_call() {
    let direct = Not::new().perform(ctx(), ActivityData::scalar(true)).await.expect("direct ok");
    let fan_out = FanOut::new(vec![Arc::new(Not::new()) as Arc<dyn Activity>])
        .with_aggregator(Arc::new(And::new()));

    let out = fan_out.perform(ctx(), ActivityData::scalar(true)).await.expect("fan out ok");
    assert_eq!(out, direct);
}

#[tokio::test]
async fn fan_out_wait_for_any_returns_a_single_result() {
    let fan_out = FanOut::new(vec![Arc::new(Not::new()) as Arc<dyn Activity>,
                                   Arc::new(Not::new()) as Arc<dyn Activity>])
        .with_wait_mode(WaitMode::WaitForAny)
        .with_pool_size(2);

    // Ambas hijas producen lo mismo, así que cualquiera que gane vale.
    let out = fan_out.perform(ctx(), ActivityData::scalar(false)).await.expect("fan out ok");
    assert_eq!(out, ActivityData::scalar(true));
}

#[tokio::test]
async fn fan_out_propagates_a_child_error() {
    // Not con input no booleano falla; el batch completo aborta.
    let fan_out = FanOut::new(vec![Arc::new(Not::new()) as Arc<dyn Activity>,
                                   Arc::new(Not::new()) as Arc<dyn Activity>]).with_pool_size(2);

    let err = fan_out.perform(ctx(), ActivityData::scalar(json!("nope"))).await.unwrap_err();
    assert!(matches!(err, CoreError::InvalidArgument(_)));
}
