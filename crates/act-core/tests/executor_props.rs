//! Propiedades de concurrencia del TaskExecutor: orden por slot,
//! completitud exacta, señal ante fallo y espera-por-cualquiera.
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use act_core::{CoreError, ExecutorConfig, Task, TaskEventKind, TaskExecutor, TaskObserver, TraceLog};

/// Task de prueba: duerme `delay_ms` y devuelve su `value`, o falla.
struct DelayedTask {
    value: usize,
    delay_ms: u64,
    fail: bool,
}

impl DelayedTask {
    fn ok(value: usize, delay_ms: u64) -> Arc<dyn Task<Output = usize>> {
        Arc::new(Self { value, delay_ms, fail: false })
    }

    fn failing(value: usize, delay_ms: u64) -> Arc<dyn Task<Output = usize>> {
        Arc::new(Self { value, delay_ms, fail: true })
    }
}

#[async_trait]
impl Task for DelayedTask {
    type Output = usize;

    async fn run(&self) -> Result<usize, CoreError> {
        sleep(Duration::from_millis(self.delay_ms)).await;
        if self.fail {
            return Err(CoreError::TaskFailed(format!("task {} blew up", self.value)));
        }
        Ok(self.value)
    }

    fn describe(&self) -> String {
        format!("delayed-{}", self.value)
    }
}

/// Observer que cuenta cierres, para verificar el drenaje exacto de N.
#[derive(Default)]
struct CompletionCounter {
    completed: AtomicUsize,
}

impl TaskObserver<usize> for CompletionCounter {
    fn on_task_complete(&self, _task: &dyn Task<Output = usize>, _result: &Result<usize, CoreError>) {
        self.completed.fetch_add(1, Ordering::SeqCst);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn wait_for_all_preserves_submission_order() {
    let executor: TaskExecutor<usize> = TaskExecutor::new(ExecutorConfig::with_pool_size(4));
    // Delays decrecientes: el orden de completitud es el inverso al de
    // submission, pero el resultado debe venir ordenado por slot.
    let tasks: Vec<_> = (0..8).map(|i| DelayedTask::ok(i, (8 - i as u64) * 15)).collect();

    let batch = executor.execute(tasks).await.expect("submit ok");
    let results = executor.wait_for_all(batch).await.expect("drain ok");
    assert_eq!(results, (0..8).collect::<Vec<_>>());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn wait_for_all_drains_exactly_n_signals() {
    let counter = Arc::new(CompletionCounter::default());
    let mut executor: TaskExecutor<usize> = TaskExecutor::new(ExecutorConfig::with_pool_size(2));
    executor.add_observer(Arc::clone(&counter) as Arc<dyn TaskObserver<usize>>);

    let tasks: Vec<_> = (0..5).map(|i| DelayedTask::ok(i, 5)).collect();
    let batch = executor.execute(tasks).await.expect("submit ok");
    let results = executor.wait_for_all(batch).await.expect("drain ok");

    assert_eq!(results.len(), 5);
    assert_eq!(counter.completed.load(Ordering::SeqCst), 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn failing_task_still_posts_its_completion_signal() {
    let counter = Arc::new(CompletionCounter::default());
    let mut executor: TaskExecutor<usize> = TaskExecutor::new(ExecutorConfig::with_pool_size(4));
    executor.add_observer(Arc::clone(&counter) as Arc<dyn TaskObserver<usize>>);

    let tasks = vec![DelayedTask::ok(0, 10), DelayedTask::failing(1, 5), DelayedTask::ok(2, 20)];
    let batch = executor.execute(tasks).await.expect("submit ok");

    // Debe terminar (nunca colgarse) y reportar el error de la task fallida.
    let drained = tokio::time::timeout(Duration::from_secs(5), executor.wait_for_all(batch)).await
                                                                                            .expect("wait_for_all must terminate");
    let err = drained.unwrap_err();
    assert_eq!(err, CoreError::TaskFailed("task 1 blew up".into()));
    // El drenaje consumió las N señales aunque una falló.
    assert_eq!(counter.completed.load(Ordering::SeqCst), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn wait_for_any_returns_the_fast_task() {
    let executor: TaskExecutor<usize> = TaskExecutor::new(ExecutorConfig::with_pool_size(4));
    let tasks = vec![DelayedTask::ok(0, 300), DelayedTask::ok(1, 300), DelayedTask::ok(2, 1), DelayedTask::ok(3, 300)];

    let batch = executor.execute(tasks).await.expect("submit ok");
    let first = executor.wait_for_any(batch).await.expect("one result");
    assert_eq!(first, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn deadline_reports_the_slots_that_never_arrived() {
    let executor: TaskExecutor<usize> = TaskExecutor::new(ExecutorConfig::with_pool_size(4));
    let tasks = vec![DelayedTask::ok(0, 1), DelayedTask::ok(1, 5_000), DelayedTask::ok(2, 1)];

    let batch = executor.execute(tasks).await.expect("submit ok");
    let err = executor.wait_for_all_deadline(batch, Duration::from_millis(300)).await.unwrap_err();
    assert_eq!(err, CoreError::TimedOut { pending_slots: vec![1] });
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn interleaved_batches_keep_separate_slot_namespaces() {
    let executor: Arc<TaskExecutor<usize>> = Arc::new(TaskExecutor::new(ExecutorConfig::with_pool_size(4)));

    // Dos batches submitted antes de drenar cualquiera: cada uno arranca su
    // namespace de slots en cero y drena sólo sus propias señales.
    let batch_a = executor.execute((0..3).map(|i| DelayedTask::ok(i + 100, 20)).collect()).await.expect("a ok");
    let batch_b = executor.execute((0..3).map(|i| DelayedTask::ok(i + 200, 5)).collect()).await.expect("b ok");

    let results_b = executor.wait_for_all(batch_b).await.expect("drain b");
    let results_a = executor.wait_for_all(batch_a).await.expect("drain a");
    assert_eq!(results_a, vec![100, 101, 102]);
    assert_eq!(results_b, vec![200, 201, 202]);
}

#[tokio::test]
async fn dispose_rejects_further_submissions() {
    let executor: TaskExecutor<usize> = TaskExecutor::new(ExecutorConfig::with_pool_size(2));
    executor.dispose();
    let err = executor.execute(vec![DelayedTask::ok(0, 1)]).await.unwrap_err();
    assert_eq!(err, CoreError::ExecutorDisposed);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn trace_log_orders_lifecycle_per_task() {
    let trace = Arc::new(TraceLog::new());
    let mut executor: TaskExecutor<usize> = TaskExecutor::new(ExecutorConfig::with_pool_size(2));
    executor.add_observer(Arc::clone(&trace) as Arc<dyn TaskObserver<usize>>);

    let batch = executor.execute(vec![DelayedTask::ok(7, 5), DelayedTask::failing(8, 5)]).await.expect("submit ok");
    let _ = executor.wait_for_all(batch).await;

    assert_eq!(trace.kinds_for("delayed-7"),
               vec![TaskEventKind::TaskStarting, TaskEventKind::TaskStarted, TaskEventKind::TaskFinished]);
    assert_eq!(trace.kinds_for("delayed-8"),
               vec![TaskEventKind::TaskStarting, TaskEventKind::TaskStarted, TaskEventKind::TaskFailed]);
}
