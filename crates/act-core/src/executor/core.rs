//! Coordinación de concurrencia: pool acotado + cola de señales de
//! completitud etiquetadas por slot.
//!
//! Invariantes:
//! - Los slot indices son únicos dentro de una llamada a `execute` y estables
//!   durante la vida del batch (namespace fresco 0..N-1 por llamada: cada
//!   batch lleva su propio canal, así batches intercalados sobre el mismo
//!   executor no se cruzan).
//! - El canal de completitud nunca pierde una señal: toda task submitted,
//!   cualquiera sea su desenlace (éxito, error o aborto), postea exactamente
//!   una vez su token `(slot, outcome)`.
//! - `wait_for_all` drena exactamente N tokens y rearma la lista por slot
//!   index (orden de submission), no por orden de llegada.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::sync::{Mutex, Semaphore};
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::executor::{Task, TaskObserver};

/// Configuración del pool de workers.
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Cantidad máxima de tasks corriendo a la vez.
    pub pool_size: usize,
}

impl ExecutorConfig {
    pub fn with_pool_size(pool_size: usize) -> Self {
        Self { pool_size: pool_size.max(1) }
    }
}

impl Default for ExecutorConfig {
    /// Un worker por CPU lógica disponible.
    fn default() -> Self {
        let cpus = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
        Self { pool_size: cpus }
    }
}

/// Token posteado al canal de completitud de un batch.
struct CompletionToken<R> {
    slot: usize,
    outcome: Result<R, CoreError>,
}

/// Handles pendientes de un batch submitted.
///
/// Posee el canal de completitud del batch y el registro slot→task usado para
/// los callbacks de observers tras la completitud.
pub struct TaskBatch<R> {
    batch_id: Uuid,
    rx: Receiver<CompletionToken<R>>,
    slots: Vec<Arc<dyn Task<Output = R>>>,
}

impl<R> std::fmt::Debug for TaskBatch<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskBatch")
            .field("batch_id", &self.batch_id)
            .field("slots", &self.slots.len())
            .finish()
    }
}

impl<R> TaskBatch<R> {
    pub fn batch_id(&self) -> Uuid {
        self.batch_id
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Ejecuta batches de tasks sobre el runtime con concurrencia acotada.
pub struct TaskExecutor<R> {
    semaphore: Arc<Semaphore>,
    observers: Vec<Arc<dyn TaskObserver<R>>>,
    /// Sección crítica por batch: la asignación de slots es atómica frente a
    /// llamadas concurrentes a `execute` sobre la misma instancia.
    submit_gate: Mutex<()>,
    disposed: AtomicBool,
}

impl<R> TaskExecutor<R> where R: Send + 'static
{
    pub fn new(config: ExecutorConfig) -> Self {
        Self { semaphore: Arc::new(Semaphore::new(config.pool_size)),
               observers: Vec::new(),
               submit_gate: Mutex::new(()),
               disposed: AtomicBool::new(false) }
    }

    /// Registra un observer; el orden de registro es el orden de invocación.
    pub fn add_observer(&mut self, observer: Arc<dyn TaskObserver<R>>) {
        self.observers.push(observer);
    }

    /// Submitea un batch: asigna slots 0..N-1 en orden de submission y lanza
    /// cada task envuelta de modo que su completitud (éxito O fallo) postee
    /// incondicionalmente su token antes de terminar.
    pub async fn execute(&self, tasks: Vec<Arc<dyn Task<Output = R>>>) -> Result<TaskBatch<R>, CoreError> {
        if self.disposed.load(Ordering::SeqCst) {
            return Err(CoreError::ExecutorDisposed);
        }
        let batch_id = Uuid::new_v4();
        let n = tasks.len();
        let (tx, rx) = mpsc::channel::<CompletionToken<R>>(n.max(1));

        let _gate = self.submit_gate.lock().await;
        let mut slots: Vec<Arc<dyn Task<Output = R>>> = Vec::with_capacity(n);
        for (slot, task) in tasks.into_iter().enumerate() {
            for obs in &self.observers {
                obs.on_task_starting(task.as_ref());
            }
            self.spawn_slot(slot, Arc::clone(&task), tx.clone());
            for obs in &self.observers {
                obs.on_task_started(task.as_ref());
            }
            slots.push(task);
        }
        debug!(batch = %batch_id, tasks = n, "batch submitted");

        Ok(TaskBatch { batch_id, rx, slots })
    }

    fn spawn_slot(&self, slot: usize, task: Arc<dyn Task<Output = R>>, tx: Sender<CompletionToken<R>>) {
        let semaphore = Arc::clone(&self.semaphore);
        tokio::spawn(async move {
            let outcome = match semaphore.acquire_owned().await {
                Ok(_permit) => {
                    // Spawn interno: un panic en el cuerpo de la task queda
                    // contenido en el JoinError y el token se postea igual.
                    let body = tokio::spawn({
                                   let task = Arc::clone(&task);
                                   async move { task.run().await }
                               });
                    match body.await {
                        Ok(result) => result,
                        Err(join_err) => Err(CoreError::TaskFailed(format!("{} aborted: {join_err}", task.describe()))),
                    }
                }
                Err(_) => Err(CoreError::ExecutorDisposed),
            };
            let _ = tx.send(CompletionToken { slot, outcome }).await;
        });
    }

    /// Drena exactamente `len` tokens y devuelve los resultados ordenados por
    /// slot index. No devuelve éxito parcial: el primer error resuelto aborta
    /// el resultado agregado, pero el drenaje consume las N señales primero
    /// para no dejar tokens huérfanos.
    pub async fn wait_for_all(&self, batch: TaskBatch<R>) -> Result<Vec<R>, CoreError> {
        self.drain_all(batch, None).await
    }

    /// Variante con plazo: si el deadline vence antes de drenar las N
    /// señales, reporta qué slots nunca llegaron.
    pub async fn wait_for_all_deadline(&self, batch: TaskBatch<R>, limit: Duration) -> Result<Vec<R>, CoreError> {
        self.drain_all(batch, Some(Instant::now() + limit)).await
    }

    async fn drain_all(&self, mut batch: TaskBatch<R>, deadline: Option<Instant>) -> Result<Vec<R>, CoreError> {
        let n = batch.slots.len();
        let mut resolved: Vec<Option<Result<R, CoreError>>> = Vec::with_capacity(n);
        resolved.resize_with(n, || None);
        let mut first_error: Option<CoreError> = None;

        for _ in 0..n {
            let received = match deadline {
                None => batch.rx.recv().await,
                Some(at) => match tokio::time::timeout_at(at, batch.rx.recv()).await {
                    Ok(received) => received,
                    Err(_) => {
                        let pending_slots = resolved.iter()
                                                    .enumerate()
                                                    .filter(|(_, r)| r.is_none())
                                                    .map(|(slot, _)| slot)
                                                    .collect();
                        return Err(CoreError::TimedOut { pending_slots });
                    }
                },
            };
            let token = received.ok_or_else(|| CoreError::Internal("completion channel closed before drain".into()))?;
            let task = batch.slots
                            .get(token.slot)
                            .ok_or_else(|| CoreError::Internal(format!("unknown slot {}", token.slot)))?;
            for obs in &self.observers {
                obs.on_task_complete(task.as_ref(), &token.outcome);
            }
            if first_error.is_none() {
                if let Err(e) = &token.outcome {
                    first_error = Some(e.clone());
                }
            }
            resolved[token.slot] = Some(token.outcome);
        }

        if let Some(e) = first_error {
            return Err(e);
        }
        let mut ordered = Vec::with_capacity(n);
        for entry in resolved {
            match entry {
                Some(Ok(value)) => ordered.push(value),
                _ => return Err(CoreError::Internal("slot drained without outcome".into())),
            }
        }
        debug!(batch = %batch.batch_id, "batch drained");
        Ok(ordered)
    }

    /// Devuelve el primer resultado disponible. No drena ni cancela las
    /// tasks restantes: siguen corriendo hasta completarse por sus propios
    /// efectos, pero esta llamada deja de escuchar.
    pub async fn wait_for_any(&self, mut batch: TaskBatch<R>) -> Result<R, CoreError> {
        if batch.slots.is_empty() {
            return Err(CoreError::Configuration("wait_for_any requires at least one task".into()));
        }
        let token = batch.rx
                         .recv()
                         .await
                         .ok_or_else(|| CoreError::Internal("completion channel closed before drain".into()))?;
        let task = batch.slots
                        .get(token.slot)
                        .ok_or_else(|| CoreError::Internal(format!("unknown slot {}", token.slot)))?;
        for obs in &self.observers {
            obs.on_task_complete(task.as_ref(), &token.outcome);
        }
        token.outcome
    }

    /// Libera el pool: las tasks encoladas que aún no tomaron permiso fallan
    /// con `ExecutorDisposed` (posteando su token igual) y no se admiten más
    /// submissions.
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
        self.semaphore.close();
        debug!("executor disposed");
    }
}

impl<R> Default for TaskExecutor<R> where R: Send + 'static
{
    fn default() -> Self {
        Self::new(ExecutorConfig::default())
    }
}
