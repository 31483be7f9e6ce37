//! Tipos de evento de ciclo de vida y el observer `TraceLog`.
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::executor::{Task, TaskObserver};

/// Transiciones observables de una task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskEventKind {
    /// El executor está por submitear la task (pre-spawn).
    TaskStarting,
    /// La task quedó submitted al pool. No implica que ya corra.
    TaskStarted,
    /// El slot se resolvió con éxito.
    TaskFinished,
    /// El slot se resolvió con error.
    TaskFailed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskEvent {
    pub seq: u64, // orden de append dentro del log
    pub task: String,
    pub kind: TaskEventKind,
    pub ts: DateTime<Utc>, // metadato de diagnóstico
}

/// Observer append-only en memoria.
#[derive(Debug, Default)]
pub struct TraceLog {
    inner: Mutex<Vec<TaskEvent>>,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn append(&self, task: String, kind: TaskEventKind) {
        let mut events = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let seq = events.len() as u64;
        events.push(TaskEvent { seq, task, kind, ts: Utc::now() });
    }

    /// Copia de los eventos registrados (orden ascendente por seq).
    pub fn events(&self) -> Vec<TaskEvent> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Sólo las variantes, para asserts compactos.
    pub fn kinds(&self) -> Vec<TaskEventKind> {
        self.events().iter().map(|e| e.kind).collect()
    }

    /// Variantes registradas para una task puntual (por descripción).
    pub fn kinds_for(&self, task: &str) -> Vec<TaskEventKind> {
        self.events().iter().filter(|e| e.task == task).map(|e| e.kind).collect()
    }
}

impl<R: Send + 'static> TaskObserver<R> for TraceLog {
    fn on_task_starting(&self, task: &dyn Task<Output = R>) {
        self.append(task.describe(), TaskEventKind::TaskStarting);
    }

    fn on_task_started(&self, task: &dyn Task<Output = R>) {
        self.append(task.describe(), TaskEventKind::TaskStarted);
    }

    fn on_task_complete(&self, task: &dyn Task<Output = R>, result: &Result<R, CoreError>) {
        let kind = if result.is_ok() { TaskEventKind::TaskFinished } else { TaskEventKind::TaskFailed };
        self.append(task.describe(), kind);
    }
}
