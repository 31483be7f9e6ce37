//! Núcleo de ejecución concurrente.
//!
//! Una `Task` es trabajo concurrente con resultado tipado, sin identidad
//! propia; el `TaskExecutor` le asigna un slot index por batch y correlaciona
//! las señales de completitud con los resultados a través de un canal de
//! tokens `(slot, outcome)` leído exactamente N veces.

pub mod core;
pub mod observer;
pub mod task;

pub use core::{ExecutorConfig, TaskBatch, TaskExecutor};
pub use observer::TaskObserver;
pub use task::{Task, WaitMode};
