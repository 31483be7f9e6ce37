//! act-core: framework de ejecución de activities (scalar/vector) con motor
//! de tasks concurrente.
pub mod activity;
pub mod engine;
pub mod errors;
pub mod executor;
pub mod model;
pub mod provision;
pub mod registry;
pub mod trace;

pub use activity::{compose_id, Activity, ActivityBehavior, ActivityRole};
pub use engine::{ActivityEngine, ParallelEngine, ParallelEngineBuilder, SequentialEngine};
pub use errors::CoreError;
pub use executor::{ExecutorConfig, Task, TaskBatch, TaskExecutor, TaskObserver, WaitMode};
pub use model::{data_truthiness, truthiness, ActivityContext, ActivityData, ActivityInfo, DataShape};
pub use provision::{CompositeProvider, ContextProvider, StaticProvider};
pub use registry::EngineRegistry;
pub use trace::{TaskEvent, TaskEventKind, TraceLog};
