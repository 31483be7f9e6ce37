//! Contrato de notificación de ciclo de vida de tasks.
use crate::errors::CoreError;
use crate::executor::Task;

/// Observador de ciclo de vida registrado en un `TaskExecutor`.
///
/// El executor garantiza el orden "starting → started → complete" por task,
/// pero no exclusión mutua sobre el estado de la task: los callbacks reciben
/// acceso no sincronizado y las implementaciones que lean/escriban estado
/// desde aquí deben hacer la task segura para acceso concurrente. Las
/// notificaciones `on_task_complete` llegan en orden de completitud, no de
/// submission.
pub trait TaskObserver<R>: Send + Sync {
    fn on_task_starting(&self, _task: &dyn Task<Output = R>) {}

    fn on_task_started(&self, _task: &dyn Task<Output = R>) {}

    fn on_task_complete(&self, _task: &dyn Task<Output = R>, _result: &Result<R, CoreError>) {}
}
