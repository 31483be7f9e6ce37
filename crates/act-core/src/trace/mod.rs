//! Registro en memoria de transiciones de ciclo de vida de tasks.
//!
//! Rol en el flujo:
//! - Cada batch notifica a sus observers las transiciones
//!   starting → started → finished/failed.
//! - `TraceLog` es un observer append-only que conserva esas transiciones
//!   para inspección posterior (y para los tests de ordenamiento).
//! - No participa del resultado del batch; es sólo observabilidad.

pub mod types;

pub use types::{TaskEvent, TaskEventKind, TraceLog};
