//! Contrato de activities y despacho por rol.
//!
//! Este módulo define:
//! - `Activity`: interfaz neutral usada por los engines.
//! - `ActivityRole`: etiqueta de rol (Transformation / Aggregator / Splitter).
//! - `ActivityBehavior`: interfaz de alto nivel con hooks opcionales por
//!   forma, adaptada automáticamente a `Activity`.

pub mod behavior;
pub mod definition;

pub use behavior::ActivityBehavior;
pub use definition::{compose_id, Activity, ActivityRole};
