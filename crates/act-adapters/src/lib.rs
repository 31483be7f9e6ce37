//! act-adapters: activities concretas sobre el contrato del core.
//!
//! Este crate provee:
//! - Operadores lógicos `And` / `Or` (aggregators con corto circuito) y
//!   `Not` (transformation sólo escalar).
//! - `Conditional`: bifurcación por truthiness del resultado de una activity
//!   de prueba.
//! - `Compound` y `FanOut`: activities que componen los engines del core
//!   (encadenamiento secuencial y fan-out paralelo + agregación).
//! - `SplitText` / `JoinText`: splitter y aggregator de texto de ejemplo.
//!
//! Nota: el core sólo conoce `ActivityData { Scalar | Vector }` sobre JSON;
//! las activities de acá no introducen semántica nueva en el core.

pub mod compound;
pub mod conditional;
pub mod logic;
pub mod text;

pub use compound::{Compound, FanOut};
pub use conditional::Conditional;
pub use logic::{And, Not, Or};
pub use text::{JoinText, SplitText};
