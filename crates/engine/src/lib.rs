//! Core of the cash-flow back office.
//!
//! The engine owns the persisted state (global settings, sparse per-date day
//! records, payments, the supplier directory) and the month projection that
//! reconstructs a full day-by-day ledger from those sparse overrides.
//!
//! All monetary values are integer cents (`i64`, fields suffixed `_minor`).

pub use error::EngineError;
pub use month::Month;
pub use ops::{Engine, EngineBuilder, NewPayment};
pub use projection::{DayEntry, DayStatus, PaymentLine};

pub mod days;
pub mod payments;
pub mod settings;
pub mod supplier_notes;
pub mod suppliers;

mod error;
mod month;
mod ops;
mod projection;

type ResultEngine<T> = Result<T, EngineError>;
