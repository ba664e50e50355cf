//! Domain models for Fleet Telemetry.

pub mod alert;
pub mod device;
pub mod document;
pub mod filter;
pub mod patch;
pub mod status_check;

pub use alert::Alert;
pub use device::Device;
pub use document::{Document, Patchable};
pub use filter::Filter;
pub use patch::{FieldKind, PatchError};
pub use status_check::StatusCheck;
