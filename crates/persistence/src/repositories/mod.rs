//! Repository implementations for document operations.

pub mod document;
pub mod status_check;

use domain::models::{Alert, Device};

pub use document::{DocumentRepository, LIST_LIMIT};
pub use status_check::{StatusCheckRepository, STATUS_LIST_LIMIT};

pub type DeviceRepository = DocumentRepository<Device>;
pub type AlertRepository = DocumentRepository<Alert>;
