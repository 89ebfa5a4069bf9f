//! Captured media domain module

mod descriptor;
mod payload;

pub use descriptor::{MediaDescriptor, FILE_NAME_PREFIX};
pub use payload::{MediaKind, RecordingPayload};
