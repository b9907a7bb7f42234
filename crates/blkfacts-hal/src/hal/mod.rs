//! HAL trait definitions and implementations.
//!
//! This module defines the core traits for system operations and provides
//! both real (LinuxHal) and fake (FakeHal) implementations.

pub mod fake_hal;
pub mod linux_hal;
pub mod package_ops;
pub mod process_ops;

pub use fake_hal::{FakeHal, Operation};
pub use linux_hal::LinuxHal;
pub use package_ops::PackageOps;
pub use process_ops::ProcessOps;

/// Complete HAL combining all system operation traits.
pub trait SystemHal: ProcessOps + PackageOps + Send + Sync {}

/// Automatically implement SystemHal for any type implementing all required traits.
impl<T> SystemHal for T where T: ProcessOps + PackageOps + Send + Sync {}
