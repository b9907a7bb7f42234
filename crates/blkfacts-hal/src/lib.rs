//! blkfacts hardware/system abstraction layer.
//!
//! External processes and package installs are "world-touching" and must go
//! through the HAL so the fact pipeline can be tested without a real blkid.

pub mod error;
pub mod hal;
pub mod os_release;

pub use error::{HalError, HalResult};
pub use hal::{FakeHal, LinuxHal, Operation, PackageOps, ProcessOps, SystemHal};
