//! Process execution helpers.

use crate::HalResult;
use std::process::Output;
use std::time::Duration;

/// Process execution trait (external command runner).
///
/// `command_output` reports spawn and timeout problems as errors but leaves
/// exit-status interpretation to the caller.
pub trait ProcessOps {
    fn command_output(&self, program: &str, args: &[&str], timeout: Duration) -> HalResult<Output>;

    fn command_status(&self, program: &str, args: &[&str], timeout: Duration) -> HalResult<()>;
}
