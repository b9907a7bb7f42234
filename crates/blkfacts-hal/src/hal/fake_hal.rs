//! Fake HAL implementation for testing.
//!
//! This implementation records all operations without executing them and
//! replays scripted responses, allowing CI-safe testing without a real
//! blkid binary or package manager.

use super::{PackageOps, ProcessOps};
use crate::{HalError, HalResult};
use std::collections::{HashMap, VecDeque};
#[cfg(unix)]
use std::os::unix::process::ExitStatusExt;
#[cfg(windows)]
use std::os::windows::process::ExitStatusExt;
use std::process::{ExitStatus, Output};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Operation records for testing and verification.
#[derive(Debug, Clone)]
pub enum Operation {
    Command {
        program: String,
        args: Vec<String>,
    },
    InstallPackage {
        package: String,
    },
}

#[derive(Debug, Clone)]
enum Response {
    Success { stdout: String },
    Exit { code: i32, stderr: String },
    Missing,
}

/// Shared state for FakeHal operations.
#[derive(Debug, Default)]
struct FakeHalState {
    /// All operations that were recorded
    operations: Vec<Operation>,
    /// Scripted responses, consumed front-to-back per program
    responses: HashMap<String, VecDeque<Response>>,
    /// Whether install_package calls should fail
    install_error: bool,
}

/// Fake HAL implementation that records operations without executing them.
///
/// A program with no scripted response behaves as if it were not installed.
#[derive(Debug, Clone, Default)]
pub struct FakeHal {
    state: Arc<Mutex<FakeHalState>>,
}

fn exit_status(code: i32) -> ExitStatus {
    #[cfg(unix)]
    {
        ExitStatus::from_raw(code << 8)
    }
    #[cfg(windows)]
    {
        ExitStatus::from_raw(code as u32)
    }
}

impl FakeHal {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeHalState::default())),
        }
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<Operation> {
        self.state.lock().unwrap().operations.clone()
    }

    /// Get the number of operations recorded.
    pub fn operation_count(&self) -> usize {
        self.state.lock().unwrap().operations.len()
    }

    /// Check if a specific operation was recorded.
    pub fn has_operation(&self, check: impl Fn(&Operation) -> bool) -> bool {
        self.state.lock().unwrap().operations.iter().any(check)
    }

    /// Clear all recorded operations (scripted responses are kept).
    pub fn clear(&self) {
        self.state.lock().unwrap().operations.clear();
    }

    /// Queue a successful run of `program` producing `stdout`.
    pub fn script_output(&self, program: &str, stdout: &str) {
        self.push_response(
            program,
            Response::Success {
                stdout: stdout.to_string(),
            },
        );
    }

    /// Queue a run of `program` exiting with `code` and `stderr`.
    pub fn script_exit(&self, program: &str, code: i32, stderr: &str) {
        self.push_response(
            program,
            Response::Exit {
                code,
                stderr: stderr.to_string(),
            },
        );
    }

    /// Queue a "command not found" for `program`.
    pub fn script_missing(&self, program: &str) {
        self.push_response(program, Response::Missing);
    }

    /// Make subsequent install_package calls fail.
    pub fn fail_installs(&self) {
        self.state.lock().unwrap().install_error = true;
    }

    fn push_response(&self, program: &str, response: Response) {
        self.state
            .lock()
            .unwrap()
            .responses
            .entry(program.to_string())
            .or_default()
            .push_back(response);
    }

    fn respond(&self, program: &str, args: &[&str]) -> HalResult<Output> {
        let mut state = self.state.lock().unwrap();
        state.operations.push(Operation::Command {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        });
        let response = state
            .responses
            .get_mut(program)
            .and_then(|queue| queue.pop_front());
        match response {
            Some(Response::Success { stdout }) => Ok(Output {
                status: exit_status(0),
                stdout: stdout.into_bytes(),
                stderr: Vec::new(),
            }),
            Some(Response::Exit { code, stderr }) => Ok(Output {
                status: exit_status(code),
                stdout: Vec::new(),
                stderr: stderr.into_bytes(),
            }),
            Some(Response::Missing) | None => Err(HalError::CommandNotFound(program.to_string())),
        }
    }
}

impl ProcessOps for FakeHal {
    fn command_output(&self, program: &str, args: &[&str], _timeout: Duration) -> HalResult<Output> {
        self.respond(program, args)
    }

    fn command_status(&self, program: &str, args: &[&str], _timeout: Duration) -> HalResult<()> {
        let output = self.respond(program, args)?;
        if !output.status.success() {
            return Err(HalError::CommandFailed {
                program: program.to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

impl PackageOps for FakeHal {
    fn install_package(&self, package: &str) -> HalResult<()> {
        let mut state = self.state.lock().unwrap();
        state.operations.push(Operation::InstallPackage {
            package: package.to_string(),
        });
        if state.install_error {
            return Err(HalError::Other("package install unavailable".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: Duration = Duration::from_secs(1);

    #[test]
    fn unscripted_program_is_missing() {
        let hal = FakeHal::new();
        let err = hal.command_output("blkid", &[], T).unwrap_err();
        assert!(matches!(err, HalError::CommandNotFound(_)));
    }

    #[test]
    fn scripted_outputs_replay_in_order() {
        let hal = FakeHal::new();
        hal.script_output("blkid", "first");
        hal.script_exit("blkid", 2, "boom");

        let first = hal.command_output("blkid", &[], T).unwrap();
        assert!(first.status.success());
        assert_eq!(String::from_utf8_lossy(&first.stdout), "first");

        let second = hal.command_output("blkid", &[], T).unwrap();
        assert_eq!(second.status.code(), Some(2));
        assert_eq!(String::from_utf8_lossy(&second.stderr), "boom");
    }

    #[test]
    fn operations_are_recorded() {
        let hal = FakeHal::new();
        hal.script_output("which", "/sbin/blkid\n");
        let _ = hal.command_output("which", &["blkid"], T);
        let _ = hal.install_package("e2fsprogs");

        assert_eq!(hal.operation_count(), 2);
        assert!(hal.has_operation(|op| matches!(
            op,
            Operation::Command { program, .. } if program == "which"
        )));
        assert!(hal.has_operation(|op| matches!(
            op,
            Operation::InstallPackage { package } if package == "e2fsprogs"
        )));
    }

    #[test]
    fn command_status_maps_scripted_exit() {
        let hal = FakeHal::new();
        hal.script_exit("mkfs", 1, "nope");
        let err = hal.command_status("mkfs", &[], T).unwrap_err();
        assert!(matches!(err, HalError::CommandFailed { code: Some(1), .. }));
    }
}
