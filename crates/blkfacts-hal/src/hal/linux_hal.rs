//! Linux HAL implementation using real system calls.

use super::{PackageOps, ProcessOps};
use crate::os_release;
use crate::{HalError, HalResult};
use log::{info, warn};
use std::env;
use std::fs;
use std::io::Read;
use std::process::{Command, Output, Stdio};
use std::time::Duration;
use wait_timeout::ChildExt;

/// Real HAL implementation for Linux systems.
#[derive(Debug, Clone, Default)]
pub struct LinuxHal;

impl LinuxHal {
    pub fn new() -> Self {
        Self
    }
}

/// Overrides the detected package manager binary (used by tests).
pub const PKG_BIN_ENV: &str = "BLKFACTS_PKG_BIN";

const INSTALL_TIMEOUT: Duration = Duration::from_secs(10 * 60);

fn map_command_err(program: &str, err: std::io::Error) -> HalError {
    if err.kind() == std::io::ErrorKind::NotFound {
        return HalError::CommandNotFound(program.to_string());
    }
    HalError::Io(err)
}

fn output_failed(program: &str, output: &Output) -> HalError {
    HalError::CommandFailed {
        program: program.to_string(),
        code: output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
}

fn output_with_timeout(program: &str, cmd: &mut Command, timeout: Duration) -> HalResult<Output> {
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    let mut child = cmd.spawn().map_err(|e| map_command_err(program, e))?;

    let mut stdout = child.stdout.take();
    let mut stderr = child.stderr.take();

    // Drain pipes concurrently to avoid deadlocks on large output.
    let stdout_handle = std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut out) = stdout.take() {
            let _ = out.read_to_end(&mut buf);
        }
        buf
    });
    let stderr_handle = std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut err) = stderr.take() {
            let _ = err.read_to_end(&mut buf);
        }
        buf
    });

    let status = match child.wait_timeout(timeout).map_err(HalError::Io)? {
        Some(status) => status,
        None => {
            let _ = child.kill();
            let _ = child.wait();
            let _ = stdout_handle.join();
            let _ = stderr_handle.join();
            return Err(HalError::CommandTimeout {
                program: program.to_string(),
                timeout_secs: timeout.as_secs(),
            });
        }
    };

    let stdout = stdout_handle.join().unwrap_or_default();
    let stderr = stderr_handle.join().unwrap_or_default();
    Ok(Output {
        status,
        stdout,
        stderr,
    })
}

fn status_with_timeout(program: &str, cmd: &mut Command, timeout: Duration) -> HalResult<()> {
    let output = output_with_timeout(program, cmd, timeout)?;
    if !output.status.success() {
        return Err(output_failed(program, &output));
    }
    Ok(())
}

impl ProcessOps for LinuxHal {
    fn command_output(&self, program: &str, args: &[&str], timeout: Duration) -> HalResult<Output> {
        let mut cmd = Command::new(program);
        cmd.args(args);
        output_with_timeout(program, &mut cmd, timeout)
    }

    fn command_status(&self, program: &str, args: &[&str], timeout: Duration) -> HalResult<()> {
        let mut cmd = Command::new(program);
        cmd.args(args);
        status_with_timeout(program, &mut cmd, timeout)
    }
}

/// Install arguments for the supported manager binaries.
///
/// The env override may point at an arbitrary binary name; anything we do not
/// recognize gets the dnf-style argument shape.
fn install_args<'a>(manager: &str, package: &'a str) -> Vec<&'a str> {
    let base = manager.rsplit('/').next().unwrap_or(manager);
    match base {
        "zypper" => vec!["--non-interactive", "install", package],
        _ => vec!["install", "-y", package],
    }
}

fn resolve_package_manager() -> HalResult<String> {
    if let Ok(bin) = env::var(PKG_BIN_ENV) {
        return Ok(bin);
    }
    let content = fs::read_to_string("/etc/os-release").unwrap_or_default();
    os_release::package_manager(&content)
        .map(|m| m.to_string())
        .ok_or_else(|| HalError::Other("no supported package manager detected".to_string()))
}

impl PackageOps for LinuxHal {
    fn install_package(&self, package: &str) -> HalResult<()> {
        let manager = resolve_package_manager()?;
        info!("installing package {package} via {manager}");

        let mut cmd = Command::new(&manager);
        cmd.args(install_args(&manager, package));
        let output = output_with_timeout(&manager, &mut cmd, INSTALL_TIMEOUT)?;
        if !output.status.success() {
            warn!(
                "package install command exited with status {}",
                output.status
            );
        }
        Ok(())
    }
}
