//! blkid command location.
//!
//! Resolves the path to the blkid binary, attempting to install the package
//! that ships it when the first lookup comes back empty. A host without
//! blkid even after that is not an error; the cycle just publishes nothing.

use blkfacts_hal::SystemHal;
use log::{info, warn};
use std::path::PathBuf;
use std::time::Duration;

pub const BLKID_COMMAND: &str = "blkid";

/// Package expected to ship the blkid binary.
pub const BLKID_PACKAGE: &str = "e2fsprogs";

const WHICH_TIMEOUT: Duration = Duration::from_secs(10);

/// Looks up `name` on PATH via `which`. Empty output means not found.
fn which(hal: &dyn SystemHal, name: &str) -> Option<PathBuf> {
    let output = match hal.command_output("which", &[name], WHICH_TIMEOUT) {
        Ok(output) => output,
        Err(err) => {
            warn!("which {name} failed: {err}");
            return None;
        }
    };
    if !output.status.success() {
        return None;
    }
    let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

/// Resolves the blkid command, installing its package if necessary.
pub fn locate(hal: &dyn SystemHal) -> Option<PathBuf> {
    if let Some(path) = which(hal, BLKID_COMMAND) {
        return Some(path);
    }

    info!(
        "Could not find {BLKID_COMMAND} command. Attempting to install pkg {BLKID_PACKAGE} to get it."
    );
    if let Err(err) = hal.install_package(BLKID_PACKAGE) {
        warn!("install of {BLKID_PACKAGE} failed: {err}");
    }

    which(hal, BLKID_COMMAND)
}
