//! One fact-collection cycle.
//!
//! Locates and runs blkid, parses its output, and flattens the result into
//! facts. Parse failures become status facts so one bad cycle cannot take
//! down the wider fact-collection process; only the command being entirely
//! unavailable publishes nothing at all.

use crate::facts::{self, Fact, BASE_WEIGHT};
use crate::locate;
use crate::parse;
use blkfacts_hal::SystemHal;
use log::warn;
use std::path::Path;
use std::time::Duration;

const BLKID_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs blkid and returns its stdout split into lines, or `None` when the
/// run failed. Empty output is a successful run with zero devices.
fn run_blkid(hal: &dyn SystemHal, command: &Path) -> Option<Vec<String>> {
    let program = command.to_string_lossy();
    let output = match hal.command_output(&program, &[], BLKID_TIMEOUT) {
        Ok(output) => output,
        Err(err) => {
            warn!("error running {program}: {err}");
            return None;
        }
    };
    if !output.status.success() {
        warn!("{program} exited with status {}", output.status);
        return None;
    }
    let text = match String::from_utf8(output.stdout) {
        Ok(text) => text,
        Err(err) => {
            warn!("{program} produced non-UTF-8 output: {err}");
            return None;
        }
    };
    Some(text.lines().map(|line| line.to_string()).collect())
}

/// Collects the blkid facts for one cycle.
///
/// The returned facts are ready to commit to a store. An empty vec means no
/// usable blkid command exists on this host and the cycle published nothing.
pub fn collect(hal: &dyn SystemHal) -> Vec<Fact> {
    let Some(command) = locate::locate(hal) else {
        warn!("no usable {} command; publishing no facts", locate::BLKID_COMMAND);
        return Vec::new();
    };

    let Some(lines) = run_blkid(hal, &command) else {
        return vec![Fact::new(facts::CMD_FAILED, true, 0)];
    };

    match parse::parse(&lines) {
        Ok(devices) => {
            let mut collected = facts::flatten(&devices, BASE_WEIGHT);
            collected.push(Fact::new(facts::INFO_OK, true, 0));
            collected
        }
        Err(err) => {
            warn!("Error processing output from blkid: {err}");
            vec![
                Fact::new(facts::INFO_OK, false, 0),
                Fact::new(facts::INFO_ERR, err.to_string(), 0),
            ]
        }
    }
}
