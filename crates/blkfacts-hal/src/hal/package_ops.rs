//! Package installation seam.

use crate::HalResult;

/// Package manager operations trait.
///
/// Installs are best-effort: a manager that runs but reports a nonzero exit
/// is logged and tolerated, since the caller re-probes for the binary anyway.
pub trait PackageOps {
    fn install_package(&self, package: &str) -> HalResult<()>;
}
