//! Parsing helpers for `/etc/os-release`.
//!
//! Used to pick the package manager for the blkid install fallback.

fn strip_value(raw: &str) -> String {
    raw.trim().trim_matches('"').to_lowercase()
}

fn parse_os_id_fallback(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        line.strip_prefix("NAME=")
            .map(|value| strip_value(value))
    })
}

/// Parses `os-release` content and returns the distro `ID` plus `ID_LIKE` entries.
///
/// All values are lowercased. `ID_LIKE` may list several space-separated ids.
pub fn parse_os_ids(content: &str) -> Vec<String> {
    let mut ids = Vec::new();

    for line in content.lines() {
        if let Some(value) = line.strip_prefix("ID=") {
            ids.insert(0, strip_value(value));
        } else if let Some(value) = line.strip_prefix("ID_LIKE=") {
            let like = strip_value(value);
            ids.extend(like.split_whitespace().map(|s| s.to_string()));
        }
    }

    if ids.is_empty() {
        if let Some(name) = parse_os_id_fallback(content) {
            ids.push(name);
        }
    }
    ids
}

/// Maps os-release ids to the package manager binary for this host.
///
/// Returns `None` when no id matches a manager we know how to drive.
pub fn package_manager(content: &str) -> Option<&'static str> {
    for id in parse_os_ids(content) {
        let manager = match id.as_str() {
            "fedora" | "rhel" | "centos" | "rocky" | "almalinux" => Some("dnf"),
            "debian" | "ubuntu" => Some("apt-get"),
            "opensuse" | "suse" | "opensuse-leap" | "opensuse-tumbleweed" => Some("zypper"),
            _ => None,
        };
        if manager.is_some() {
            return manager;
        }
    }
    None
}
