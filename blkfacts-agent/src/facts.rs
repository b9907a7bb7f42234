//! Fact names, values, and the flattening step.
//!
//! The fact store only holds scalars, so each device record is projected
//! into independently-named facts: a device count, one tags-list fact per
//! device, and one fact per (device, tag). Renaming any of these is a
//! breaking change for consumers of the store.

use crate::escape;
use crate::parse::DeviceRecord;
use serde::Serialize;
use std::fmt;

/// True when running the command produced no usable output.
pub const CMD_FAILED: &str = "cmd_failed";
/// True when parsing completed without error.
pub const INFO_OK: &str = "info_ok";
/// Parse error detail; only present when parsing failed.
pub const INFO_ERR: &str = "info_err";
/// Number of devices in this cycle.
pub const DEV_COUNT: &str = "dev_count";

/// Base weight for the device facts of one collection cycle. High enough to
/// take precedence, with per-device offsets keeping the printout readable.
pub const BASE_WEIGHT: i64 = 200;

/// Name of the tags-list fact for device `index` (1-based).
pub fn dev_tags_name(index: usize) -> String {
    format!("dev_{index}_tags")
}

/// Name of the value fact for `key` on device `index` (1-based).
pub fn dev_tag_name(index: usize, key: &str) -> String {
    format!("dev_{index}_tag_{key}")
}

/// A scalar fact value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FactValue {
    Bool(bool),
    Int(u64),
    Str(String),
}

impl FactValue {
    /// Only an explicit `false` is falsy; every string and integer counts
    /// as truthy, including the empty string.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, FactValue::Bool(false))
    }
}

impl fmt::Display for FactValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactValue::Bool(b) => write!(f, "{b}"),
            FactValue::Int(n) => write!(f, "{n}"),
            FactValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for FactValue {
    fn from(value: bool) -> Self {
        FactValue::Bool(value)
    }
}

impl From<u64> for FactValue {
    fn from(value: u64) -> Self {
        FactValue::Int(value)
    }
}

impl From<String> for FactValue {
    fn from(value: String) -> Self {
        FactValue::Str(value)
    }
}

impl From<&str> for FactValue {
    fn from(value: &str) -> Self {
        FactValue::Str(value.to_string())
    }
}

/// A named fact ready to commit to a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fact {
    pub name: String,
    pub value: FactValue,
    pub weight: i64,
}

impl Fact {
    pub fn new(name: impl Into<String>, value: impl Into<FactValue>, weight: i64) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            weight,
        }
    }
}

/// Projects parsed device records into flat scalar facts.
///
/// The device count carries `base_weight`; the facts of device `i` carry
/// `base_weight - i`, so later devices sort lower. The tags fact lists the
/// record's keys sorted ascending, escaped and joined with `:`.
pub fn flatten(devices: &[DeviceRecord], base_weight: i64) -> Vec<Fact> {
    let mut facts = vec![Fact::new(DEV_COUNT, devices.len() as u64, base_weight)];

    for (idx, record) in devices.iter().enumerate() {
        let index = idx + 1;
        let weight = base_weight - index as i64;

        for (key, value) in record.iter() {
            facts.push(Fact::new(dev_tag_name(index, key), value, weight));
        }
        facts.push(Fact::new(dev_tags_name(index), escape::encode_tags(record.keys()), weight));
    }

    facts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn devices(input: &[&str]) -> Vec<DeviceRecord> {
        let lines: Vec<String> = input.iter().map(|l| l.to_string()).collect();
        parse::parse(&lines).unwrap()
    }

    fn find<'a>(facts: &'a [Fact], name: &str) -> &'a Fact {
        facts
            .iter()
            .find(|f| f.name == name)
            .unwrap_or_else(|| panic!("fact {name} not produced"))
    }

    #[test]
    fn flattens_the_worked_example() {
        let devs = devices(&[
            "/dev/sdb1: LABEL=\"disk1\" TYPE=\"ext3\" UUID=\"f60e610f-7e73-4824-b366-592d9b803d50\"",
        ]);
        let facts = flatten(&devs, BASE_WEIGHT);

        assert_eq!(find(&facts, DEV_COUNT).value, FactValue::Int(1));
        assert_eq!(
            find(&facts, "dev_1_tags").value,
            FactValue::Str("dev:label:type:uuid".to_string())
        );
        assert_eq!(
            find(&facts, "dev_1_tag_dev").value,
            FactValue::Str("/dev/sdb1".to_string())
        );
        assert_eq!(
            find(&facts, "dev_1_tag_label").value,
            FactValue::Str("disk1".to_string())
        );
        assert_eq!(
            find(&facts, "dev_1_tag_uuid").value,
            FactValue::Str("f60e610f-7e73-4824-b366-592d9b803d50".to_string())
        );
        // dev_count + 4 tag values + 1 tags list
        assert_eq!(facts.len(), 6);
    }

    #[test]
    fn weights_step_down_per_device() {
        let devs = devices(&[
            "/dev/sda1: TYPE=\"ext4\"",
            "/dev/sdb1: TYPE=\"xfs\"",
        ]);
        let facts = flatten(&devs, BASE_WEIGHT);

        assert_eq!(find(&facts, DEV_COUNT).weight, BASE_WEIGHT);
        assert_eq!(find(&facts, "dev_1_tags").weight, BASE_WEIGHT - 1);
        assert_eq!(find(&facts, "dev_1_tag_type").weight, BASE_WEIGHT - 1);
        assert_eq!(find(&facts, "dev_2_tags").weight, BASE_WEIGHT - 2);
        assert_eq!(find(&facts, "dev_2_tag_dev").weight, BASE_WEIGHT - 2);
    }

    #[test]
    fn empty_set_flattens_to_count_zero() {
        let facts = flatten(&[], BASE_WEIGHT);
        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].name, DEV_COUNT);
        assert_eq!(facts[0].value, FactValue::Int(0));
    }

    #[test]
    fn tags_list_escapes_awkward_keys() {
        let devs = devices(&["/dev/sda1: X:Y=\"v\""]);
        let facts = flatten(&devs, BASE_WEIGHT);
        assert_eq!(
            find(&facts, "dev_1_tags").value,
            FactValue::Str("dev:x\\:y".to_string())
        );
    }

    #[test]
    fn truthiness_matches_store_semantics() {
        assert!(FactValue::Bool(true).is_truthy());
        assert!(!FactValue::Bool(false).is_truthy());
        assert!(FactValue::Str(String::new()).is_truthy());
        assert!(FactValue::Int(0).is_truthy());
    }
}
