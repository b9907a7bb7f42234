//! Reassembly of device records from the flat fact store.
//!
//! The inverse of flattening: reads the status facts, the device count, and
//! per device the tags list plus each tag value, and rebuilds the ordered
//! record sequence. Missing or malformed facts are hard failures; nothing
//! is defaulted.

use crate::errors::AssembleError;
use crate::escape;
use crate::facts::{self, FactValue};
use crate::parse::DeviceRecord;
use crate::store::FactLookup;

fn required<'a>(store: &'a dyn FactLookup, name: &str) -> Result<&'a FactValue, AssembleError> {
    store
        .fact(name)
        .ok_or_else(|| AssembleError::MissingFact(name.to_string()))
}

fn device_count(value: &FactValue) -> Result<usize, AssembleError> {
    match value {
        FactValue::Int(n) => usize::try_from(*n)
            .map_err(|_| AssembleError::BadDeviceCount(value.to_string())),
        FactValue::Str(s) => s
            .trim()
            .parse::<usize>()
            .map_err(|_| AssembleError::BadDeviceCount(s.clone())),
        FactValue::Bool(_) => Err(AssembleError::BadDeviceCount(value.to_string())),
    }
}

/// Rebuilds the ordered device records published by a collection cycle.
pub fn assemble(store: &dyn FactLookup) -> Result<Vec<DeviceRecord>, AssembleError> {
    if !required(store, facts::INFO_OK)?.is_truthy() {
        return Err(AssembleError::PluginFailed);
    }

    let count = device_count(required(store, facts::DEV_COUNT)?)?;

    let mut devices = Vec::with_capacity(count);
    for index in 1..=count {
        let tags_name = facts::dev_tags_name(index);
        let joined = required(store, &tags_name)?.to_string();

        let mut record = DeviceRecord::default();
        for key in escape::decode_tags(&joined) {
            let name = facts::dev_tag_name(index, &key);
            let value = required(store, &name)?;
            record.insert(key, value.to_string());
        }
        devices.push(record);
    }

    Ok(devices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::Fact;
    use crate::store::FactStore;

    fn store_with(facts: Vec<Fact>) -> FactStore {
        let mut store = FactStore::new();
        store.commit(facts);
        store
    }

    #[test]
    fn missing_info_ok_fails() {
        let store = FactStore::new();
        let err = assemble(&store).unwrap_err();
        match err {
            AssembleError::MissingFact(name) => assert_eq!(name, "info_ok"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn falsy_info_ok_fails() {
        let store = store_with(vec![Fact::new(facts::INFO_OK, false, 0)]);
        assert!(matches!(
            assemble(&store).unwrap_err(),
            AssembleError::PluginFailed
        ));
    }

    #[test]
    fn missing_dev_count_fails() {
        let store = store_with(vec![Fact::new(facts::INFO_OK, true, 0)]);
        match assemble(&store).unwrap_err() {
            AssembleError::MissingFact(name) => assert_eq!(name, "dev_count"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_dev_count_fails() {
        let store = store_with(vec![
            Fact::new(facts::INFO_OK, true, 0),
            Fact::new(facts::DEV_COUNT, "lots", 200),
        ]);
        assert!(matches!(
            assemble(&store).unwrap_err(),
            AssembleError::BadDeviceCount(_)
        ));
    }

    #[test]
    fn zero_devices_is_valid() {
        let store = store_with(vec![
            Fact::new(facts::INFO_OK, true, 0),
            Fact::new(facts::DEV_COUNT, 0u64, 200),
        ]);
        assert_eq!(assemble(&store).unwrap(), Vec::new());
    }

    #[test]
    fn dev_count_as_string_is_accepted() {
        let store = store_with(vec![
            Fact::new(facts::INFO_OK, true, 0),
            Fact::new(facts::DEV_COUNT, "0", 200),
        ]);
        assert!(assemble(&store).unwrap().is_empty());
    }

    #[test]
    fn missing_tags_fact_is_named_in_the_error() {
        let store = store_with(vec![
            Fact::new(facts::INFO_OK, true, 0),
            Fact::new(facts::DEV_COUNT, 1u64, 200),
        ]);
        match assemble(&store).unwrap_err() {
            AssembleError::MissingFact(name) => assert_eq!(name, "dev_1_tags"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_tag_value_fact_is_named_in_the_error() {
        let store = store_with(vec![
            Fact::new(facts::INFO_OK, true, 0),
            Fact::new(facts::DEV_COUNT, 1u64, 200),
            Fact::new("dev_1_tags", "dev:type", 199),
            Fact::new("dev_1_tag_dev", "/dev/sda1", 199),
        ]);
        match assemble(&store).unwrap_err() {
            AssembleError::MissingFact(name) => assert_eq!(name, "dev_1_tag_type"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rebuilds_records_in_index_order() {
        let store = store_with(vec![
            Fact::new(facts::INFO_OK, true, 0),
            Fact::new(facts::DEV_COUNT, 2u64, 200),
            Fact::new("dev_1_tags", "dev:type", 199),
            Fact::new("dev_1_tag_dev", "/dev/sda1", 199),
            Fact::new("dev_1_tag_type", "ext4", 199),
            Fact::new("dev_2_tags", "dev:uuid", 198),
            Fact::new("dev_2_tag_dev", "/dev/sdb1", 198),
            Fact::new("dev_2_tag_uuid", "abc-123", 198),
        ]);
        let devices = assemble(&store).unwrap();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].dev(), Some("/dev/sda1"));
        assert_eq!(devices[0].get("type"), Some("ext4"));
        assert_eq!(devices[1].dev(), Some("/dev/sdb1"));
        assert_eq!(devices[1].get("uuid"), Some("abc-123"));
    }

    #[test]
    fn escaped_tags_resolve_to_the_right_fact_names() {
        let store = store_with(vec![
            Fact::new(facts::INFO_OK, true, 0),
            Fact::new(facts::DEV_COUNT, 1u64, 200),
            Fact::new("dev_1_tags", "dev:x\\:y", 199),
            Fact::new("dev_1_tag_dev", "/dev/sda1", 199),
            Fact::new("dev_1_tag_x:y", "v", 199),
        ]);
        let devices = assemble(&store).unwrap();
        assert_eq!(devices[0].get("x:y"), Some("v"));
    }
}
