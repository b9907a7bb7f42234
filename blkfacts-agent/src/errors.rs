use thiserror::Error;

/// Failures while parsing blkid output. Any one of these aborts the whole
/// parse; there is no partial success.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("problem parsing blkid output: could not get device from line '{line}'")]
    MissingSeparator { line: String },

    #[error("problem parsing blkid output: for device {dev}, could not get a key for value '{value}'")]
    EmptyKey { dev: String, value: String },

    #[error(
        "blkid info key conflict: output for device {dev} has multiple instances of key '{key}' \
         with values '{value}' and '{existing}'"
    )]
    DuplicateKey {
        dev: String,
        key: String,
        value: String,
        existing: String,
    },
}

/// Failures while rebuilding device records from the flat fact store.
/// These propagate to the caller; there is no recovery or default.
#[derive(Error, Debug)]
pub enum AssembleError {
    #[error("cannot get blkid info because the collector reported failure (info_ok is false)")]
    PluginFailed,

    #[error("cannot get blkid info because the '{0}' fact is not defined")]
    MissingFact(String),

    #[error("cannot get blkid info because dev_count has non-numeric value '{0}'")]
    BadDeviceCount(String),
}
