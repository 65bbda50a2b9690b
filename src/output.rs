//! Serializes per-target ABI records. Output formatting is a compatibility
//! contract: keys sorted at every level, 4-space indentation, no trailing
//! newline, so downstream consumers can diff files across runs.

use crate::error::AbiError;
use crate::resolve::TargetAbi;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Creates the destination directory (and parents) if absent. Re-running
/// against an existing directory is fine.
pub fn prepare_dest(dest: &Path) -> Result<(), AbiError> {
    #[cfg(unix)]
    {
        use std::fs::DirBuilder;
        use std::os::unix::fs::DirBuilderExt;

        DirBuilder::new().recursive(true).mode(0o775).create(dest)?;
    }

    #[cfg(not(unix))]
    std::fs::create_dir_all(dest)?;

    Ok(())
}

/// Writes `<target>.json` into `dest` and returns the written path.
pub fn write_target_abi(dest: &Path, target: &str, abi: &TargetAbi) -> Result<PathBuf, AbiError> {
    let path = dest.join(format!("{target}.json"));

    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);

    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    abi.serialize(&mut serializer)?;

    writer.flush()?;

    Ok(path)
}
