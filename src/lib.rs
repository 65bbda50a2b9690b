//! Extracts machine-readable glibc ABI descriptions from a sysdeps tree of
//! abilist symbol-version manifests, one JSON record per build target.

pub mod classify;
pub mod config;
pub mod error;
pub mod locate;
pub mod output;
pub mod parse;
pub mod platform;
pub mod resolve;

pub use classify::{classify, ManifestInfo};
pub use config::{TargetSpec, TargetTable};
pub use error::AbiError;
pub use locate::{find_manifests, MANIFEST_SUFFIX};
pub use output::{prepare_dest, write_target_abi};
pub use parse::{parse_manifest, DataSymbol, FunctionSymbol, LibraryAbi};
pub use platform::{Os, TripleSpec};
pub use resolve::{collect_target_abi, select_manifests, TargetAbi};

use std::path::Path;

/// Locates and classifies every manifest beneath `source`. Computed once per
/// run and shared read-only across targets.
pub fn classified_manifests(source: &Path) -> Result<Vec<ManifestInfo>, AbiError> {
    find_manifests(source)?
        .iter()
        .map(|path| classify(source, path))
        .collect()
}
