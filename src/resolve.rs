//! Selects the manifests belonging to a target and aggregates them into the
//! target's per-library ABI.

use crate::classify::ManifestInfo;
use crate::config::TargetTable;
use crate::error::AbiError;
use crate::parse::{parse_manifest, LibraryAbi};
use log::{debug, warn};
use std::collections::BTreeMap;

/// One target's ABI: library name -> symbol tables. BTreeMap keeps the
/// serialized key order sorted.
pub type TargetAbi = BTreeMap<String, LibraryAbi>;

/// Returns the classified manifests matching any of the target's configured
/// triples, in manifest-list order.
///
/// Two matched manifests resolving to the same library name mean the
/// triple-to-path mapping is ambiguous, which is fatal: silently keeping one
/// would make the output depend on traversal order.
pub fn select_manifests<'a>(
    table: &TargetTable,
    target: &str,
    manifests: &'a [ManifestInfo],
) -> Result<Vec<&'a ManifestInfo>, AbiError> {
    let triples = table.triples(target)?;

    let mut selected: Vec<&ManifestInfo> = Vec::new();

    for info in manifests {
        if !triples.iter().any(|triple| info.matches(triple)) {
            continue;
        }

        if let Some(existing) = selected.iter().find(|m| m.library == info.library) {
            return Err(AbiError::DuplicateLibrary {
                target: target.to_string(),
                library: info.library.clone(),
                first: existing.path.clone(),
                second: info.path.clone(),
            });
        }

        selected.push(info);
    }

    Ok(selected)
}

/// Resolves and parses the full ABI for one target.
///
/// An empty result is not fatal: targets with an empty configured triple
/// list are expected to produce nothing until their platform mapping is
/// filled in, and both cases are warned so a silently shrinking output is
/// noticed.
pub fn collect_target_abi(
    table: &TargetTable,
    target: &str,
    manifests: &[ManifestInfo],
) -> Result<TargetAbi, AbiError> {
    let selected = select_manifests(table, target, manifests)?;

    let mut abi = TargetAbi::new();

    for info in &selected {
        debug!(
            "target {}: library {} from {}",
            target,
            info.library,
            info.path.display()
        );
        abi.insert(info.library.clone(), parse_manifest(&info.path)?);
    }

    if abi.is_empty() {
        if table.triples(target)?.is_empty() {
            warn!("no platform triples defined for {target} yet");
        } else {
            warn!("no libraries found for {target}");
        }
    }

    Ok(abi)
}
