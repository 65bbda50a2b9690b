//! Parses one abilist manifest into its per-library symbol tables.

use crate::error::AbiError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// An exported function with its symbol-version tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSymbol {
    pub version: String,
}

/// An exported data object. The address is the manifest's raw token, kept
/// verbatim rather than interpreted numerically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSymbol {
    pub address: String,
    pub version: String,
}

/// Symbol tables contributed by one manifest. Functions and data are
/// disjoint mappings; cross-collisions between them are not validated.
///
/// Field declaration order is alphabetical on purpose: serialized output
/// must have keys sorted at every level, and serde emits struct fields in
/// declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryAbi {
    pub data: BTreeMap<String, DataSymbol>,
    pub functions: BTreeMap<String, FunctionSymbol>,
}

impl LibraryAbi {
    pub fn symbol_count(&self) -> usize {
        self.functions.len() + self.data.len()
    }
}

/// Parses a manifest file.
///
/// Grammar: one record per line, whitespace-separated fields
/// `<version> <symbol> <type> [<address>]` where type `F` is a function and
/// type `D` is a data object carrying an address. Anything else signals an
/// unrecognized manifest dialect and is fatal, reported with the file path
/// and the raw fields.
pub fn parse_manifest(path: &Path) -> Result<LibraryAbi, AbiError> {
    let text = fs::read_to_string(path)?;
    parse_manifest_text(path, &text)
}

pub fn parse_manifest_text(path: &Path, text: &str) -> Result<LibraryAbi, AbiError> {
    if !text.is_ascii() {
        return Err(AbiError::NonAsciiManifest(path.to_path_buf()));
    }

    let mut abi = LibraryAbi::default();

    for line in text.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();

        let owned_fields = || fields.iter().map(|f| f.to_string()).collect::<Vec<_>>();

        if fields.len() < 3 {
            return Err(AbiError::MalformedRecord {
                path: path.to_path_buf(),
                fields: owned_fields(),
            });
        }

        let (version, symbol, kind) = (fields[0], fields[1], fields[2]);

        match kind {
            "F" => {
                abi.functions.insert(
                    symbol.to_string(),
                    FunctionSymbol {
                        version: version.to_string(),
                    },
                );
            }
            "D" => {
                let address = fields.get(3).ok_or_else(|| AbiError::MalformedRecord {
                    path: path.to_path_buf(),
                    fields: owned_fields(),
                })?;

                abi.data.insert(
                    symbol.to_string(),
                    DataSymbol {
                        address: address.to_string(),
                        version: version.to_string(),
                    },
                );
            }
            _ => {
                return Err(AbiError::UnhandledSymbolType {
                    path: path.to_path_buf(),
                    fields: owned_fields(),
                })
            }
        }
    }

    Ok(abi)
}
