//! Maps a manifest file's path, relative to the source root, to the
//! platform metadata used for target matching. The sysdeps layout
//! convention is trusted absolutely: any deviation is a structural error,
//! never coerced into a best-effort classification.

use crate::error::AbiError;
use crate::locate::MANIFEST_SUFFIX;
use crate::platform::{Os, TripleSpec};
use std::path::{Path, PathBuf};

/// Root marker segment of every manifest path.
const ROOT_SEGMENT: &str = "sysdeps";

/// Platform metadata derived from one manifest file's path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestInfo {
    /// Absolute path to the manifest, kept for later parsing and for
    /// diagnostics.
    pub path: PathBuf,
    pub os: Os,
    /// `None` only for `generic` manifests, which carry no architecture
    /// axis and therefore never match a configured triple.
    pub arch: Option<String>,
    /// Ordered qualifier segments; order is significant.
    pub subarch: Vec<String>,
    /// File stem with the manifest suffix stripped.
    pub library: String,
}

impl ManifestInfo {
    /// Whether this manifest's platform matches a configured triple.
    /// Subarch comparison is an exact ordered-sequence match, not a set
    /// comparison.
    pub fn matches(&self, triple: &TripleSpec) -> bool {
        self.os == triple.os
            && self.arch.as_deref() == Some(triple.arch)
            && self.subarch.iter().map(String::as_str).eq(triple.subarch.iter().copied())
    }
}

/// Classifies a manifest path found beneath `root`.
pub fn classify(root: &Path, manifest: &Path) -> Result<ManifestInfo, AbiError> {
    let rel = manifest
        .strip_prefix(root)
        .map_err(|_| AbiError::path_shape(manifest, format!("not beneath {}", root.display())))?;

    let mut segments = Vec::new();
    for component in rel.components() {
        let segment = component
            .as_os_str()
            .to_str()
            .ok_or_else(|| AbiError::NonUtf8Path(manifest.to_path_buf()))?;
        segments.push(segment);
    }

    if segments.first() != Some(&ROOT_SEGMENT) {
        return Err(AbiError::path_shape(
            manifest,
            format!("first segment is not {ROOT_SEGMENT}"),
        ));
    }

    let os_segment = segments
        .get(1)
        .ok_or_else(|| AbiError::path_shape(manifest, "missing OS family segment"))?;
    let os = Os::from_segment(os_segment).ok_or_else(|| {
        AbiError::path_shape(manifest, format!("unrecognized OS family {os_segment}"))
    })?;

    let (arch, subarch) = match os {
        Os::Mach => {
            if segments.get(2) != Some(&"hurd") {
                return Err(AbiError::path_shape(manifest, "mach path missing hurd segment"));
            }
            if segments.len() != 5 {
                return Err(AbiError::path_shape(
                    manifest,
                    format!("mach path has {} segments, expected 5", segments.len()),
                ));
            }
            (Some(segments[3].to_string()), Vec::new())
        }
        Os::Unix => {
            if segments.get(2) != Some(&"sysv") || segments.get(3) != Some(&"linux") {
                return Err(AbiError::path_shape(manifest, "unix path missing sysv/linux segments"));
            }
            if segments.len() < 6 {
                return Err(AbiError::path_shape(
                    manifest,
                    format!("unix path has {} segments, expected at least 6", segments.len()),
                ));
            }

            let arch = segments[4].to_string();

            // Directory segments between the architecture and the file name
            // qualify the ABI further (endianness, FPU variant, ...).
            let subarch = if segments.len() > 6 {
                segments[5..segments.len() - 1]
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            } else {
                Vec::new()
            };

            (Some(arch), subarch)
        }
        Os::Generic => (None, Vec::new()),
    };

    let file_name = segments
        .last()
        .ok_or_else(|| AbiError::path_shape(manifest, "empty relative path"))?;
    let library = file_name
        .strip_suffix(MANIFEST_SUFFIX)
        .ok_or_else(|| {
            AbiError::path_shape(manifest, format!("file name does not end in {MANIFEST_SUFFIX}"))
        })?
        .to_string();

    Ok(ManifestInfo {
        path: manifest.to_path_buf(),
        os,
        arch,
        subarch,
        library,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_rel(rel: &str) -> Result<ManifestInfo, AbiError> {
        classify(Path::new("/src"), &Path::new("/src").join(rel))
    }

    #[test]
    fn test_unix_plain_arch() {
        let info = classify_rel("sysdeps/unix/sysv/linux/x86_64/libc.abilist").unwrap();
        assert_eq!(info.os, Os::Unix);
        assert_eq!(info.arch.as_deref(), Some("x86_64"));
        assert!(info.subarch.is_empty());
        assert_eq!(info.library, "libc");
    }

    #[test]
    fn test_unix_subarch_qualifiers() {
        let info = classify_rel("sysdeps/unix/sysv/linux/arm/le/libm.abilist").unwrap();
        assert_eq!(info.arch.as_deref(), Some("arm"));
        assert_eq!(info.subarch, vec!["le".to_string()]);
        assert_eq!(info.library, "libm");

        let info = classify_rel("sysdeps/unix/sysv/linux/mips/mips32/fpu/libc.abilist").unwrap();
        assert_eq!(info.subarch, vec!["mips32".to_string(), "fpu".to_string()]);
    }

    #[test]
    fn test_mach_hurd() {
        let info = classify_rel("sysdeps/mach/hurd/i386/libc.abilist").unwrap();
        assert_eq!(info.os, Os::Mach);
        assert_eq!(info.arch.as_deref(), Some("i386"));
        assert!(info.subarch.is_empty());
    }

    #[test]
    fn test_generic_accepted_without_arch() {
        let info = classify_rel("sysdeps/generic/libc.abilist").unwrap();
        assert_eq!(info.os, Os::Generic);
        assert_eq!(info.arch, None);
        assert_eq!(info.library, "libc");
    }

    #[test]
    fn test_structural_violations_are_fatal() {
        // Wrong root marker.
        assert!(classify_rel("ports/unix/sysv/linux/x86_64/libc.abilist").is_err());
        // Unknown OS family.
        assert!(classify_rel("sysdeps/windows/x86_64/libc.abilist").is_err());
        // mach without hurd.
        assert!(classify_rel("sysdeps/mach/i386/libc.abilist").is_err());
        // mach with too many segments.
        assert!(classify_rel("sysdeps/mach/hurd/i386/extra/libc.abilist").is_err());
        // unix without sysv/linux.
        assert!(classify_rel("sysdeps/unix/bsd/x86_64/libc.abilist").is_err());
        // unix with no architecture segment.
        assert!(classify_rel("sysdeps/unix/sysv/linux/libc.abilist").is_err());
    }

    #[test]
    fn test_matches_requires_exact_ordered_subarch() {
        let info = classify_rel("sysdeps/unix/sysv/linux/arm/le/libc.abilist").unwrap();

        assert!(info.matches(&TripleSpec::new(Os::Unix, "arm", &["le"])));
        assert!(!info.matches(&TripleSpec::new(Os::Unix, "arm", &[])));
        assert!(!info.matches(&TripleSpec::new(Os::Unix, "arm", &["be"])));
        assert!(!info.matches(&TripleSpec::new(Os::Mach, "arm", &["le"])));

        let info = classify_rel("sysdeps/unix/sysv/linux/mips/mips32/fpu/libc.abilist").unwrap();
        assert!(info.matches(&TripleSpec::new(Os::Unix, "mips", &["mips32", "fpu"])));
        // Same segments, wrong order.
        assert!(!info.matches(&TripleSpec::new(Os::Unix, "mips", &["fpu", "mips32"])));
    }

    #[test]
    fn test_generic_never_matches() {
        let info = classify_rel("sysdeps/generic/libc.abilist").unwrap();
        assert!(!info.matches(&TripleSpec::new(Os::Generic, "x86_64", &[])));
    }
}
