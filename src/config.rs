//! Static table mapping glibc build configurations to the sysdeps platform
//! triples whose abilist manifests define their ABI.

use crate::error::AbiError;
use crate::platform::{Os, TripleSpec};
use std::collections::HashSet;

/// A named glibc build configuration and the triples it accepts, in match
/// priority order. An empty triple list means the target's platform mapping
/// has not been filled in yet; such targets produce an empty (warned) result.
#[derive(Debug, Clone, Copy)]
pub struct TargetSpec {
    pub name: &'static str,
    pub triples: &'static [TripleSpec],
}

const fn t(os: Os, arch: &'static str, subarch: &'static [&'static str]) -> TripleSpec {
    TripleSpec::new(os, arch, subarch)
}

use Os::{Mach, Unix};

/// glibc config -> (os, arch, subarch). Declared order is processing order.
static TARGETS: &[TargetSpec] = &[
    TargetSpec { name: "aarch64-linux-gnu", triples: &[t(Unix, "aarch64", &[])] },
    TargetSpec { name: "aarch64-linux-gnu-disable-multi-arch", triples: &[t(Unix, "aarch64", &[])] },
    TargetSpec { name: "aarch64_be-linux-gnu", triples: &[t(Unix, "aarch64", &[])] },
    TargetSpec { name: "alpha-linux-gnu", triples: &[t(Unix, "alpha", &[])] },
    TargetSpec { name: "arc-linux-gnu", triples: &[t(Unix, "arc", &[])] },
    TargetSpec { name: "arc-linux-gnuhf", triples: &[t(Unix, "arc", &[])] },
    TargetSpec { name: "arceb-linux-gnu", triples: &[t(Unix, "arc", &[])] },
    TargetSpec { name: "arm-linux-gnueabi", triples: &[t(Unix, "arm", &["le"])] },
    TargetSpec { name: "arm-linux-gnueabi-v4t", triples: &[t(Unix, "arm", &["le"])] },
    TargetSpec { name: "arm-linux-gnueabihf", triples: &[t(Unix, "arm", &["le"])] },
    TargetSpec { name: "arm-linux-gnueabihf-v7a", triples: &[t(Unix, "arm", &["le"])] },
    TargetSpec { name: "arm-linux-gnueabihf-v7a-disable-multi-arch", triples: &[t(Unix, "arm", &["le"])] },
    TargetSpec { name: "armeb-linux-gnueabi", triples: &[t(Unix, "arm", &["be"])] },
    TargetSpec { name: "armeb-linux-gnueabi-be8", triples: &[t(Unix, "arm", &["be"])] },
    TargetSpec { name: "armeb-linux-gnueabihf", triples: &[t(Unix, "arm", &["be"])] },
    TargetSpec { name: "armeb-linux-gnueabihf-be8", triples: &[t(Unix, "arm", &["be"])] },
    TargetSpec { name: "csky-linux-gnuabiv2", triples: &[t(Unix, "csky", &[])] },
    TargetSpec { name: "csky-linux-gnuabiv2-soft", triples: &[t(Unix, "csky", &[])] },
    TargetSpec { name: "hppa-linux-gnu", triples: &[t(Unix, "hppa", &[])] },
    TargetSpec { name: "i486-linux-gnu", triples: &[t(Unix, "x86_64", &[]), t(Unix, "x86_64", &["x32"])] },
    TargetSpec { name: "i586-linux-gnu", triples: &[t(Unix, "x86_64", &[]), t(Unix, "x86_64", &["x32"])] },
    TargetSpec { name: "i686-gnu", triples: &[t(Mach, "hurd", &[]), t(Mach, "hurd", &["i386"])] },
    TargetSpec { name: "i686-linux-gnu", triples: &[t(Unix, "x86_64", &[]), t(Unix, "x86_64", &["x32"])] },
    TargetSpec { name: "i686-linux-gnu-disable-multi-arch", triples: &[t(Unix, "x86_64", &[]), t(Unix, "x86_64", &["x32"])] },
    TargetSpec { name: "i686-linux-gnu-static-pie", triples: &[t(Unix, "x86_64", &[]), t(Unix, "x86_64", &["x32"])] },
    TargetSpec { name: "ia64-linux-gnu", triples: &[t(Unix, "ia64", &[])] },
    TargetSpec { name: "m68k-linux-gnu", triples: &[t(Unix, "m68k", &["m680x0"])] },
    TargetSpec { name: "m68k-linux-gnu-coldfire", triples: &[t(Unix, "m68k", &["coldfire"])] },
    TargetSpec { name: "m68k-linux-gnu-coldfire-soft", triples: &[t(Unix, "m68k", &["coldfire"])] },
    TargetSpec { name: "microblaze-linux-gnu", triples: &[t(Unix, "microblaze", &[]), t(Unix, "microblaze", &["be"])] },
    TargetSpec { name: "microblazeel-linux-gnu", triples: &[t(Unix, "microblaze", &[]), t(Unix, "microblaze", &["le"])] },
    TargetSpec { name: "mips-linux-gnu", triples: &[t(Unix, "mips", &["mips32"]), t(Unix, "mips", &["mips32", "fpu"])] },
    TargetSpec { name: "mips-linux-gnu-nan2008", triples: &[t(Unix, "mips", &["mips32"]), t(Unix, "mips", &["mips32", "fpu"])] },
    TargetSpec { name: "mips-linux-gnu-nan2008-soft", triples: &[t(Unix, "mips", &["mips32"]), t(Unix, "mips", &["mips32", "nofpu"])] },
    TargetSpec { name: "mips-linux-gnu-soft", triples: &[t(Unix, "mips", &["mips32"]), t(Unix, "mips", &["mips32", "nofpu"])] },
    // TODO define these
    TargetSpec { name: "mips64-linux-gnu-n32", triples: &[] },
    TargetSpec { name: "mips64-linux-gnu-n32-nan2008", triples: &[] },
    TargetSpec { name: "mips64-linux-gnu-n32-nan2008-soft", triples: &[] },
    TargetSpec { name: "mips64-linux-gnu-n32-soft", triples: &[] },
    TargetSpec { name: "mips64-linux-gnu-n64", triples: &[] },
    TargetSpec { name: "mips64-linux-gnu-n64-nan2008", triples: &[] },
    TargetSpec { name: "mips64-linux-gnu-n64-nan2008-soft", triples: &[] },
    TargetSpec { name: "mips64-linux-gnu-n64-soft", triples: &[] },
    TargetSpec { name: "mips64el-linux-gnu-n32", triples: &[] },
    TargetSpec { name: "mips64el-linux-gnu-n32-nan2008", triples: &[] },
    TargetSpec { name: "mips64el-linux-gnu-n32-nan2008-soft", triples: &[] },
    TargetSpec { name: "mips64el-linux-gnu-n32-soft", triples: &[] },
    TargetSpec { name: "mips64el-linux-gnu-n64", triples: &[] },
    TargetSpec { name: "mips64el-linux-gnu-n64-nan2008", triples: &[] },
    TargetSpec { name: "mips64el-linux-gnu-n64-nan2008-soft", triples: &[] },
    TargetSpec { name: "mips64el-linux-gnu-n64-soft", triples: &[] },
    TargetSpec { name: "mipsel-linux-gnu", triples: &[] },
    TargetSpec { name: "mipsel-linux-gnu-nan2008", triples: &[] },
    TargetSpec { name: "mipsel-linux-gnu-nan2008-soft", triples: &[] },
    TargetSpec { name: "mipsel-linux-gnu-soft", triples: &[] },
    TargetSpec { name: "mipsisa32r6el-linux-gnu", triples: &[] },
    TargetSpec { name: "mipsisa64r6el-linux-gnu-n32", triples: &[] },
    TargetSpec { name: "mipsisa64r6el-linux-gnu-n64", triples: &[] },
    TargetSpec { name: "nios2-linux-gnu", triples: &[t(Unix, "nios2", &[])] },
    TargetSpec { name: "powerpc-linux-gnu", triples: &[t(Unix, "powerpc", &["powerpc32"]), t(Unix, "powerpc", &["powerpc32", "fpu"])] },
    TargetSpec { name: "powerpc-linux-gnu-power4", triples: &[t(Unix, "powerpc", &["powerpc32"]), t(Unix, "powerpc", &["powerpc32", "fpu"])] },
    TargetSpec { name: "powerpc-linux-gnu-soft", triples: &[t(Unix, "powerpc", &["powerpc32"]), t(Unix, "powerpc", &["powerpc32", "nofpu"])] },
    TargetSpec { name: "powerpc64-linux-gnu", triples: &[t(Unix, "powerpc", &["powerpc64", "be"])] },
    TargetSpec { name: "powerpc64le-linux-gnu", triples: &[t(Unix, "powerpc", &["powerpc64", "le"])] },
    TargetSpec { name: "riscv32-linux-gnu-rv32imac-ilp32", triples: &[t(Unix, "riscv", &["rv32"])] },
    TargetSpec { name: "riscv32-linux-gnu-rv32imac-ilp32d", triples: &[t(Unix, "riscv", &["rv32"])] },
    TargetSpec { name: "riscv64-linux-gnu-rv64imac-lp64", triples: &[t(Unix, "riscv", &["rv64"])] },
    TargetSpec { name: "riscv64-linux-gnu-rv64imafdc-lp64", triples: &[t(Unix, "riscv", &["rv64"])] },
    TargetSpec { name: "riscv64-linux-gnu-rv64imafdc-lp64d", triples: &[t(Unix, "riscv", &["rv64"])] },
    TargetSpec { name: "s390-linux-gnu", triples: &[t(Unix, "s390", &[]), t(Unix, "s390", &["s390-32"])] },
    TargetSpec { name: "s390x-linux-gnu", triples: &[t(Unix, "s390", &[]), t(Unix, "s390", &["s390-64"])] },
    TargetSpec { name: "s390x-linux-gnu-O3", triples: &[t(Unix, "s390", &[]), t(Unix, "s390", &["s390-64"])] },
    TargetSpec { name: "sh3-linux-gnu", triples: &[t(Unix, "sh", &["le"])] },
    TargetSpec { name: "sh3eb-linux-gnu", triples: &[t(Unix, "sh", &["be"])] },
    TargetSpec { name: "sh4-linux-gnu", triples: &[t(Unix, "sh", &["le"])] },
    TargetSpec { name: "sh4-linux-gnu-soft", triples: &[t(Unix, "sh", &["le"])] },
    TargetSpec { name: "sh4eb-linux-gnu", triples: &[t(Unix, "sh", &["be"])] },
    TargetSpec { name: "sh4eb-linux-gnu-soft", triples: &[t(Unix, "sh", &["be"])] },
    TargetSpec { name: "sparc64-linux-gnu", triples: &[t(Unix, "sparc", &["sparc64"])] },
    TargetSpec { name: "sparc64-linux-gnu-disable-multi-arch", triples: &[t(Unix, "sparc", &["sparc64"])] },
    TargetSpec { name: "sparcv8-linux-gnu-leon3", triples: &[t(Unix, "sparc", &["sparc32"])] },
    TargetSpec { name: "sparcv9-linux-gnu", triples: &[t(Unix, "sparc", &["sparc32"])] },
    TargetSpec { name: "sparcv9-linux-gnu-disable-multi-arch", triples: &[t(Unix, "sparc", &["sparc32"])] },
    TargetSpec { name: "x86_64-linux-gnu", triples: &[t(Unix, "x86_64", &[]), t(Unix, "x86_64", &["64"])] },
    TargetSpec { name: "x86_64-linux-gnu-disable-multi-arch", triples: &[t(Unix, "x86_64", &[]), t(Unix, "x86_64", &["64"])] },
    TargetSpec { name: "x86_64-linux-gnu-static-pie", triples: &[t(Unix, "x86_64", &[]), t(Unix, "x86_64", &["64"])] },
    TargetSpec { name: "x86_64-linux-gnu-x32", triples: &[t(Unix, "x86_64", &[]), t(Unix, "x86_64", &["x32"])] },
    TargetSpec { name: "x86_64-linux-gnu-x32-static-pie", triples: &[t(Unix, "x86_64", &[]), t(Unix, "x86_64", &["x32"])] },
];

/// Validated, ordered target lookup. Built once at startup and handed to the
/// resolver explicitly so tests can substitute alternate tables.
#[derive(Debug, Clone)]
pub struct TargetTable {
    specs: Vec<TargetSpec>,
}

impl TargetTable {
    /// Wraps a list of target specs, rejecting duplicate target names. The
    /// OS axis needs no validation here: `Os` is a closed enum, so an
    /// unrecognized family cannot be expressed in the table at all.
    pub fn new(specs: &[TargetSpec]) -> Result<Self, AbiError> {
        let mut seen = HashSet::new();
        for spec in specs {
            if !seen.insert(spec.name) {
                return Err(AbiError::DuplicateTarget(spec.name.to_string()));
            }
        }

        Ok(Self {
            specs: specs.to_vec(),
        })
    }

    /// The compiled-in glibc target table.
    pub fn builtin() -> Result<Self, AbiError> {
        Self::new(TARGETS)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetSpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.specs.iter().any(|s| s.name == name)
    }

    /// Triples configured for a target. An unknown target name is an invalid
    /// input, never an empty result.
    pub fn triples(&self, name: &str) -> Result<&[TripleSpec], AbiError> {
        self.specs
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.triples)
            .ok_or_else(|| AbiError::UnknownTarget(name.to_string()))
    }
}
