use std::fmt;

/// OS family axis of a platform triple. Closed set: adding a fourth family
/// is a compile-visible change everywhere this is matched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Generic,
    Mach,
    Unix,
}

impl Os {
    /// Maps a sysdeps path segment to an OS family.
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "generic" => Some(Os::Generic),
            "mach" => Some(Os::Mach),
            "unix" => Some(Os::Unix),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Os::Generic => "generic",
            Os::Mach => "mach",
            Os::Unix => "unix",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (os, arch, subarch) combination a target accepts. Subarch order is
/// significant: it mirrors path-segment order and must match exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripleSpec {
    pub os: Os,
    pub arch: &'static str,
    pub subarch: &'static [&'static str],
}

impl TripleSpec {
    pub const fn new(os: Os, arch: &'static str, subarch: &'static [&'static str]) -> Self {
        Self { os, arch, subarch }
    }
}

impl fmt::Display for TripleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {:?})", self.os, self.arch, self.subarch)
    }
}
