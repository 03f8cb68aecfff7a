//! Release assets for each supported OS / architecture pair.

use crate::SetupError;

/// Where the PDFium library lives for one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// Asset name in the pdfium-binaries release, e.g. `pdfium-linux-x64.tgz`.
    pub archive: &'static str,
    /// Path of the library inside the archive.
    pub member: &'static str,
    /// File name written into the cache directory.
    pub lib_name: &'static str,
}

const MAC: (&str, &str) = ("lib/libpdfium.dylib", "libpdfium.dylib");
const LINUX: (&str, &str) = ("lib/libpdfium.so", "libpdfium.so");
const WINDOWS: (&str, &str) = ("bin/pdfium.dll", "pdfium.dll");

/// `(os, arch, archive, (member, lib_name))`
const TABLE: &[(&str, &str, &str, (&str, &str))] = &[
    ("macos", "aarch64", "pdfium-mac-arm64.tgz", MAC),
    ("macos", "x86_64", "pdfium-mac-x64.tgz", MAC),
    ("linux", "x86_64", "pdfium-linux-x64.tgz", LINUX),
    ("linux", "aarch64", "pdfium-linux-arm64.tgz", LINUX),
    ("windows", "x86_64", "pdfium-win-x64.tgz", WINDOWS),
    ("windows", "aarch64", "pdfium-win-arm64.tgz", WINDOWS),
    ("windows", "x86", "pdfium-win-x86.tgz", WINDOWS),
];

/// Look up the asset for an explicit OS / architecture pair.
pub fn lookup(os: &str, arch: &str) -> Result<Platform, SetupError> {
    TABLE
        .iter()
        .find(|(o, a, _, _)| *o == os && *a == arch)
        .map(|&(_, _, archive, (member, lib_name))| Platform {
            archive,
            member,
            lib_name,
        })
        .ok_or_else(|| SetupError::UnsupportedPlatform {
            os: os.to_string(),
            arch: arch.to_string(),
        })
}

/// The asset for the running process.
pub fn current() -> Result<Platform, SetupError> {
    lookup(std::env::consts::OS, std::env::consts::ARCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linux_x64_uses_shared_object() {
        let p = lookup("linux", "x86_64").unwrap();
        assert_eq!(p.archive, "pdfium-linux-x64.tgz");
        assert_eq!(p.member, "lib/libpdfium.so");
        assert_eq!(p.lib_name, "libpdfium.so");
    }

    #[test]
    fn windows_library_is_under_bin() {
        let p = lookup("windows", "x86").unwrap();
        assert!(p.member.starts_with("bin/"));
    }

    #[test]
    fn unknown_pair_is_rejected() {
        let err = lookup("plan9", "mips").unwrap_err();
        assert!(err.to_string().contains("plan9/mips"));
    }

    #[test]
    fn every_member_ends_with_its_lib_name() {
        for (os, arch, _, _) in TABLE {
            let p = lookup(os, arch).unwrap();
            assert!(p.member.ends_with(p.lib_name), "{os}/{arch}");
        }
    }
}
