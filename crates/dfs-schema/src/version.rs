//! Document version helpers.
//!
//! The published document carries a `MAJOR.MINOR.PATCH` version. By default
//! it is this package's own version, cut to its first three numeric parts.

use crate::error::SchemaError;

fn is_version_triple(version: &str) -> bool {
    let parts: Vec<&str> = version.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
}

/// Cut a version string to its first three dot-separated parts, keeping
/// only the leading digits of each (`1.4.2.dev3` becomes `1.4.2`,
/// `0.3.0-beta` becomes `0.3.0`). Missing parts become `0`.
pub fn truncate_version(version: &str) -> String {
    let mut parts = version.split('.').map(|part| {
        let digits: String = part.chars().take_while(char::is_ascii_digit).collect();
        if digits.is_empty() {
            "0".to_string()
        } else {
            digits
        }
    });
    let mut out = Vec::with_capacity(3);
    for _ in 0..3 {
        out.push(parts.next().unwrap_or_else(|| "0".to_string()));
    }
    out.join(".")
}

/// Default document version: the package version, truncated.
pub fn package_version() -> String {
    truncate_version(env!("CARGO_PKG_VERSION"))
}

/// Accept an explicit version override only if it is `MAJOR.MINOR.PATCH`.
pub fn validate_version(version: &str) -> Result<String, SchemaError> {
    if is_version_triple(version) {
        Ok(version.to_string())
    } else {
        Err(SchemaError::InvalidVersion {
            version: version.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn truncation() {
        assert_eq!(truncate_version("1.4.2"), "1.4.2");
        assert_eq!(truncate_version("1.4.2.dev3"), "1.4.2");
        assert_eq!(truncate_version("0.3.0-beta.1"), "0.3.0");
        assert_eq!(truncate_version("2"), "2.0.0");
    }

    #[test]
    fn package_version_is_valid() {
        let version = package_version();
        assert_eq!(validate_version(&version).unwrap(), version);
    }

    #[test]
    fn overrides_must_be_semver_triples() {
        assert!(validate_version("10.0.7").is_ok());
        for bad in ["1.2", "1.2.3.4", "v1.2.3", "1.2.x", ""] {
            assert!(
                matches!(validate_version(bad), Err(SchemaError::InvalidVersion { .. })),
                "{bad}"
            );
        }
    }

    proptest! {
        #[test]
        fn truncated_versions_always_validate(input in "[0-9a-z.+-]{0,16}") {
            let version = truncate_version(&input);
            prop_assert!(validate_version(&version).is_ok(), "{input:?} -> {version:?}");
        }
    }
}
