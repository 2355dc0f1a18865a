//! Tag and version string helpers

/// Placeholder substituted by the version in a tag format
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Render a tag name for a version, e.g. `v{version}` + `1.2.0` -> `v1.2.0`
pub fn format_tag(tag_format: &str, version: &str) -> String {
    tag_format.replace(VERSION_PLACEHOLDER, version)
}

/// Recover the version from a tag name produced by `tag_format`.
///
/// Returns `None` when the tag does not follow the format.
pub fn version_from_tag(tag_format: &str, tag: &str) -> Option<String> {
    let (prefix, suffix) = tag_format.split_once(VERSION_PLACEHOLDER)?;
    let version = tag.strip_prefix(prefix)?.strip_suffix(suffix)?;
    if version.is_empty() {
        None
    } else {
        Some(version.to_string())
    }
}

/// Strip npm-style range operators from a manifest version (`^1.2.0` -> `1.2.0`)
pub fn strip_range_operator(spec: &str) -> &str {
    spec.trim()
        .trim_start_matches(['^', '~', '=', '>', '<', 'v'])
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tag() {
        assert_eq!(format_tag("v{version}", "1.2.0"), "v1.2.0");
        assert_eq!(format_tag("core@{version}", "0.1.0"), "core@0.1.0");
    }

    #[test]
    fn test_version_from_tag() {
        assert_eq!(version_from_tag("v{version}", "v1.0.0"), Some("1.0.0".to_string()));
        assert_eq!(version_from_tag("v{version}", "1.0.0"), None);
        assert_eq!(
            version_from_tag("release-{version}-final", "release-2.0.0-final"),
            Some("2.0.0".to_string())
        );
        assert_eq!(version_from_tag("v{version}", "v"), None);
    }

    #[test]
    fn test_strip_range_operator() {
        assert_eq!(strip_range_operator("^1.2.0"), "1.2.0");
        assert_eq!(strip_range_operator("~0.15.3"), "0.15.3");
        assert_eq!(strip_range_operator(">=2.0.0"), "2.0.0");
        assert_eq!(strip_range_operator("1.0.0"), "1.0.0");
    }
}
