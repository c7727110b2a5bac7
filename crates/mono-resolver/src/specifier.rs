//! Import specifier classification
//!
//! Only a specifier that names a package by its bare (or scoped) name is
//! eligible for rewriting. Sub-paths, relative and absolute paths, and
//! protocol-qualified specifiers always go to the host resolver.

use std::fmt;

/// Shape of an import specifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecifierKind {
    /// Empty string
    Empty,
    /// Starts with `.` (`./x`, `../x`)
    Relative,
    /// Starts with `/`
    Absolute,
    /// Contains `:` (`node:fs`, `virtual:x`, `file:///x`)
    Protocol,
    /// `@scope/name`
    ScopedMain,
    /// `@scope/name/sub` or a lone `@scope`
    ScopedSubpath,
    /// `name`
    BareMain,
    /// `name/sub`
    BareSubpath,
}

impl SpecifierKind {
    /// Check if this kind names a package main entry
    pub fn is_main_entry(&self) -> bool {
        matches!(self, SpecifierKind::ScopedMain | SpecifierKind::BareMain)
    }
}

impl fmt::Display for SpecifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SpecifierKind::Empty => "empty specifier",
            SpecifierKind::Relative => "relative path",
            SpecifierKind::Absolute => "absolute path",
            SpecifierKind::Protocol => "protocol specifier",
            SpecifierKind::ScopedMain => "scoped package",
            SpecifierKind::ScopedSubpath => "scoped sub-path",
            SpecifierKind::BareMain => "bare package",
            SpecifierKind::BareSubpath => "bare sub-path",
        };
        f.write_str(label)
    }
}

/// Classify an import specifier
pub fn classify(specifier: &str) -> SpecifierKind {
    if specifier.is_empty() {
        return SpecifierKind::Empty;
    }

    if specifier.starts_with('.') {
        return SpecifierKind::Relative;
    }
    if specifier.starts_with('/') {
        return SpecifierKind::Absolute;
    }

    if specifier.contains(':') {
        return SpecifierKind::Protocol;
    }

    if specifier.starts_with('@') {
        // Exactly namespace + name
        return if specifier.split('/').count() == 2 {
            SpecifierKind::ScopedMain
        } else {
            SpecifierKind::ScopedSubpath
        };
    }

    if specifier.contains('/') {
        SpecifierKind::BareSubpath
    } else {
        SpecifierKind::BareMain
    }
}

/// Check if a specifier names a package main entry (rewrite-eligible)
pub fn is_main_entry(specifier: &str) -> bool {
    classify(specifier).is_main_entry()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_and_absolute_paths() {
        for spec in ["./utils", "../utils", ".", "..", ".hidden", "/abs/path", "/"] {
            assert!(!is_main_entry(spec), "{} should not be a main entry", spec);
        }
        assert_eq!(classify("./x"), SpecifierKind::Relative);
        assert_eq!(classify("/x"), SpecifierKind::Absolute);
    }

    #[test]
    fn test_protocol_specifiers() {
        for spec in ["node:fs", "virtual:mono", "file:///tmp/x.js", "@scope/name:x", "data:text/javascript,1"] {
            assert!(!is_main_entry(spec), "{} should not be a main entry", spec);
            assert_eq!(classify(spec), SpecifierKind::Protocol);
        }
    }

    #[test]
    fn test_scoped_specifiers() {
        assert!(is_main_entry("@scope/name"));
        assert!(is_main_entry("@test/utils"));
        assert!(!is_main_entry("@scope/name/sub"));
        assert!(!is_main_entry("@scope/name/deep/sub"));
        assert!(!is_main_entry("@scope"));
        assert_eq!(classify("@scope/name"), SpecifierKind::ScopedMain);
        assert_eq!(classify("@scope/name/sub"), SpecifierKind::ScopedSubpath);
    }

    #[test]
    fn test_bare_specifiers() {
        assert!(is_main_entry("lodash"));
        assert!(is_main_entry("react-dom"));
        assert!(!is_main_entry("lodash/fp"));
        assert!(!is_main_entry("react-dom/client"));
        assert_eq!(classify("lodash"), SpecifierKind::BareMain);
        assert_eq!(classify("lodash/fp"), SpecifierKind::BareSubpath);
    }

    #[test]
    fn test_empty_specifier() {
        assert!(!is_main_entry(""));
        assert_eq!(classify(""), SpecifierKind::Empty);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(SpecifierKind::BareSubpath.to_string(), "bare sub-path");
        assert_eq!(SpecifierKind::Protocol.to_string(), "protocol specifier");
    }
}
