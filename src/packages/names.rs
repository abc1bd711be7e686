//! Package name extraction and canonicalization.
//!
//! User input is filtered through a safelist pattern before anything
//! reaches a subprocess. Text that does not look like a package name (with
//! an optional version comparison) is dropped without complaint.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// A package name, optionally followed by `<`, `>`, `<=`, `>=` or `==` and
/// a dotted numeric version.
pub const PACKAGE_NAME_PATTERN: &str =
    r"^[A-Za-z][A-Za-z0-9_\-]+((<=|>=|==|<|>)[0-9]+\.[0-9]+(\.[0-9]+)*)?$";

static PACKAGE_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PACKAGE_NAME_PATTERN).unwrap());

/// Packages requested by the caller.
///
/// A single string or each element of a sequence may hold several
/// whitespace or comma separated names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageRequest {
    Single(String),
    Many(Vec<String>),
}

impl PackageRequest {
    /// Candidate groups before safelist filtering.
    ///
    /// Each word of a single string is its own group. Each element of a
    /// sequence is one group holding its whitespace or comma separated
    /// words; a group is kept only if all of its words pass.
    pub fn candidates(&self) -> Vec<Vec<&str>> {
        match self {
            PackageRequest::Single(s) => split_words(s).into_iter().map(|w| vec![w]).collect(),
            PackageRequest::Many(items) => items
                .iter()
                .map(|s| split_words(s))
                .filter(|words| !words.is_empty())
                .collect(),
        }
    }
}

fn split_words(s: &str) -> Vec<&str> {
    s.split(|c: char| c.is_whitespace() || c == ',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

impl From<&str> for PackageRequest {
    fn from(s: &str) -> Self {
        PackageRequest::Single(s.to_string())
    }
}

impl From<String> for PackageRequest {
    fn from(s: String) -> Self {
        PackageRequest::Single(s)
    }
}

impl From<Vec<String>> for PackageRequest {
    fn from(items: Vec<String>) -> Self {
        PackageRequest::Many(items)
    }
}

impl From<Vec<&str>> for PackageRequest {
    fn from(items: Vec<&str>) -> Self {
        PackageRequest::Many(items.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for PackageRequest {
    fn from(items: &[&str]) -> Self {
        PackageRequest::Many(items.iter().map(|s| s.to_string()).collect())
    }
}

/// Whether `token` passes the safelist.
pub fn is_valid_pkg_name(token: &str) -> bool {
    PACKAGE_NAME_REGEX.is_match(token)
}

/// Keep only the tokens of `request` that pass the safelist.
pub fn get_pkg_names(request: &PackageRequest) -> BTreeSet<String> {
    request
        .candidates()
        .into_iter()
        .filter(|words| words.iter().all(|w| is_valid_pkg_name(w)))
        .flatten()
        .map(String::from)
        .collect()
}

/// Split a token into its name and version specifier parts.
///
/// `numpy>=1.2` becomes `("numpy", ">=1.2")`; a bare name has an empty
/// specifier.
pub fn split_specifier(token: &str) -> (&str, &str) {
    match token.find(['<', '>', '=']) {
        Some(idx) => token.split_at(idx),
        None => (token, ""),
    }
}

/// Canonical form of a package token: lowercase name with `_` folded into
/// `-`, specifier kept as written.
pub fn canonicalize(token: &str) -> String {
    let (name, spec) = split_specifier(token.trim());
    let mut canonical = name.to_lowercase().replace('_', "-");
    canonical.push_str(spec);
    canonical
}

/// Canonicalize every name in a set.
pub fn normalize_package_names<I, S>(packages: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    packages
        .into_iter()
        .map(|p| canonicalize(p.as_ref()))
        .collect()
}
