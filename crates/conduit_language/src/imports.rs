//! Import alias scope.
//!
//! A dotted worker reference like `stages.Enrich` is external when `stages`
//! names an import. The in-scope name of an import is its explicit alias, or
//! else the last `/` segment of its path.

use std::collections::HashSet;

use crate::ast::{ImportDecl, SourceFile};
use crate::text::trim_quotes;

/// The set of names a file may use as external-reference prefixes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportScope {
    names: HashSet<String>,
}

impl ImportScope {
    /// Creates an empty scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the in-scope names of every import in `file`.
    #[must_use]
    pub fn from_file(file: &SourceFile) -> Self {
        file.imports().collect()
    }

    /// Adds one import's in-scope name.
    pub fn insert(&mut self, import: &ImportDecl) {
        self.names.insert(scope_name(import).to_string());
    }

    /// Returns true if `name` is an import alias.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Returns the number of distinct names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the file imports nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<'a> FromIterator<&'a ImportDecl> for ImportScope {
    fn from_iter<I: IntoIterator<Item = &'a ImportDecl>>(iter: I) -> Self {
        let mut scope = Self::new();
        for import in iter {
            scope.insert(import);
        }
        scope
    }
}

/// The name an import brings into scope.
#[must_use]
pub fn scope_name(import: &ImportDecl) -> &str {
    if let Some(alias) = import.alias.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
        return alias;
    }
    let path = trim_quotes(import.path.trim());
    path.rsplit_once('/').map_or(path, |(_, last)| last)
}
