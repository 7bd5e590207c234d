//! Integration tests for import alias scopes

use conduit_language::{ImportDecl, ImportScope, SourceFile};

#[test]
fn scope_mixes_aliases_and_path_segments() {
    let file = SourceFile::new()
        .with(ImportDecl::new("alpha"))
        .with(ImportDecl::new("github.com/acme/stages"))
        .with(ImportDecl::new("acme/codec").with_alias("c"));

    let scope = ImportScope::from_file(&file);
    assert!(scope.contains("alpha"));
    assert!(scope.contains("stages"));
    assert!(scope.contains("c"));
    assert!(!scope.contains("codec"));
    assert!(!scope.contains("acme"));
}

#[test]
fn empty_file_has_empty_scope() {
    assert!(ImportScope::from_file(&SourceFile::new()).is_empty());
}

#[test]
fn scope_from_iterator() {
    let imports = [ImportDecl::new("a/b"), ImportDecl::new("c")];
    let scope: ImportScope = imports.iter().collect();
    assert_eq!(scope.len(), 2);
}
