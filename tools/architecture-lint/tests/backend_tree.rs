//! Lint runs over a backend tree written to disk.

use std::fs;
use std::path::{Path, PathBuf};

use architecture_lint::{ArchitectureLintError, Violation, lint_backend_sources};
use rstest::{fixture, rstest};
use tempfile::TempDir;

struct BackendTree {
    temp: TempDir,
}

impl BackendTree {
    fn backend_dir(&self) -> PathBuf {
        self.temp.path().join("backend")
    }

    fn write(&self, relative: &str, contents: &str) {
        let path = self.backend_dir().join("src").join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directories");
        }
        fs::write(path, contents).expect("write source file");
    }

    fn with_valid_layers(self) -> Self {
        self.write(
            "domain/user.rs",
            "pub struct UserId(u64); impl UserId { pub fn new(v: u64) -> Self { Self(v) } }",
        );
        self.write(
            "inbound/http/users.rs",
            "use actix_web::web; use crate::domain::user::UserId; fn handler() { let _id = UserId::new(1); }",
        );
        self.write(
            "outbound/persistence/mongo_user_repository.rs",
            "use mongodb::Collection; use crate::domain::user::UserId; pub struct Repo; impl Repo { pub fn save(&self, _id: UserId) {} }",
        );
        self
    }
}

#[fixture]
fn tree() -> BackendTree {
    BackendTree {
        temp: TempDir::new().expect("tempdir"),
    }
}

fn violations(result: Result<(), ArchitectureLintError>) -> Vec<Violation> {
    match result {
        Err(ArchitectureLintError::Violations(violations)) => violations,
        other => panic!("expected violations, got: {other:?}"),
    }
}

fn has_violation(violations: &[Violation], file: &str, fragment: &str) -> bool {
    violations
        .iter()
        .any(|violation| violation.file == Path::new(file) && violation.message.contains(fragment))
}

#[rstest]
fn clean_layers_pass(tree: BackendTree) {
    let tree = tree.with_valid_layers();
    tree.write("server/mod.rs", "use crate::outbound::persistence; fn wire() {}");
    lint_backend_sources(&tree.backend_dir()).expect("clean tree passes");
}

#[rstest]
fn missing_layers_are_skipped(tree: BackendTree) {
    tree.write("domain/user.rs", "pub struct User;");
    lint_backend_sources(&tree.backend_dir()).expect("domain-only tree passes");
}

#[rstest]
fn every_violation_is_reported(tree: BackendTree) {
    let tree = tree.with_valid_layers();
    tree.write(
        "inbound/http/bad.rs",
        "use roster::outbound::persistence::MongoConnection; fn handler() {}",
    );
    tree.write(
        "domain/bad.rs",
        "use actix_web::HttpResponse; fn handler() { let _ = HttpResponse::Ok(); }",
    );
    tree.write(
        "outbound/persistence/bad.rs",
        "use crate::inbound::http; fn handler() {}",
    );

    let found = violations(lint_backend_sources(&tree.backend_dir()));

    assert_eq!(found.len(), 3, "violations: {found:?}");
    assert!(has_violation(&found, "inbound/http/bad.rs", "crate::outbound"));
    assert!(has_violation(&found, "domain/bad.rs", "external crate `actix_web`"));
    assert!(has_violation(&found, "outbound/persistence/bad.rs", "crate::inbound"));
}

#[rstest]
fn inbound_driver_use_is_reported(tree: BackendTree) {
    tree.write(
        "inbound/http/users.rs",
        "use mongodb::bson::doc; fn handler() {}",
    );
    let found = violations(lint_backend_sources(&tree.backend_dir()));
    assert!(has_violation(&found, "inbound/http/users.rs", "external crate `mongodb`"));
}
