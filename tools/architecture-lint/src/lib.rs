//! Module boundary lint for the `roster` backend.
//!
//! `backend/src` is split into `domain` (entities, ports, services),
//! `inbound` (HTTP adapter) and `outbound` (persistence adapters). The lint
//! parses every source file in those trees and reports:
//!
//! - `domain` code reaching into `inbound`/`outbound`, or naming the web
//!   framework, the MongoDB driver, the OpenAPI derive crate or the config
//!   loader
//! - `inbound` code reaching into `outbound` or naming the MongoDB driver
//! - `outbound` code reaching into `inbound` or naming the web framework
//!
//! Run it with `cargo run -p architecture-lint` from anywhere in the workspace.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syn::visit::{self, Visit};

/// Library name of the linted crate, as written in absolute paths.
const CRATE_NAME: &str = "roster";

const WEB_CRATES: &[&str] = &["actix", "actix_http", "actix_rt", "actix_service", "actix_web"];
const STORAGE_CRATES: &[&str] = &["bson", "mongodb"];
const API_DOC_CRATES: &[&str] = &["utoipa", "utoipa_swagger_ui"];
const CONFIG_CRATES: &[&str] = &["ortho_config"];

/// One layer of the hexagon and what it may not touch.
struct LayerRule {
    name: &'static str,
    forbidden_modules: &'static [&'static str],
    forbidden_crates: &'static [&'static [&'static str]],
}

const LAYERS: &[LayerRule] = &[
    LayerRule {
        name: "domain",
        forbidden_modules: &["inbound", "outbound"],
        forbidden_crates: &[WEB_CRATES, STORAGE_CRATES, API_DOC_CRATES, CONFIG_CRATES],
    },
    LayerRule {
        name: "inbound",
        forbidden_modules: &["outbound"],
        forbidden_crates: &[STORAGE_CRATES],
    },
    LayerRule {
        name: "outbound",
        forbidden_modules: &["inbound"],
        forbidden_crates: &[WEB_CRATES, API_DOC_CRATES],
    },
];

impl LayerRule {
    fn for_file(relative_path: &Path) -> Option<&'static Self> {
        let first = relative_path.components().next()?.as_os_str().to_str()?;
        LAYERS.iter().find(|rule| rule.name == first)
    }

    fn forbids_module(&self, root: &str) -> bool {
        self.forbidden_modules.contains(&root)
    }

    fn forbids_crate(&self, root: &str) -> bool {
        self.forbidden_crates
            .iter()
            .any(|group| group.contains(&root))
    }
}

/// A single boundary violation discovered by the linter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path relative to `backend/src`.
    pub file: PathBuf,
    /// Which rule was broken.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

/// Failure modes returned by the architecture lint.
#[derive(Debug)]
pub enum ArchitectureLintError {
    /// Walking or reading the source tree failed.
    Io(io::Error),
    /// A file could not be parsed, or sits outside every layer.
    Parse {
        /// File path relative to `backend/src`.
        file: PathBuf,
        /// Parser or path error.
        message: String,
    },
    /// At least one boundary was crossed.
    Violations(Vec<Violation>),
}

impl fmt::Display for ArchitectureLintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error while linting architecture: {err}"),
            Self::Parse { file, message } => {
                write!(f, "cannot lint {}: {message}", file.display())
            }
            Self::Violations(violations) => {
                writeln!(f, "{} architecture boundary violation(s):", violations.len())?;
                violations
                    .iter()
                    .try_for_each(|violation| writeln!(f, "  {violation}"))
            }
        }
    }
}

impl std::error::Error for ArchitectureLintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse { .. } | Self::Violations(_) => None,
        }
    }
}

impl From<io::Error> for ArchitectureLintError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// A Rust source file to be linted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to `backend/src`.
    pub file: PathBuf,
    /// Rust source text.
    pub contents: String,
}

/// Lint every layer under `backend_dir/src`. Missing layer directories are
/// skipped.
pub fn lint_backend_sources(backend_dir: &Path) -> Result<(), ArchitectureLintError> {
    let src_dir = backend_dir.join("src");
    let mut sources = Vec::new();
    for rule in LAYERS {
        let layer_dir = src_dir.join(rule.name);
        if layer_dir.is_dir() {
            collect_rust_files(&src_dir, &layer_dir, &mut sources)?;
        }
    }
    lint_sources(&sources)
}

/// Lint in-memory sources whose paths are relative to `backend/src`.
pub fn lint_sources(sources: &[LintSource]) -> Result<(), ArchitectureLintError> {
    let mut violations = Vec::new();
    for source in sources {
        let parse_error = |message: String| ArchitectureLintError::Parse {
            file: source.file.clone(),
            message,
        };
        let rule = LayerRule::for_file(&source.file)
            .ok_or_else(|| parse_error("file is not inside domain, inbound or outbound".to_owned()))?;
        let parsed = syn::parse_file(&source.contents).map_err(|err| parse_error(err.to_string()))?;
        violations.extend(
            check_file(rule, &parsed)
                .into_iter()
                .map(|message| Violation {
                    file: source.file.clone(),
                    message,
                }),
        );
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ArchitectureLintError::Violations(violations))
    }
}

fn check_file(rule: &LayerRule, parsed: &syn::File) -> BTreeSet<String> {
    let mut collector = PathCollector::default();
    collector.visit_file(parsed);

    let mut messages = BTreeSet::new();
    for segments in &collector.paths {
        if let Some(root) = internal_module_root(segments).filter(|root| rule.forbids_module(root)) {
            messages.insert(format!(
                "{} module must not depend on crate::{root}",
                rule.name
            ));
        }
        if let Some(root) = external_crate_root(segments).filter(|root| rule.forbids_crate(root)) {
            messages.insert(format!(
                "{} module must not depend on external crate `{root}`",
                rule.name
            ));
        }
    }
    messages
}

fn is_relative_segment(segment: &str) -> bool {
    matches!(segment, "crate" | "self" | "super")
}

/// Top-level module named by a path inside the crate, e.g. `outbound` for
/// `crate::outbound::persistence`, `super::super::outbound` or
/// `roster::outbound`.
fn internal_module_root(segments: &[String]) -> Option<&str> {
    let first = segments.first()?.as_str();
    if LAYERS.iter().any(|rule| rule.name == first) {
        return Some(first);
    }
    let root = if first == CRATE_NAME {
        segments.get(1)
    } else if is_relative_segment(first) {
        segments
            .iter()
            .find(|segment| !is_relative_segment(segment.as_str()))
    } else {
        None
    };
    root.map(String::as_str)
}

fn external_crate_root(segments: &[String]) -> Option<&str> {
    let root = segments.first()?.as_str();
    (!is_relative_segment(root) && root != CRATE_NAME).then_some(root)
}

/// Every path mentioned in a file, including the expanded leaves of `use`
/// trees.
#[derive(Default)]
struct PathCollector {
    paths: BTreeSet<Vec<String>>,
}

impl PathCollector {
    fn record_use_tree(&mut self, tree: &syn::UseTree, prefix: &[String]) {
        let leaf = |ident: String| {
            let mut segments = prefix.to_vec();
            segments.push(ident);
            segments
        };
        match tree {
            syn::UseTree::Path(path) => {
                self.record_use_tree(&path.tree, &leaf(path.ident.to_string()));
            }
            syn::UseTree::Name(name) => {
                self.paths.insert(leaf(name.ident.to_string()));
            }
            syn::UseTree::Rename(rename) => {
                self.paths.insert(leaf(rename.ident.to_string()));
            }
            syn::UseTree::Glob(_) => {
                self.paths.insert(leaf("*".to_owned()));
            }
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.record_use_tree(item, prefix);
                }
            }
        }
    }
}

impl<'ast> Visit<'ast> for PathCollector {
    fn visit_path(&mut self, node: &'ast syn::Path) {
        let segments: Vec<String> = node
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        if !segments.is_empty() {
            self.paths.insert(segments);
        }
        visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.record_use_tree(&node.tree, &[]);
    }
}

fn collect_rust_files(
    src_root: &Path,
    dir: &Path,
    sources: &mut Vec<LintSource>,
) -> Result<(), ArchitectureLintError> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|found| found.path()))
        .collect::<Result<Vec<_>, io::Error>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            collect_rust_files(src_root, &path, sources)?;
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            let relative = path.strip_prefix(src_root).map_err(|err| {
                ArchitectureLintError::Parse {
                    file: path.clone(),
                    message: err.to_string(),
                }
            })?;
            sources.push(LintSource {
                file: relative.to_path_buf(),
                contents: fs::read_to_string(&path)?,
            });
        }
    }
    Ok(())
}
