use crate::ports::outbound::InventorySource;
use crate::shared::error::SbomMetaError;
use crate::shared::security::{safe_read_file, validate_source_path, SourceKind};
use crate::shared::Result;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// Inventory file formats, in directory scan order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InventoryFormat {
    UvLock,
    PoetryLock,
    Requirements,
    NpmLock,
    CargoLock,
}

impl InventoryFormat {
    const SCAN_ORDER: [InventoryFormat; 5] = [
        InventoryFormat::UvLock,
        InventoryFormat::PoetryLock,
        InventoryFormat::Requirements,
        InventoryFormat::NpmLock,
        InventoryFormat::CargoLock,
    ];

    fn file_name(self) -> &'static str {
        match self {
            InventoryFormat::UvLock => "uv.lock",
            InventoryFormat::PoetryLock => "poetry.lock",
            InventoryFormat::Requirements => "requirements.txt",
            InventoryFormat::NpmLock => "package-lock.json",
            InventoryFormat::CargoLock => "Cargo.lock",
        }
    }

    fn from_file_name(name: &str) -> Option<Self> {
        Self::SCAN_ORDER
            .into_iter()
            .find(|format| format.file_name() == name)
    }

    fn parse(self, content: &str) -> Result<Vec<String>> {
        match self {
            InventoryFormat::UvLock | InventoryFormat::PoetryLock | InventoryFormat::CargoLock => {
                parse_toml_lock(content)
            }
            InventoryFormat::Requirements => Ok(parse_requirements(content)),
            InventoryFormat::NpmLock => parse_npm_lock(content),
        }
    }
}

/// LockfileInventorySource adapter deriving package names from lockfiles
///
/// Accepts either a project directory (every recognized lockfile in it is
/// read, names concatenated in scan order) or a single lockfile path.
pub struct LockfileInventorySource;

impl LockfileInventorySource {
    pub fn new() -> Self {
        Self
    }

    fn scan_directory(&self, dir: &Path) -> Result<Vec<String>> {
        let present: Vec<InventoryFormat> = InventoryFormat::SCAN_ORDER
            .into_iter()
            .filter(|format| dir.join(format.file_name()).exists())
            .collect();

        if present.is_empty() {
            let expected: Vec<&str> = InventoryFormat::SCAN_ORDER
                .iter()
                .map(|format| format.file_name())
                .collect();
            return Err(SbomMetaError::InventoryNotFound {
                path: dir.to_path_buf(),
                suggestion: format!(
                    "Run the scan in a project directory containing one of: {}",
                    expected.join(", ")
                ),
            }
            .into());
        }

        let mut names = Vec::new();
        for format in present {
            names.extend(self.scan_file(&dir.join(format.file_name()), format)?);
        }
        Ok(names)
    }

    fn scan_file(&self, path: &Path, format: InventoryFormat) -> Result<Vec<String>> {
        let content = safe_read_file(path, format.file_name())?;
        format.parse(&content).map_err(|e| {
            anyhow::Error::from(SbomMetaError::ScanError {
                path: path.to_path_buf(),
                details: format!("{:#}", e),
            })
        })
    }
}

impl Default for LockfileInventorySource {
    fn default() -> Self {
        Self::new()
    }
}

impl InventorySource for LockfileInventorySource {
    fn scan(&self, source: &Path) -> Result<Vec<String>> {
        match validate_source_path(source)? {
            SourceKind::Directory => self.scan_directory(source),
            SourceKind::File => {
                let format = source
                    .file_name()
                    .and_then(|name| name.to_str())
                    .and_then(InventoryFormat::from_file_name)
                    .ok_or_else(|| SbomMetaError::ScanError {
                        path: source.to_path_buf(),
                        details: "Unrecognized inventory file name".to_string(),
                    })?;
                self.scan_file(source, format)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct TomlLock {
    #[serde(default)]
    package: Vec<TomlPackage>,
}

#[derive(Debug, Deserialize)]
struct TomlPackage {
    name: String,
}

/// `[[package]]` names of uv.lock, poetry.lock and Cargo.lock
fn parse_toml_lock(content: &str) -> Result<Vec<String>> {
    let lock: TomlLock = toml::from_str(content)?;
    Ok(lock.package.into_iter().map(|p| p.name).collect())
}

const NODE_MODULES: &str = "node_modules/";

/// package-lock.json, lockfileVersion 1 through 3
fn parse_npm_lock(content: &str) -> Result<Vec<String>> {
    let root: Value = serde_json::from_str(content)?;

    if let Some(packages) = root.get("packages").and_then(Value::as_object) {
        let names = packages
            .iter()
            .filter(|(key, _)| !key.is_empty())
            .filter_map(|(key, entry)| match key.rfind(NODE_MODULES) {
                Some(idx) => Some(key[idx + NODE_MODULES.len()..].to_string()),
                // Workspace members are keyed by path; fall back to their name
                None => entry.get("name").and_then(Value::as_str).map(String::from),
            })
            .collect();
        return Ok(names);
    }

    let mut names = Vec::new();
    if let Some(dependencies) = root.get("dependencies") {
        collect_v1_dependencies(dependencies, &mut names);
    }
    Ok(names)
}

fn collect_v1_dependencies(dependencies: &Value, names: &mut Vec<String>) {
    let Some(map) = dependencies.as_object() else {
        return;
    };
    for (name, entry) in map {
        names.push(name.clone());
        if let Some(nested) = entry.get("dependencies") {
            collect_v1_dependencies(nested, names);
        }
    }
}

/// requirements.txt: one requirement per line, options and comments skipped
fn parse_requirements(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('-'))
        .filter_map(|line| {
            let end = line
                .find(|c: char| "[<>=!~;@".contains(c) || c.is_whitespace())
                .unwrap_or(line.len());
            let name = &line[..end];
            // Bare URLs and local paths carry no package name
            if name.is_empty() || name.contains('/') || name.contains(':') {
                None
            } else {
                Some(name.to_string())
            }
        })
        .collect()
}
