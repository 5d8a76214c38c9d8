use sbom_meta::prelude::*;
use std::path::Path;

/// Mock InventorySource returning a fixed list of names
pub struct MockInventorySource {
    names: Vec<String>,
    should_fail: bool,
}

impl MockInventorySource {
    pub fn new(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
            should_fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            names: Vec::new(),
            should_fail: true,
        }
    }
}

impl InventorySource for MockInventorySource {
    fn scan(&self, source: &Path) -> Result<Vec<String>> {
        if self.should_fail {
            anyhow::bail!("Mock scan failure for {}", source.display());
        }
        Ok(self.names.clone())
    }
}
