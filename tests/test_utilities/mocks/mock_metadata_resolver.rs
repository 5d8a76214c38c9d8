use sbom_meta::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock MetadataResolver backed by an in-memory table
///
/// Records call order and the peak number of overlapping calls, and can
/// delay or fail individual names.
#[derive(Default)]
pub struct MockMetadataResolver {
    rows: HashMap<String, Vec<PackageMetadata>>,
    delays: HashMap<String, Duration>,
    failing: HashSet<String>,
    calls: Arc<Mutex<Vec<String>>>,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
}

impl MockMetadataResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(mut self, name: &str, rows: Vec<PackageMetadata>) -> Self {
        self.rows.insert(name.to_string(), rows);
        self
    }

    pub fn with_delay(mut self, name: &str, delay: Duration) -> Self {
        self.delays.insert(name.to_string(), delay);
        self
    }

    pub fn failing_on(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    pub fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        self.calls.clone()
    }

    pub fn peak_in_flight(&self) -> Arc<AtomicUsize> {
        self.peak_in_flight.clone()
    }
}

#[async_trait::async_trait]
impl MetadataResolver for MockMetadataResolver {
    async fn resolve(&self, name: &str, _mode: ResolutionMode) -> Result<Vec<PackageMetadata>> {
        self.calls.lock().unwrap().push(name.to_string());

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(name) {
            tokio::time::sleep(*delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(name) {
            anyhow::bail!("Mock query failure for {}", name);
        }

        Ok(self.rows.get(name).cloned().unwrap_or_default())
    }
}
