use crate::codec::{self, DecodeStats};
use anyhow::{anyhow, Context, Result};
use atomicwrites::{AllowOverwrite, AtomicFile};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;
use wardgraph_core::HospitalGraph;

/// The graph file on disk.
///
/// Every save rewrites the whole file. The bytes go to a temporary file in
/// the same directory which is then renamed over the old one, so a crash
/// mid-write leaves the previous version intact.
pub struct GraphFile {
    path: PathBuf,
}

impl GraphFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        // A bare file name has an empty parent; anchor it so the temp file
        // lands next to the target
        let path = match path.parent() {
            Some(parent) if parent.as_os_str().is_empty() => Path::new(".").join(path),
            _ => path.to_path_buf(),
        };
        Self { path }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the graph. `None` when the file does not exist.
    pub fn load(&self) -> Result<Option<(HospitalGraph, DecodeStats)>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("reading graph file {:?}", self.path))?;
        let text = String::from_utf8_lossy(&bytes);
        Ok(Some(codec::decode(&text)))
    }

    pub fn save(&self, graph: &HospitalGraph) -> Result<()> {
        let data = codec::encode(graph);
        AtomicFile::new(&self.path, AllowOverwrite)
            .write(|f| f.write_all(data.as_bytes()))
            .map_err(|e| anyhow!("writing graph file {:?}: {}", self.path, e))?;
        debug!(path = ?self.path, nodes = graph.len(), edges = graph.edge_count(), "graph saved");
        Ok(())
    }
}
