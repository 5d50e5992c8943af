use std::collections::BTreeMap;

use ig_grid::GridRender;

use crate::error::BundleError;
use crate::sizes::{png_name, svg_name};

/// Named file in the output bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl BundleFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Raster and vector encodings of one grid size plus its aliases.
#[derive(Debug, Clone)]
pub struct SizeArtifacts {
    pub render: GridRender,
    pub png: Vec<u8>,
    pub svg: String,
    pub aliases: Vec<BundleFile>,
}

impl SizeArtifacts {
    pub fn size(&self) -> usize {
        self.render.spec().grid_size()
    }

    pub fn png_name(&self) -> String {
        png_name(self.size())
    }

    pub fn svg_name(&self) -> String {
        svg_name(self.size())
    }
}

/// A size, or one alias of it, that could not be produced, and why.
#[derive(Debug)]
pub struct SizeFailure {
    pub size: usize,
    pub cell_size: usize,
    /// Set when only this alias failed; the size's PNG/SVG pair still ships.
    pub alias: Option<&'static str>,
    pub error: BundleError,
}

/// Everything one run produced, keyed by grid size.
#[derive(Debug, Default)]
pub struct ArtifactSet {
    pub(crate) sizes: BTreeMap<usize, SizeArtifacts>,
    pub(crate) extras: Vec<BundleFile>,
    pub(crate) failures: Vec<SizeFailure>,
}

impl ArtifactSet {
    pub fn get(&self, size: usize) -> Option<&SizeArtifacts> {
        self.sizes.get(&size)
    }

    /// Successful sizes in ascending order.
    pub fn sizes(&self) -> impl Iterator<Item = &SizeArtifacts> {
        self.sizes.values()
    }

    /// The largest successful size, shown as the default preview.
    pub fn largest(&self) -> Option<&SizeArtifacts> {
        self.sizes.values().next_back()
    }

    pub fn failures(&self) -> &[SizeFailure] {
        &self.failures
    }

    pub fn failed_sizes(&self) -> Vec<usize> {
        self.failures.iter().map(|f| f.size).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Archive listing: primary PNG/SVG pairs, then aliases, then manifests.
    pub fn files(&self) -> Vec<(String, &[u8])> {
        let mut files = Vec::new();
        for artifacts in self.sizes.values() {
            files.push((artifacts.png_name(), artifacts.png.as_slice()));
            files.push((artifacts.svg_name(), artifacts.svg.as_bytes()));
        }
        for artifacts in self.sizes.values() {
            for alias in &artifacts.aliases {
                files.push((alias.name.clone(), alias.bytes.as_slice()));
            }
        }
        for extra in &self.extras {
            files.push((extra.name.clone(), extra.bytes.as_slice()));
        }
        files
    }

    pub fn file_names(&self) -> Vec<String> {
        self.files().into_iter().map(|(name, _)| name).collect()
    }

    pub fn file(&self, name: &str) -> Option<&[u8]> {
        self.files()
            .into_iter()
            .find(|(n, _)| n == name)
            .map(|(_, bytes)| bytes)
    }
}
