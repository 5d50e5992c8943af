use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use ig_core::{Image, Rgba8};
use ig_grid::{GridRender, paint, rasterize, to_svg};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::artifact::{ArtifactSet, BundleFile, SizeArtifacts, SizeFailure};
use crate::config::{BundleConfig, FaviconFormat};
use crate::encode::{encode_ico, encode_png};
use crate::error::BundleError;
use crate::manifest::{BROWSERCONFIG_NAME, MANIFEST_NAME, browserconfig_xml, manifest_json};
use crate::sizes::{Alias, AliasSource, SizeEntry, aliases_for};

/// Lifecycle of one upload.
///
/// `Idle -> SourceLoaded -> Rendering -> Rendered -> Packaging -> Done`.
/// A cancelled run drops everything it produced and falls back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    SourceLoaded,
    Rendering,
    Rendered,
    Packaging,
    Done,
}

/// Shared flag a newer upload flips to supersede an in-flight run.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// One upload: the decoded source, its per-size renders, and its failures.
#[derive(Debug)]
pub struct Run {
    id: u64,
    source: Image<Rgba8>,
    state: RunState,
    renders: BTreeMap<usize, GridRender>,
    failures: Vec<SizeFailure>,
    cancel: CancelToken,
}

impl Run {
    /// Decodes an uploaded file. Nothing is rendered if this fails.
    pub fn decode(id: u64, bytes: &[u8], cancel: CancelToken) -> Result<Self, BundleError> {
        let decoded =
            image::load_from_memory(bytes).map_err(|e| BundleError::InvalidImageInput {
                reason: e.to_string(),
            })?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        let source = Image::from_rgba_bytes(width as usize, height as usize, rgba.as_raw())?;
        Self::from_image(id, source, cancel)
    }

    pub fn from_image(
        id: u64,
        source: Image<Rgba8>,
        cancel: CancelToken,
    ) -> Result<Self, BundleError> {
        if source.is_empty() {
            return Err(BundleError::InvalidImageInput {
                reason: format!("image is {}x{}", source.width(), source.height()),
            });
        }

        info!(
            run = id,
            width = source.width(),
            height = source.height(),
            "source image loaded"
        );
        Ok(Self {
            id,
            source,
            state: RunState::SourceLoaded,
            renders: BTreeMap::new(),
            failures: Vec::new(),
            cancel,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn source(&self) -> &Image<Rgba8> {
        &self.source
    }

    pub fn renders(&self) -> &BTreeMap<usize, GridRender> {
        &self.renders
    }

    pub fn failures(&self) -> &[SizeFailure] {
        &self.failures
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Rasterizes every configured size. Sizes fail independently; only
    /// cancellation or an out-of-range step aborts the whole step.
    pub fn render(&mut self, cfg: &BundleConfig) -> Result<(), BundleError> {
        self.expect_state(RunState::SourceLoaded)?;
        cfg.check_step()?;
        self.state = RunState::Rendering;
        self.check_cancelled()?;

        let entries = unique_sizes(self.id, &cfg.sizes);
        let source = self.source.as_view();
        let cancel = &self.cancel;
        let job = |entry: &SizeEntry| -> Result<GridRender, SizeFailure> {
            let cell_size = entry.cell_for_step(cfg.step).unwrap_or(entry.cell);
            let fail = |error: BundleError| SizeFailure {
                size: entry.size,
                cell_size,
                alias: None,
                error,
            };
            if cancel.is_cancelled() {
                return Err(fail(BundleError::Cancelled));
            }
            let spec = cfg.grid_spec(entry).map_err(fail)?;
            let render = rasterize(&source, spec).map_err(|e| fail(e.into()))?;
            debug!(size = entry.size, cell = cell_size, "grid rendered");
            Ok(render)
        };

        let results: Vec<_> = if cfg.parallel {
            entries.par_iter().map(job).collect()
        } else {
            entries.iter().map(job).collect()
        };
        self.check_cancelled()?;

        for result in results {
            match result {
                Ok(render) => {
                    self.renders.insert(render.spec().grid_size(), render);
                }
                Err(failure) => {
                    warn!(
                        run = self.id,
                        size = failure.size,
                        cell = failure.cell_size,
                        error = %failure.error,
                        "size skipped"
                    );
                    self.failures.push(failure);
                }
            }
        }

        self.state = RunState::Rendered;
        info!(
            run = self.id,
            rendered = self.renders.len(),
            failed = self.failures.len(),
            "rendering finished"
        );
        Ok(())
    }

    /// Encodes every render and assembles the artifact set.
    ///
    /// All per-size encodings are joined before the set is returned, so its
    /// file listing is final.
    pub fn package(&mut self, cfg: &BundleConfig) -> Result<ArtifactSet, BundleError> {
        self.expect_state(RunState::Rendered)?;
        self.state = RunState::Packaging;
        self.check_cancelled()?;

        let cancel = &self.cancel;
        let job = |render: &GridRender| -> Result<Packaged, SizeFailure> {
            let spec = render.spec();
            let fail = |error: BundleError| SizeFailure {
                size: spec.grid_size(),
                cell_size: spec.cell_size(),
                alias: None,
                error,
            };
            if cancel.is_cancelled() {
                return Err(fail(BundleError::Cancelled));
            }
            package_size(render, aliases_for(spec.grid_size()), cfg.favicon).map_err(fail)
        };

        let results: Vec<_> = if cfg.parallel {
            self.renders.par_iter().map(|(_, r)| job(r)).collect()
        } else {
            self.renders.values().map(job).collect()
        };
        self.check_cancelled()?;

        let mut set = ArtifactSet::default();
        for result in results {
            match result {
                Ok((artifacts, alias_failures)) => {
                    set.sizes.insert(artifacts.size(), artifacts);
                    for failure in alias_failures {
                        warn!(
                            run = self.id,
                            size = failure.size,
                            alias = failure.alias,
                            error = %failure.error,
                            "alias skipped"
                        );
                        self.failures.push(failure);
                    }
                }
                Err(failure) => {
                    warn!(
                        run = self.id,
                        size = failure.size,
                        error = %failure.error,
                        "encoding failed"
                    );
                    self.failures.push(failure);
                }
            }
        }

        set.extras.push(BundleFile::new(
            MANIFEST_NAME,
            manifest_json(&cfg.manifest)?,
        ));
        set.extras.push(BundleFile::new(
            BROWSERCONFIG_NAME,
            browserconfig_xml(&cfg.tile_color),
        ));
        set.failures = std::mem::take(&mut self.failures);
        set.failures.sort_by_key(|f| f.size);

        self.state = RunState::Done;
        info!(
            run = self.id,
            files = set.files().len(),
            failed = set.failures.len(),
            "bundle packaged"
        );
        Ok(set)
    }

    /// Renders then packages.
    pub fn process(&mut self, cfg: &BundleConfig) -> Result<ArtifactSet, BundleError> {
        self.render(cfg)?;
        self.package(cfg)
    }

    fn expect_state(&self, expected: RunState) -> Result<(), BundleError> {
        if self.state != expected {
            return Err(BundleError::InvalidState {
                expected,
                actual: self.state,
            });
        }
        Ok(())
    }

    fn check_cancelled(&mut self) -> Result<(), BundleError> {
        if !self.cancel.is_cancelled() {
            return Ok(());
        }
        warn!(run = self.id, "run superseded, discarding results");
        self.renders.clear();
        self.failures.clear();
        self.state = RunState::Idle;
        Err(BundleError::Cancelled)
    }
}

/// Encoded pair of one size plus the aliases that could not be encoded.
type Packaged = (SizeArtifacts, Vec<SizeFailure>);

/// Encodes one render. A failing alias is reported next to the artifacts
/// instead of dropping the size's PNG/SVG pair.
fn package_size<'a>(
    render: &GridRender,
    aliases: impl IntoIterator<Item = &'a Alias>,
    favicon: FaviconFormat,
) -> Result<Packaged, BundleError> {
    let spec = render.spec();
    let size = spec.grid_size();
    let pixels = paint(render)?;
    let png = encode_png(&pixels)?;
    let svg = to_svg(render);

    let mut files = Vec::new();
    let mut failures = Vec::new();
    for alias in aliases {
        let encoded = match (alias.source, favicon) {
            (AliasSource::Raster, _) | (AliasSource::Favicon, FaviconFormat::Png) => {
                Ok(png.clone())
            }
            (AliasSource::Favicon, FaviconFormat::Ico) => encode_ico(&pixels),
            (AliasSource::Vector, _) => Ok(svg.clone().into_bytes()),
        };
        match encoded {
            Ok(bytes) => files.push(BundleFile::new(alias.name, bytes)),
            Err(error) => failures.push(SizeFailure {
                size,
                cell_size: spec.cell_size(),
                alias: Some(alias.name),
                error,
            }),
        }
    }

    debug!(size, png_bytes = png.len(), svg_bytes = svg.len(), "size encoded");
    let artifacts = SizeArtifacts {
        render: render.clone(),
        png,
        svg,
        aliases: files,
    };
    Ok((artifacts, failures))
}

/// First entry wins for each grid size; later duplicates are dropped.
fn unique_sizes(run: u64, sizes: &[SizeEntry]) -> Vec<SizeEntry> {
    let mut seen = BTreeSet::new();
    sizes
        .iter()
        .filter(|entry| {
            let fresh = seen.insert(entry.size);
            if !fresh {
                warn!(run, size = entry.size, cell = entry.cell, "duplicate size ignored");
            }
            fresh
        })
        .copied()
        .collect()
}

/// Tracks the active upload so a new one supersedes the previous run.
#[derive(Debug, Default)]
pub struct Session {
    generation: u64,
    active: Option<CancelToken>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of uploads seen so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Cancels the previous run and decodes a new one.
    ///
    /// The previous run is cancelled even if the new bytes fail to decode.
    pub fn upload(&mut self, bytes: &[u8]) -> Result<Run, BundleError> {
        let cancel = self.supersede();
        Run::decode(self.generation, bytes, cancel)
    }

    pub fn upload_image(&mut self, source: Image<Rgba8>) -> Result<Run, BundleError> {
        let cancel = self.supersede();
        Run::from_image(self.generation, source, cancel)
    }

    fn supersede(&mut self) -> CancelToken {
        if let Some(prev) = self.active.take() {
            if !prev.is_cancelled() {
                info!(superseded = self.generation, "new upload supersedes active run");
            }
            prev.cancel();
        }
        self.generation += 1;
        let token = CancelToken::new();
        self.active = Some(token.clone());
        token
    }
}

/// Decodes `bytes` and runs the whole pipeline once.
pub fn generate(bytes: &[u8], cfg: &BundleConfig) -> Result<ArtifactSet, BundleError> {
    let mut run = Run::decode(1, bytes, CancelToken::new())?;
    run.process(cfg)
}
