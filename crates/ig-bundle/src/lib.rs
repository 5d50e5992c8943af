//! Multi-resolution icon bundles.
//!
//! A [`Run`] owns one decoded upload. [`Run::render`] rasterizes it once per
//! configured size, and [`Run::package`] encodes every grid as PNG and SVG,
//! adds the platform aliases (`favicon.ico`, `apple-touch-icon.png`, ...)
//! and the `manifest.json` / `browserconfig.xml` pair. The result is an
//! [`ArtifactSet`] that [`write_zip`] or [`write_dir`] persists.
//!
//! Sizes are independent: a size that cannot be built is reported in
//! [`ArtifactSet::failures`] while the others still ship. A [`Session`]
//! cancels the previous run whenever a new upload arrives.

mod archive;
mod artifact;
mod config;
mod encode;
mod error;
mod manifest;
mod run;
mod sizes;

pub use archive::{ARCHIVE_NAME, write_dir, write_zip, zip_bytes};
pub use artifact::{ArtifactSet, BundleFile, SizeArtifacts, SizeFailure};
pub use config::{BundleConfig, FaviconFormat, ManifestConfig};
pub use encode::{encode_ico, encode_png};
pub use error::BundleError;
pub use manifest::{BROWSERCONFIG_NAME, MANIFEST_NAME, browserconfig_xml, manifest_json};
pub use run::{CancelToken, Run, RunState, Session, generate};
pub use sizes::{
    ALIASES, Alias, AliasSource, REFERENCE_SIZES, STEP_COUNT, SizeEntry, aliases_for, png_name,
    svg_name,
};
