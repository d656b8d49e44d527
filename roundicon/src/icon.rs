//! Round icon generation: one source image in, one masked PNG out

use std::path::{Path, PathBuf};

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::config::{IconSet, IconSpec};
use crate::error::IconError;
use crate::image::{self, CropRegion, PngCompression};

/// What a successful [`generate`] produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedIcon {
    pub output: PathBuf,
    pub edge: u32,
    pub crop: CropRegion,
}

/// Crop `input` to its centered square, resize to `size` (if given), mask it
/// to a circle and save the result as an RGBA PNG at `output`.
pub fn generate(
    input: &Path,
    output: &Path,
    size: Option<u32>,
) -> Result<GeneratedIcon, IconError> {
    generate_with(input, output, size, PngCompression::default())
}

pub fn generate_with(
    input: &Path,
    output: &Path,
    size: Option<u32>,
    compression: PngCompression,
) -> Result<GeneratedIcon, IconError> {
    if size == Some(0) {
        return Err(anyhow::anyhow!("Icon size must be greater than 0").into());
    }

    let img = image::decode_rgba(input)?;
    let (icon, crop) = image::round_icon(&img, size)?;
    drop(img);

    image::save_png(&icon, output, compression)?;

    let edge = icon.width();
    log::info!("Created round icon: {} ({edge}x{edge})", output.display());

    Ok(GeneratedIcon {
        output: output.to_path_buf(),
        edge,
        crop,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Sequential,
    Parallel,
}

/// Result of one entry of an [`IconSet`]
#[derive(Debug)]
pub struct IconReport {
    pub spec: IconSpec,
    pub result: Result<GeneratedIcon, IconError>,
}

impl IconReport {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Generate every icon in `set`.
///
/// Entries are independent: a failure is logged and the remaining entries
/// still run. Parallel mode falls back to sequential when an entry writes over
/// the source or another entry's output.
pub fn generate_all(set: &IconSet, mode: RunMode) -> Vec<IconReport> {
    let run = |spec: &IconSpec| {
        let result = generate_with(&set.input, &spec.output, spec.size, set.compression);
        if let Err(e) = &result {
            log::error!("Failed to create {}: {e}", spec.output.display());
            if let Some(hint) = e.install_hint() {
                log::error!("{hint}");
            }
        }
        IconReport {
            spec: spec.clone(),
            result,
        }
    };

    match mode {
        RunMode::Parallel if set.has_aliased_outputs() => {
            log::warn!("Icon outputs overlap the source or each other, running sequentially");
            set.icons.iter().map(run).collect()
        }
        RunMode::Parallel => set.icons.par_iter().map(run).collect(),
        RunMode::Sequential => set.icons.iter().map(run).collect(),
    }
}
