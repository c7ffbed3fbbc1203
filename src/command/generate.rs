use crate::magick::Magick;
use crate::task::TaskRunner;
use crate::{Dimensions, MipmapRequest};
use anyhow::{Context, Result};
use image::ImageReader;
use std::path::{Path, PathBuf};

/// Generates the full mipmap chain for the request, one file per level.
///
/// Every level is resampled from the original source image rather than from
/// the previous level. A failed invocation aborts the remaining levels;
/// files written by earlier levels are left in place.
pub fn generate(request: &MipmapRequest) -> Result<Vec<PathBuf>> {
    let base = probe(request.input())?;
    let levels = request.levels(base);
    let magick = Magick::which()?;
    if let Some(parent) = request.output().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    let mut runner = TaskRunner::new(levels.len() as u32, request.verbose());
    let mut written = Vec::with_capacity(levels.len());
    for level in &levels {
        runner.start_task(format!(
            "Resampling {} to {}",
            request.input().display(),
            level.dimensions,
        ));
        magick.resize(request.input(), level.dimensions, &level.output_path)?;
        runner.end_task();
        written.push(level.output_path.clone());
    }
    Ok(written)
}

fn probe(input: &Path) -> Result<Dimensions> {
    let (width, height) = ImageReader::open(input)
        .with_context(|| format!("failed to open image {}", input.display()))?
        .into_dimensions()
        .with_context(|| format!("failed to decode image {}", input.display()))?;
    Ok(Dimensions::new(width, height))
}
