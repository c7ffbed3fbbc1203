use crate::task;
use crate::Dimensions;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Clone, Debug)]
pub(crate) struct Magick(PathBuf);

impl Magick {
    pub fn which() -> Result<Self> {
        let path = which::which(exe!("magick"))
            .context("imagemagick not found on PATH, install it from https://imagemagick.org")?;
        Ok(Self(path))
    }

    pub fn resize(&self, input: &Path, size: Dimensions, output: &Path) -> Result<()> {
        task::run(
            Command::new(&self.0)
                .arg(input)
                .arg("-resize")
                .arg(geometry(size))
                .arg(output),
        )
    }
}

/// Geometry argument for one level. Requested level sizes keep the exact
/// halved values, but imagemagick rejects zero-sized geometry, so each axis
/// clamps to one pixel here.
fn geometry(size: Dimensions) -> String {
    format!("{}x{}", size.width.max(1), size.height.max(1))
}
