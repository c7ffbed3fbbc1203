use anyhow::{Context, Result};
use clap::Parser;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[macro_export]
macro_rules! exe {
    ($name:expr) => {
        if cfg!(target_os = "windows") {
            concat!($name, ".exe")
        } else {
            $name
        }
    };
}

pub mod command;
mod magick;
mod task;

/// File extension used for generated levels when `--encoding` is omitted.
pub const DEFAULT_ENCODING: &str = "qoi";

#[derive(Parser)]
pub struct GenerateArgs {
    /// Source image file
    #[clap(long, value_name = "path")]
    input: Option<PathBuf>,
    /// Output path prefix (directory and base filename, without extension)
    #[clap(long, value_name = "path")]
    output: Option<PathBuf>,
    /// Image format of the generated levels, used verbatim as the file extension
    #[clap(long, value_name = "format", default_value = DEFAULT_ENCODING)]
    encoding: String,
    /// Use verbose output
    #[clap(long, short)]
    verbose: bool,
}

#[derive(Debug)]
pub struct MipmapRequest {
    input: PathBuf,
    output: PathBuf,
    encoding: String,
    verbose: bool,
}

impl MipmapRequest {
    pub fn new(args: GenerateArgs) -> Result<Self> {
        let input = args.input.context("missing required argument --input")?;
        let output = args.output.context("missing required argument --output")?;
        Ok(Self {
            input,
            output,
            encoding: args.encoding,
            verbose: args.verbose,
        })
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Path of the level with the given index: `{output}_{index}.{encoding}`.
    pub fn level_path(&self, index: u32) -> PathBuf {
        let mut path = OsString::from(self.output.as_os_str());
        path.push(format!("_{}.{}", index, self.encoding));
        path.into()
    }

    /// Full level sequence for a source of the given size. Every level is
    /// resampled from the original source, so the sequence can be computed
    /// up front. The chain ends when the larger dimension reaches zero; the
    /// smaller axis can bottom out at zero in earlier levels.
    pub fn levels(&self, base: Dimensions) -> Vec<MipLevel> {
        let mut levels = Vec::new();
        let mut dimensions = base;
        let mut scale = base.scale();
        let mut index = 0;
        while scale != 0 {
            levels.push(MipLevel {
                index,
                dimensions,
                output_path: self.level_path(index),
            });
            index += 1;
            dimensions = dimensions.halved();
            scale /= 2;
        }
        levels
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The larger dimension, which gates the length of the chain.
    pub fn scale(self) -> u32 {
        self.width.max(self.height)
    }

    pub fn halved(self) -> Self {
        Self {
            width: self.width / 2,
            height: self.height / 2,
        }
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Clone, Debug)]
pub struct MipLevel {
    pub index: u32,
    pub dimensions: Dimensions,
    pub output_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(args: &[&str]) -> MipmapRequest {
        let args = GenerateArgs::try_parse_from(args).unwrap();
        MipmapRequest::new(args).unwrap()
    }

    #[test]
    fn encoding_defaults_to_qoi() {
        let request = request(&["mipgen", "--input", "a.png", "--output", "out/tex"]);
        assert_eq!(request.encoding(), "qoi");
    }

    #[test]
    fn missing_input_is_rejected_before_any_io() {
        let args = GenerateArgs::try_parse_from(["mipgen", "--output", "out/tex"]).unwrap();
        let err = MipmapRequest::new(args).unwrap_err();
        assert_eq!(err.to_string(), "missing required argument --input");
    }

    #[test]
    fn missing_output_is_rejected_before_any_io() {
        let args = GenerateArgs::try_parse_from(["mipgen", "--input", "a.png"]).unwrap();
        let err = MipmapRequest::new(args).unwrap_err();
        assert_eq!(err.to_string(), "missing required argument --output");
    }

    #[test]
    fn chain_for_64x32() {
        let request = request(&["mipgen", "--input", "a.png", "--output", "out/tex"]);
        let levels = request.levels(Dimensions::new(64, 32));
        let sizes: Vec<_> = levels
            .iter()
            .map(|level| (level.dimensions.width, level.dimensions.height))
            .collect();
        assert_eq!(
            sizes,
            [
                (64, 32),
                (32, 16),
                (16, 8),
                (8, 4),
                (4, 2),
                (2, 1),
                (1, 0),
            ]
        );
        for (i, level) in levels.iter().enumerate() {
            assert_eq!(level.index, i as u32);
            assert_eq!(level.output_path, Path::new(&format!("out/tex_{i}.qoi")));
        }
    }

    #[test]
    fn chain_length_is_log2_of_larger_dimension_plus_one() {
        for (width, height) in [(1u32, 1u32), (2, 2), (3, 5), (64, 32), (1920, 1080), (1, 1024)] {
            let request = request(&["mipgen", "--input", "a.png", "--output", "tex"]);
            let levels = request.levels(Dimensions::new(width, height));
            let expected = 32 - width.max(height).leading_zeros();
            assert_eq!(levels.len() as u32, expected, "{width}x{height}");
        }
    }

    #[test]
    fn level_dimensions_follow_integer_halving() {
        let request = request(&["mipgen", "--input", "a.png", "--output", "tex"]);
        for level in request.levels(Dimensions::new(1920, 1080)) {
            assert_eq!(level.dimensions.width, 1920 >> level.index);
            assert_eq!(level.dimensions.height, 1080 >> level.index);
        }
    }

    #[test]
    fn custom_encoding_is_used_verbatim() {
        let request = request(&[
            "mipgen", "--input", "a.png", "--output", "out/tex", "--encoding", "png",
        ]);
        assert_eq!(request.level_path(3), Path::new("out/tex_3.png"));
    }

    #[test]
    fn zero_sized_source_yields_no_levels() {
        let request = request(&["mipgen", "--input", "a.png", "--output", "tex"]);
        assert!(request.levels(Dimensions::new(0, 0)).is_empty());
    }
}
