//! One-call construction of a rounded symbol outline
use log::debug;

use crate::encoder::{EncodeOptions, encode_with};
use crate::error::Result;
use crate::models::{ECLevel, ModuleGrid, Size};
use crate::path::sink::{PathSink, replay};
use crate::path::{PathCommand, PathOptions, synthesize_path};

/// Default output width and height
pub const DEFAULT_SIZE: f64 = 256.0;

/// Encoded grid together with its outline
#[derive(Debug, Clone, PartialEq)]
pub struct RoundedQr {
    /// The encoded symbol
    pub grid: ModuleGrid,
    /// Outline of the dark modules in output coordinates
    pub commands: Vec<PathCommand>,
    /// Target area the outline was fitted into
    pub size: Size,
}

impl RoundedQr {
    /// Feed the outline into `sink`
    pub fn replay<S: PathSink + ?Sized>(&self, sink: &mut S) {
        replay(&self.commands, sink);
    }
}

/// Payload plus encoding and drawing settings
///
/// ```
/// use rounded_qr::{Builder, ECLevel};
///
/// let qr = Builder::text("https://example.com")
///     .error_correction_level(ECLevel::Q)
///     .size(512.0, 512.0)
///     .build()
///     .unwrap();
/// assert!(!qr.commands.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Builder<'a> {
    payload: &'a [u8],
    encode: EncodeOptions,
    path: PathOptions,
    size: Size,
}

impl<'a> Builder<'a> {
    /// Encode raw bytes
    pub fn binary(payload: &'a [u8]) -> Self {
        Self {
            payload,
            encode: EncodeOptions::default(),
            path: PathOptions::default(),
            size: Size::new(DEFAULT_SIZE, DEFAULT_SIZE),
        }
    }

    /// Encode UTF-8 text
    pub fn text(text: &'a str) -> Self {
        Self::binary(text.as_bytes())
    }

    /// Error correction level (default M)
    pub fn error_correction_level(self, level: ECLevel) -> Self {
        Self {
            encode: self.encode.with_level(level),
            ..self
        }
    }

    /// Output area (default 256 x 256)
    pub fn size(self, width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            ..self
        }
    }

    /// Corner radii
    pub fn path_options(self, path: PathOptions) -> Self {
        Self { path, ..self }
    }

    /// Replace all encoder settings, level included
    pub fn encode_options(self, encode: EncodeOptions) -> Self {
        Self { encode, ..self }
    }

    /// Encode and synthesize the outline
    pub fn build(&self) -> Result<RoundedQr> {
        let grid = encode_with(self.payload, &self.encode)?;
        let commands = synthesize_path(&grid, self.size.width, self.size.height, &self.path);
        debug!(
            "built {}x{} symbol into {} commands",
            grid.size(),
            grid.size(),
            commands.len()
        );
        Ok(RoundedQr {
            grid,
            commands,
            size: self.size,
        })
    }

    /// Encode, synthesize and replay the outline into `sink`
    pub fn build_with_sink<S: PathSink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        self.build()?.replay(sink);
        Ok(())
    }
}
