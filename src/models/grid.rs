use std::fmt;

use super::{BitMatrix, ECLevel, MaskPattern, Version};

/// Light margin around the symbol, in modules
pub const QUIET_ZONE: usize = 4;

/// A single module as seen by callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Module {
    /// Part of a finder, separator, timing, alignment, format or version pattern
    Function(bool),
    /// Carries (masked) codeword bits
    Data(bool),
}

impl Module {
    /// True for dark modules of either kind
    pub fn is_dark(&self) -> bool {
        match self {
            Module::Function(dark) | Module::Data(dark) => *dark,
        }
    }
}

/// Final, masked QR symbol
///
/// Produced once by the encoder and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleGrid {
    modules: BitMatrix,
    function: BitMatrix,
    version: Version,
    ec_level: ECLevel,
    mask: MaskPattern,
}

impl ModuleGrid {
    pub(crate) fn new(
        modules: BitMatrix,
        function: BitMatrix,
        version: Version,
        ec_level: ECLevel,
        mask: MaskPattern,
    ) -> Self {
        debug_assert_eq!(modules.width(), version.size());
        debug_assert_eq!(function.width(), version.size());
        Self {
            modules,
            function,
            version,
            ec_level,
            mask,
        }
    }

    /// Side length in modules, without the quiet zone
    pub fn size(&self) -> usize {
        self.version.size()
    }

    /// Version picked for the payload
    pub fn version(&self) -> Version {
        self.version
    }

    /// Error correction level written into the format information
    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    /// Mask pattern applied to the data modules
    pub fn mask_pattern(&self) -> MaskPattern {
        self.mask
    }

    /// True if the module at (x, y) is dark; out of range is light
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.modules.get(x, y)
    }

    /// True if the module at (x, y) belongs to a function pattern
    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.function.get(x, y)
    }

    /// Module at (x, y)
    pub fn module(&self, x: usize, y: usize) -> Module {
        let dark = self.modules.get(x, y);
        if self.function.get(x, y) {
            Module::Function(dark)
        } else {
            Module::Data(dark)
        }
    }

    /// Module colors as a matrix (true = dark)
    pub fn matrix(&self) -> &BitMatrix {
        &self.modules
    }

    /// Side length including the quiet zone on both sides
    pub fn bordered_size(&self) -> usize {
        self.size() + 2 * QUIET_ZONE
    }

    /// Like [`ModuleGrid::is_dark`] but in coordinates that include the quiet zone
    pub fn is_dark_bordered(&self, x: usize, y: usize) -> bool {
        if x < QUIET_ZONE || y < QUIET_ZONE {
            return false;
        }
        self.modules.get(x - QUIET_ZONE, y - QUIET_ZONE)
    }

    /// Number of dark modules
    pub fn dark_count(&self) -> usize {
        self.modules.count_ones()
    }
}

impl fmt::Display for ModuleGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = self.bordered_size();
        for y in 0..side {
            for x in 0..side {
                f.write_str(if self.is_dark_bordered(x, y) { "██" } else { "  " })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
