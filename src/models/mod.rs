/// Immutable encoded symbol and its module queries
pub mod grid;
/// Packed boolean matrix
pub mod matrix;
pub mod point;
/// Version, level, mask and mode types
pub mod qr_code;

pub use grid::{Module, ModuleGrid, QUIET_ZONE};
pub use matrix::BitMatrix;
pub use point::{Point, Size};
pub use qr_code::{ECLevel, MaskPattern, Mode, Version};
