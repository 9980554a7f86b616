pub mod bits;
pub mod clock;
pub mod config;
pub mod field;
pub mod height_field;
pub mod host;
pub mod run;
pub mod texture;

pub use config::{RippleConfig, RunConfig};
pub use field::{CacheBlock, RippleField, RippleField128, RippleField64};
pub use texture::{Image, Pixel, TextureHandle};
