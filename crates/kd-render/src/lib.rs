pub mod backdrop;
pub mod error;
pub mod flatten;
pub mod paint;

pub use backdrop::{Backdrop, BackdropImage};
pub use error::RasterError;
pub use flatten::{SceneSnapshot, encode_png, flatten};
pub use paint::render;
