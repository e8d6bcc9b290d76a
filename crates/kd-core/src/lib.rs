pub mod history;
pub mod model;

pub use history::DrawingState;
pub use model::*;
