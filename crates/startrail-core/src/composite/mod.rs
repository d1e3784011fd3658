pub mod accumulator;
pub mod layer;
pub mod lighten;
pub mod window;

pub use accumulator::{composite, Accumulator, AccumulatorMode, LayerStack};
pub use layer::{InsertPosition, Layer};
pub use lighten::lighten_blend;
pub use window::enforce_limit;
