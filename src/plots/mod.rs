pub mod bar;
pub mod line;
pub mod pie;
mod plot;

pub use bar::BarPoint;
pub use pie::Slice;
pub use plot::Plot;
