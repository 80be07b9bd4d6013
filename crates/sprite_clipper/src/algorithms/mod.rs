pub mod mask;
pub mod regions;
pub mod hull;

pub use mask::*;
pub use regions::*;
pub use hull::*;
