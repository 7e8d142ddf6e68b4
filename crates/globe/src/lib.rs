pub mod frame;
pub mod picking;
pub mod resolver;
pub mod rotation;
pub mod spin;

pub use frame::*;
pub use resolver::*;
pub use rotation::*;
