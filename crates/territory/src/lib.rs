pub mod polygon;
pub mod set;
pub mod store;

pub use polygon::*;
pub use set::*;
pub use store::*;
