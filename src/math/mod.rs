mod point;
pub use point::*;

mod timing;
pub use timing::*;
