pub mod standings;
pub use standings::*;

pub mod window;
pub use window::*;
