pub mod hole;
pub use hole::*;

pub mod par;
pub use par::*;

pub mod round;
pub use round::*;
