mod amount;
mod sale;
mod summary;

pub use amount::*;
pub use sale::*;
pub use summary::*;
