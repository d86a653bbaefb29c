mod analysis;
mod source;

pub use analysis::*;
pub use source::*;
