pub mod load;
pub mod source_check;
pub mod transform;

pub use load::{load, LoadSummary};
pub use source_check::source_check;
pub use transform::{transform, TransformSummary};
