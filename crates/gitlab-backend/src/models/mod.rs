mod issue;
mod version;

pub use issue::*;
pub use version::*;
