pub mod issue;
pub mod server;

pub use issue::*;
pub use server::*;
