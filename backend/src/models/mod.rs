pub mod parish;
pub mod scope;

pub use parish::*;
pub use scope::*;
