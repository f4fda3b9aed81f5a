pub mod protocol;
pub mod entities;
pub mod templates;

pub use protocol::*;
pub use entities::*;
pub use templates::*;
