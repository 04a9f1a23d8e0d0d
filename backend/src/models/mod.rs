pub mod coach;
pub mod error;
pub mod holiday;
pub mod macros;
pub mod material;
pub mod time;

pub use coach::*;
pub use error::DomainError;
pub use holiday::*;
pub use material::*;
pub use time::*;
