// HTTP routes
pub mod health;
pub mod posts;
pub mod tags;
pub mod token;

pub use health::*;
pub use posts::*;
pub use tags::*;
pub use token::*;
