pub mod post;

pub use post::{Card, Info, Post};
