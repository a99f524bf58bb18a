pub mod tag;

pub use tag::Tags;
