pub mod error;
pub mod header;
pub mod middlewares;
