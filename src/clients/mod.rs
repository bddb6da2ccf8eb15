pub mod handlers;
pub mod repository;
pub mod service;

pub use handlers::*;
pub use repository::*;
pub use service::*;
