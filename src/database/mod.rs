pub mod manager;
pub mod models;
pub mod products;
pub mod users;

pub use manager::{DatabaseError, DatabaseManager};
pub use products::ProductRepository;
pub use users::UserRepository;
