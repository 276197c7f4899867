pub mod feed;
pub mod health;
pub mod probe;
pub mod provider;
pub mod resolver;
