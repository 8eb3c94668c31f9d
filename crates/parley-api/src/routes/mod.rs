pub mod health;
pub mod messages;
pub mod page;
pub mod session;
