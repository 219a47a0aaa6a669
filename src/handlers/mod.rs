pub mod analytical;
pub mod common;
pub mod health;
pub mod typical;
