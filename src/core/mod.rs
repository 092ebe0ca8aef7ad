pub mod bullets;
pub mod matcher;
