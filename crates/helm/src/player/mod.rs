pub mod info;
pub mod mission;
