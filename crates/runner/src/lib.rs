pub mod daily;
pub mod message;
