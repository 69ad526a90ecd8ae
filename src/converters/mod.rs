pub mod markdown;
pub mod pdf;
