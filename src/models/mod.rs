//! 列表数据模型与统一响应信封
//! Listing data models and the uniform response envelope

pub mod city;
pub mod envelope;
pub mod hotel;

pub use city::City;
pub use envelope::Envelope;
pub use hotel::Hotel;
