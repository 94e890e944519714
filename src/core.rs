pub mod point;
pub mod rates;
pub mod transform;
