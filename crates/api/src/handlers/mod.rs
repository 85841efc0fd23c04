pub mod analysis;
pub mod products;
