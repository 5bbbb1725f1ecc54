pub mod yahoo;

pub use yahoo::YahooPrices;
