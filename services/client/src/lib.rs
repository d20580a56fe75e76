pub mod adapters;
pub mod config;
pub mod error;
pub mod views;

#[cfg(test)]
mod test_support;
