//! Value Objects - Immutable, identity-less domain primitives

mod cache_key;
mod city;

pub use cache_key::CacheKey;
pub use city::City;
