pub mod converter;
pub mod engine;
pub mod glyphs;
pub mod patterns;
pub mod types;
