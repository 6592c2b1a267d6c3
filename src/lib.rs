// src/lib.rs

pub mod core;
pub mod error;
pub mod index;
pub mod persistence;
pub use crate::core::engine::TaPhone;
pub use crate::core::types::{KeyLevel, PhoneticKey, WordId};
pub use crate::error::{PhoneError, Result};
pub use crate::index::PhoneticIndex;
