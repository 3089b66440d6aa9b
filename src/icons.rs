//! Main module for iconsync library functionality

pub mod classify;
pub mod config;
pub mod error;
pub mod files;
pub mod formats;
pub mod metadata;
pub mod naming;
pub mod normalize;
pub mod processor;
pub mod query;

pub use error::{IconError, ProcessingError};
pub use metadata::{parse, IconRecord};
pub use processor::{process, IconProcessor, ProcessedIcon, VariantOverride};
