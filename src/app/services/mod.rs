//! Services layer - business operations and utilities.
//!
//! This module contains business logic and operations:
//! - The presentation reducer
//! - Undo/redo history
//! - Persistence of the presentation list
//! - Built-in templates
//! - HTML/PDF export plumbing

pub mod export;
pub mod history;
pub mod reducer;
pub mod storage;
pub mod templates;
