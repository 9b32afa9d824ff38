//! Controllers layer - orchestration and coordination.
//!
//! This module contains controllers that coordinate between
//! domain models, services, and the UI:
//! - Editor session (dispatch, history, persistence, selection)
//! - Presentation library (home screen)
//! - Drag and resize gestures
//! - Presentation playback

pub mod editor;
pub mod gesture;
pub mod library;
pub mod player;
