//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from page and component
//! logic so route guards and storage stay testable off the browser.

pub mod auth;
pub mod storage;
