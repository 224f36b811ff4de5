//! Integration tests for the bubble canvas.
//!
//! These drive the controller with pointer events against a real `ItemList`
//! and check the committed results end-to-end.

mod mask_workflow_tests;
mod undo_tests;
