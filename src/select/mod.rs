//! Interactive index selection.
//!
//! A [`machine::SelectionDialog`] walks the user through picking a set of
//! axis indices: choose a mode (`range` or `list`), type the indices,
//! pass validation, confirm. All console traffic goes through the
//! [`prompt::PromptSource`] capability so tests can script whole dialogs.

pub mod machine;
pub mod prompt;
