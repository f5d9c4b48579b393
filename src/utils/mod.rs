//! Small shared helpers.

pub mod date;
pub mod html;
pub mod mime;
pub mod path;
