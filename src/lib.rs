//! Vkusnosam recipe form: the "add preparation step" expander, the
//! in-memory document it runs on, and a small actix-web preview surface.

pub mod config;
pub mod dom;
pub mod errors;
pub mod expander;
pub mod handlers;
pub mod recipe_form;
pub mod templates_structs;
