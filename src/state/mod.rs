/// State management module
///
/// This module handles all application state, including:
/// - The product record and image references (data.rs)
/// - The product form: fields, errors and image staging (form.rs)
/// - Products saved during the session (catalog.rs)

pub mod catalog;
pub mod data;
pub mod form;
