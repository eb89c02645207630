//! Terminal front end: view rendering and the interactive shell loop.

pub mod shell;
pub mod view;
