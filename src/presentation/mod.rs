// Presentation layer - panel rendering and the terminal shell
pub mod content;
pub mod panels;
pub mod shell;
