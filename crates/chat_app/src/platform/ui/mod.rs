pub mod completion;
pub mod constants;
pub mod input;
pub mod layout;
pub mod render;
pub mod terminal;
