pub mod cursive;
pub mod mutex;
