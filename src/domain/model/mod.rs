//! Domain model definitions for the trivia tables.

pub mod category;
pub mod question;

pub use category::{Category, CategoryMap};
pub use question::{NewQuestion, Question};
