//! Quantity grammar for plan items.
//!
//! The same free-text quantity is read two ways: [`parse_display`] keeps the
//! unit text as written for shopping lists, [`parse_normalized`] reduces it
//! to grams, millilitres or a count for costing. Both share one [`lexer`].

mod display;
pub mod lexer;
mod normalize;

pub use display::*;
pub use normalize::*;
