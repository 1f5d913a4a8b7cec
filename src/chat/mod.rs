// src/chat/mod.rs
//
// The rule-based chat response selector: ordered keyword groups over
// normalized input, knowledge-base interpolation, and the fixed Hindi
// token-substitution pass.

pub mod hindi;
pub mod responder;

pub use hindi::translate_to_hindi;
pub use responder::generate_response;
