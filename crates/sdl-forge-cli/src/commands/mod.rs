pub mod completions;
pub mod edit;
pub mod fmt;
pub mod inspect;
pub mod parse;
