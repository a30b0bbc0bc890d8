pub mod errors;
pub mod jwt;
pub mod numbering;
pub mod validation;
