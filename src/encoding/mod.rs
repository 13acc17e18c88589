pub mod features;
pub mod identifier;
pub mod name;
