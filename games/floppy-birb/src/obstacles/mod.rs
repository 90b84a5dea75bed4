pub mod controller;
pub mod field;
pub mod pair;
pub mod scale;
