pub mod special_float;
pub mod value;
pub mod writer;
