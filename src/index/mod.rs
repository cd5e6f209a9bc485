pub mod term_dictionary;
pub mod ordinals;
pub mod field_cache;
