pub mod doc_values;
pub mod value_source;
pub mod ord_field;
pub mod reverse_ord_field;
pub mod const_source;
pub mod parser;
