pub mod model;
pub mod pagination;
pub mod quiz;
