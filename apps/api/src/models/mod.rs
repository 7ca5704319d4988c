pub mod analysis;
pub mod comparison;
pub mod profile;
pub mod recommendation;
pub mod resume;
