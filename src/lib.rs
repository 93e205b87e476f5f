pub mod copier;
pub mod index;
pub mod manifest;
