pub mod content;
pub mod engagement;
pub mod profile;
pub mod roles;
pub mod stats;
pub mod storage;
pub mod upload;
