pub mod default;
pub mod error;
pub mod metadata;
pub mod platform_extractor;
pub mod platforms;
pub mod smuggle;
pub mod utils;
