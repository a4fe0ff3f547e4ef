//! Video extraction for the Mediahuis news sites (Het Nieuwsblad, De Standaard,
//! Gazet van Antwerpen, Het Belang van Limburg and De Limburger).
//!
//! ```rust,no_run
//! use mediahuis_parser::extractor::{
//!     default::default_client, platform_extractor::PlatformExtractor, platforms::Mediahuis,
//! };
//!
//! # async fn run() -> Result<(), mediahuis_parser::extractor::error::ExtractorError> {
//! let extractor = Mediahuis::new(
//!     "http://www.nieuwsblad.be/cnt/dmf20151124_01986463",
//!     default_client()?,
//! );
//! let info = extractor.extract().await?;
//! println!("{}", info.to_json_pretty()?);
//! # Ok(())
//! # }
//! ```

pub mod extractor;
pub mod media;

pub use extractor::error::ExtractorError;
pub use extractor::platforms::{Mediahuis, Site};
pub use media::{MediaFormat, VideoInfo, VideoTarget};
