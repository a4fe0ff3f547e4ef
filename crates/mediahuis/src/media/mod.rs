pub mod media_format;
pub mod media_info;

pub use media_format::MediaFormat;
pub use media_info::{DelegateExtractor, VideoInfo, VideoInfoBuilder, VideoTarget};
