mod builder;
pub mod probes;
mod site;

pub use builder::{ArticleUrl, Mediahuis, URL_REGEX, extract_article};
pub use site::Site;
