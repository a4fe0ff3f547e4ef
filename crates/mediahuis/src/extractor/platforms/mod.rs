pub mod kaltura;
pub mod mediahuis;

pub use mediahuis::{Mediahuis, Site};
