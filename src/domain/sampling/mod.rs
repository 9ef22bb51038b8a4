//! Sampling domain module.
//!
//! Documents attached to sampling activities.

mod media;
mod sampling_documentation;

pub use media::{MediaReference, DEFAULT_MEDIA_CONTEXT, FILE_PROVIDER};
pub use sampling_documentation::SamplingDocumentation;
