//! Serde data types shared by the registry, the renderers and the adapters.

pub mod branding;
pub mod carousel;
pub mod colors;
pub mod slide;
pub mod template;
