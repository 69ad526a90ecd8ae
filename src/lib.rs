pub mod client;
pub mod config;
pub mod converters;
pub mod errors;
pub mod models;
pub mod service;
pub mod templates;
pub mod wasm;

#[cfg(test)]
mod test_support;

pub use client::{LinkedInClient, PostResult};
pub use config::{LinkedInConfig, LinkedInCredentials};
pub use converters::markdown;
pub use converters::pdf::{render_carousel, render_carousel_document, PagePreset};
pub use errors::{CarouselError, Result};
pub use models::carousel::{Carousel, CarouselStatus};
pub use models::slide::Slide;
pub use models::template::Template;
pub use service::{export_carousel, publish_carousel, CarouselStore, ExportedDocument, StatusUpdate};
pub use templates::{get_template, list_templates};
