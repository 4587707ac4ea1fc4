//! cardnews composes square news-card images from a background and a few blocks of text.
//!
//! The pieces, bottom up:
//!
//! - [`text`]: font resolution with a built-in fallback, line measurement and greedy wrapping
//! - [`render`]: the RGBA [`Canvas`], seeded gradients, overlays and contrast-based text color
//! - [`layout`]: centered text blocks and the four-slot brand card
//! - [`template`]: mapping design-document geometry to canvas pixels and matting frame backgrounds
//! - [`card`]: the end-to-end card pipelines, including parallel batch rendering
#![forbid(unsafe_code)]

mod foundation;

pub mod card;
pub mod config;
pub mod layout;
pub mod render;
pub mod template;
pub mod text;

pub use crate::foundation::core::{PixelBox, RenderOptions, Rgb, RgbImage, Rgba, RgbaImage};
pub use crate::foundation::error::{CardError, CardResult};

pub use crate::card::{
    BrandCardOptions, CardFonts, CardInput, create_brand_card, create_card, render_batch,
};
pub use crate::config::CardConfig;
pub use crate::layout::block::{BlockLayoutEngine, TextBlock};
pub use crate::layout::brand::{BrandCardText, BrandFonts};
pub use crate::render::canvas::{Background, Canvas};
pub use crate::render::gradient::{Gradient, generate_gradient, generate_prompt_gradient};
pub use crate::template::compose::{SlotText, TemplateRequest, compose_template, resolve_template};
pub use crate::template::matte::MattePolicy;
pub use crate::text::font::{FontCache, FontResolver, FontSpec};
