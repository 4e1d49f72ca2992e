pub mod context;
pub mod pdf;
pub mod qr;

pub use self::{
    context::{normalize, RenderContext},
    pdf::Renderer,
};
