//! Helper functions shared by the rendering layer

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
