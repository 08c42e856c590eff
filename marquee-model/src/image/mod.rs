pub mod dimensions;
pub mod display_box;
pub mod handle;
pub mod request;
pub mod variant;

pub use dimensions::*;
pub use display_box::*;
pub use handle::*;
pub use request::*;
pub use variant::*;
