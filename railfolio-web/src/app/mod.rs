//! Page shell: a pure [`view::JourneyView`] plus, in the browser, the live
//! wiring that feeds it from a running session.

#[cfg(target_arch = "wasm32")]
mod live;
pub mod runtime;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub use live::App;
pub use runtime::{Frame, Overlay, PageAction};
pub use view::JourneyView;
