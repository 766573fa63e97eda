//! Reusable widgets.

mod base;
mod button;
mod input;
mod label;
mod slider;
mod table;

pub use base::{Widget, WidgetBase, clip};
pub use button::Button;
pub use input::TextInput;
pub use label::{Label, LabelTone};
pub use slider::Slider;
pub use table::ServerTable;
