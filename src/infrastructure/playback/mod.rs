//! Media element adapters

mod rodio_element;
mod virtual_element;

pub use rodio_element::RodioMediaElement;
pub use virtual_element::VirtualMediaElement;
