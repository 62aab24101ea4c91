mod ev_box;
mod ev_detection;
mod ev_rect;
mod label_table;
mod processor_config;

pub use ev_box::*;
pub use ev_detection::*;
pub use ev_rect::*;
pub use label_table::*;
pub use processor_config::*;
