//! Widgets that make up the chat screen.

pub mod header;
pub mod help;
pub mod input_area;
pub mod message_list;
pub mod sidebar;

pub use header::{Header, HEADER_HEIGHT};
pub use help::HelpOverlay;
pub use input_area::{InputArea, KEY_HINT, PLACEHOLDER};
pub use message_list::{MessageList, TranscriptLayout};
pub use sidebar::{Sidebar, SIDEBAR_WIDTH};
