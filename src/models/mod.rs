pub mod settings;
pub mod window;
pub mod window_layout;

pub use settings::Settings;
pub use window::{WindowHandle, WindowInfo};
pub use window_layout::{LayoutMap, Point, Size, WindowLayout};
