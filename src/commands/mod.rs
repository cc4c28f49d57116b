pub mod layouts;
pub mod logs;
pub mod windows;
