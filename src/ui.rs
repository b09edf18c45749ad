// src/ui.rs

pub mod console;
pub mod memory;
pub mod widgets;

pub use console::{ConsoleChart, ConsoleLayer, ConsoleView};
pub use memory::{MemoryChart, MemoryLayer, MemoryView};
pub use widgets::{
    Control, DashboardView, Notification, NotificationLevel, PointLayer, SeriesChart, SiteCard,
    Slot, SystemStatus,
};
