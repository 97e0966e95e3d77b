mod books;
mod community;
mod fun;
mod goal;
mod help;
mod profile;
mod streak;

pub use books::{shelve, ShelfHandler};
pub use community::CommunityHandler;
pub use fun::FunHandler;
pub use goal::{check_progress, progress_reply, GoalHandler};
pub use help::HelpHandler;
pub use profile::ProfileHandler;
pub use streak::{advance_reply, apply_override, record_reading, StreakHandler};
