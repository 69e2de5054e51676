pub mod refresh;
pub mod services;
pub mod time;
pub mod utils;
pub mod views;

pub use refresh::{RefreshTicket, SummaryState};
pub use time::{Clock, FixedClock, SystemClock};
pub use views::{load_dashboard, load_resume, DashboardSnapshot};
