pub mod error;
pub mod export;
pub mod ipc;
pub mod ledger;
pub mod logging;
pub mod model;
pub mod roster;
pub mod session;
pub mod stats;
pub mod store;
pub mod tracker;

pub use error::{StoreError, TrackerError};
pub use model::{AttendanceRecord, Class, Session, Status, Student};
pub use tracker::Tracker;
