pub mod drain;
pub mod event;
pub mod event_queue;
pub mod frame;
pub mod hail;
pub mod help;
pub mod load;
pub mod messages;
pub mod scan;
