pub mod controller;
pub mod messages;
pub mod notifications;
pub mod stats;
