// Application layer - Polling engine and widget composition
pub mod fetcher;
pub mod poller;
pub mod state;
pub mod widget;
