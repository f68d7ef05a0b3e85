//! Application Ports (Driven)
//!
//! Interfaces the application uses to reach the outside world.

mod news_publisher_port;

pub use news_publisher_port::{
    InMemoryNewsPublisher, LogNewsPublisher, NewsPublishError, NewsPublisherPort,
    NoOpNewsPublisher,
};
