pub mod engine;

pub use engine::{
    Canceler, PropagationStrategy, PropagationSummary, Reactor, ReactorConfig, new_reactor,
};
