pub mod scripted_source;

pub use scripted_source::{ConstSource, ScriptedSource};
