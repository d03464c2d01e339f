//! Client surface: builder, dispatch core, and the endpoint bindings.
//!
//! The endpoint modules (`chat`, `assistants`, `vector_stores`) contain no
//! logic of their own; each method selects an entry from the endpoint
//! table, shapes its payload, and delegates to the shared pipeline in
//! [`core`].

mod assistants;
mod builder;
mod chat;
mod core;
mod vector_stores;

pub use self::builder::ClientBuilder;
pub use self::core::OpenAiClient;
