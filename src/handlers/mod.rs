// handlers/mod.rs - one module per resource family
//
// Each handler validates its path ids, makes a single store call and answers
// with the response envelope. Handlers share nothing but `AppState`.
pub mod comments;
pub mod movies;
pub mod service;
pub mod theaters;
pub mod utils;
