pub mod config;
pub mod corpus;
pub mod error;
pub mod geometry;
pub mod layouts;
pub mod model;
pub mod optimizer;
pub mod scorer;
// cmd and reports are binary modules; the data they render lives here.
