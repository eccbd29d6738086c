//! Importers for external graph formats.

pub mod dimacs;
