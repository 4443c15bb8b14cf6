pub mod apmc;
pub mod diagnostics;
pub mod sqlite;
pub mod translation;
