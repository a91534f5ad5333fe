//! Scripted CRUD commands. Each returns a human-readable error string and
//! stops at the first failing operation.

pub mod delete;
pub mod list;
pub mod seed;
pub mod update;

use tablebook_core::RepoError;

pub(crate) fn describe(step: &str, err: RepoError) -> String {
    format!("{step} failed: {err}")
}
