//! Application state module

mod alias_form;
mod aliases;
mod app_state;
mod forms;
mod list_actions;
mod payloads;
mod profile;

pub use alias_form::*;
pub use aliases::*;
pub use app_state::*;
pub use forms::*;
pub use list_actions::*;
pub use payloads::*;
pub use profile::*;

#[cfg(test)]
pub(crate) use aliases::test_support;
