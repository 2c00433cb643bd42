//! Flow State Machine
//!
//! A declarative table of named states drives the capture/edit/publish UI:
//! each state declares its visible widget rows, messages, view surface, an
//! optional modal, an optional on-enter side effect, and an optional
//! follow-up state for when its modal closes. A static button-to-state map
//! wires clicks to transitions.
//!
//! ```text
//! host click/close events → FlowMachine → FlowSurface (render + effects)
//!                               ↑
//!                          StateTable (immutable configuration)
//! ```
//!
//! # Module Structure
//!
//! - [`table`]: [`FlowState`] records, the standard table, the button map
//! - [`machine`]: [`FlowMachine`] transitions, modal lifecycle, rendering
//! - [`surface`]: the [`FlowSurface`] trait hosts implement
//!
//! # Key Entry Points
//!
//! - [`StateTable::standard`]: the full meme-creator flow
//! - [`FlowMachine::press`]: handle a button click
//! - [`FlowMachine::on_modal_closed`]: deliver a modal-close notification

mod machine;
mod surface;
mod table;

pub use machine::FlowMachine;
pub use surface::FlowSurface;
pub use table::{FlowState, StateTable};
