//! Input form
//!
//! Twenty typed fields (sliders, number inputs, yes/no choices) that yield a
//! feature record on explicit submission.

pub mod collector;
pub mod fields;

pub use collector::{FormEvent, InputForm};
pub use fields::{field, FieldSpec, Placement, Widget, FORM_FIELDS};
