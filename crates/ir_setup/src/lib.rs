//! Interactive setup for the incident-response stacks: input validators and
//! the wizard that collects operator-supplied deployment settings.

pub mod validators;
pub mod wizard;
