mod hold_and_toggle;
mod overrides_and_tags;
pub mod support;
