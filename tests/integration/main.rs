//! Integration tests: the full fixture → report pipeline through the
//! public API only.

mod pipeline;
mod support;
