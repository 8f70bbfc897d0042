// Resume screening: upload → parse → rank → keywords → summaries.
// The ranking itself lives in `crate::ranking`; this module wires collaborators around it.

pub mod handlers;
pub mod service;
