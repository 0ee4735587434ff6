// Skill-gap core: normalization, gap computation, report composition.
// Everything here except `handlers` is synchronous and pure.

pub mod gap;
pub mod handlers;
pub mod normalize;
pub mod report;
