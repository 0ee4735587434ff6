// Resume upload, record lookup, and per-resume gap reports.

pub mod handlers;
pub mod upload;
