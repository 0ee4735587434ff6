//! Resume Record Store — Postgres rows for students, resumes and gap-report history,
//! plus the S3 bucket holding the uploaded documents.
//!
//! Resume and recommendation rows are append-only. Never UPDATE them.

pub mod documents;
pub mod recommendations;
pub mod resumes;
pub mod students;
