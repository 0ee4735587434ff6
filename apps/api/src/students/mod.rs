// Student profiles and their gap-report history.

pub mod handlers;
