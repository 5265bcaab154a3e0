/// Session state module
///
/// This module handles all booth-session state, including:
/// - The captured photos and slot assignment (session.rs)
/// - Named visual filters and their pixel math (filter.rs)

pub mod filter;
pub mod session;
