//! Supply/demand balancing.
//!
//! # Algorithm
//!
//! If total supply and total demand differ by more than the tolerance, one
//! synthetic node absorbs the difference:
//!
//! ```text
//! supply > demand  →  append "Dummy Destination" with demand  = supply - demand
//! demand > supply  →  append "Dummy Source"      with supply  = demand - supply
//! ```
//!
//! Every route touching the synthetic node costs zero. Downstream stages
//! then only ever see balanced problems, so every allocation satisfies its
//! row and column totals exactly.

mod balancer;

pub use balancer::{balance, Balance, BalancedProblem, DUMMY_DESTINATION, DUMMY_SOURCE};
