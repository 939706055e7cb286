use proptest::prelude::*;

/// Retry budgets small enough to keep scripted runs quick
pub fn max_retries_strategy() -> impl Strategy<Value = u32> {
    0u32..=5
}

/// Sequence of run outcomes, `true` meaning the run succeeds
pub fn run_outcomes_strategy() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 0..20)
}

/// Agent keys shaped like the built-in catalog
pub fn agent_key_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{2,8}([A-Z][a-z]{2,8}){0,2}Agent"
}
