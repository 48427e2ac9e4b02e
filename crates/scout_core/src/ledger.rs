use crate::SearchOutcome;

/// Local cache of the account's remaining search credits.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreditLedger {
    remaining: Option<f64>,
}

impl CreditLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remaining(&self) -> Option<f64> {
        self.remaining
    }

    pub(crate) fn set_remaining(&mut self, credits: f64) {
        self.remaining = Some(credits);
    }
}

/// Emitted once per successful search so credit and saved-result views can
/// re-fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshSignal {
    pub result_id: Option<String>,
}

/// Applies a successful outcome to the ledger.
///
/// Returns `None` and leaves the ledger untouched if the outcome carries a
/// non-finite balance.
pub fn reconcile(ledger: &mut CreditLedger, outcome: &SearchOutcome) -> Option<RefreshSignal> {
    if !outcome.credits_remaining.is_finite() || !outcome.credits_charged.is_finite() {
        return None;
    }
    ledger.set_remaining(outcome.credits_remaining);
    Some(RefreshSignal {
        result_id: outcome.result_id.clone(),
    })
}
