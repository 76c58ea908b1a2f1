//! Command execution contract
//!
//! Every unit of work touching the node or the key-custody daemon is a
//! `Command`: immutable request parameters, one `run`, one terminal
//! `CommandResult`. Anticipated failures are captured into the result;
//! unanticipated defects panic and propagate instead of being coerced
//! into a result. The retry wrapper re-invokes a command at most once,
//! and only after a successful fix-up of a designated precondition
//! failure.

use crate::error::WalletError;

/// Terminal value of one command execution
///
/// Exactly one of value/error is present, matching `success()`.
#[derive(Debug, Clone)]
pub struct CommandResult<T> {
    value: Option<T>,
    error: Option<WalletError>,
}

impl<T> CommandResult<T> {
    pub fn ok(value: T) -> Self {
        Self {
            value: Some(value),
            error: None,
        }
    }

    pub fn err(error: WalletError) -> Self {
        Self {
            value: None,
            error: Some(error),
        }
    }

    pub fn success(&self) -> bool {
        self.value.is_some()
    }

    pub fn error_occurred(&self) -> bool {
        self.error.is_some()
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn error(&self) -> Option<&WalletError> {
        self.error.as_ref()
    }

    /// Fail-fast escape hatch for call sites that already checked
    /// `success()`.
    ///
    /// # Panics
    ///
    /// Panics with the captured error message when the command failed.
    pub fn expect_value(self) -> T {
        match self.value {
            Some(value) => value,
            None => match self.error {
                Some(error) => panic!("Command failed: {}", error),
                None => unreachable!("CommandResult holds neither value nor error"),
            },
        }
    }

    pub fn into_result(self) -> Result<T, WalletError> {
        match (self.value, self.error) {
            (Some(value), None) => Ok(value),
            (None, Some(error)) => Err(error),
            _ => unreachable!("CommandResult holds neither value nor error"),
        }
    }
}

impl<T> From<Result<T, WalletError>> for CommandResult<T> {
    fn from(result: Result<T, WalletError>) -> Self {
        match result {
            Ok(value) => CommandResult::ok(value),
            Err(error) => CommandResult::err(error),
        }
    }
}

/// One unit of fallible work against an external service
///
/// A command holds only its own immutable request parameters, so a
/// second `run` with the same receiver repeats the identical request.
/// Commands executed under `run_with_recovery` must be safe to invoke
/// twice; broadcast is not and must sit outside any retried step.
#[allow(async_fn_in_trait)]
pub trait Command {
    type Output;

    async fn run(&self) -> CommandResult<Self::Output>;
}

/// Injected fix-up for precondition failures
///
/// `recover` returns whether the precondition was repaired (wallet
/// unlocked, session activated). It is consulted only for failures
/// where `WalletError::is_fixable_precondition` holds.
#[allow(async_fn_in_trait)]
pub trait Recovery {
    async fn recover(&self, error: &WalletError) -> bool;
}

/// Recovery that never repairs anything
pub struct NoRecovery;

impl Recovery for NoRecovery {
    async fn recover(&self, _error: &WalletError) -> bool {
        false
    }
}

/// Run a command, allowing one fix-up and one re-invocation
///
/// The first attempt's result is returned unmodified unless its error
/// is a fixable precondition AND the recovery reports success; in that
/// case the command runs exactly once more and that second result is
/// returned, whatever it is.
pub async fn run_with_recovery<C, R>(command: &C, recovery: &R) -> CommandResult<C::Output>
where
    C: Command,
    R: Recovery,
{
    let first = command.run().await;

    let error = match first.error() {
        Some(error) if error.is_fixable_precondition() => error.clone(),
        _ => return first,
    };

    log::info!("Command hit fixable precondition: {}", error);
    if !recovery.recover(&error).await {
        log::warn!("Recovery declined or failed; surfacing original error");
        return first;
    }

    command.run().await
}
