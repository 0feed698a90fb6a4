//! Rate-limit retry policy.

// self
use crate::_prelude::*;

/// Total attempts made for one call, the first included.
pub const MAX_ATTEMPTS: u32 = 4;

/// Delays applied between rate-limited attempts.
///
/// The attempt ceiling is fixed at [`MAX_ATTEMPTS`]; only the padding is configurable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
	/// Fixed padding added to the server's wait hint.
	pub backoff: Duration,
	/// Wait used when a 429 response carries no `extras.wait_seconds`.
	pub fallback_wait: Duration,
}
impl RetryPolicy {
	const DEFAULT_BACKOFF: Duration = Duration::from_secs(1);
	const DEFAULT_FALLBACK_WAIT: Duration = Duration::from_secs(10);

	/// Policy that never sleeps; useful for tests.
	pub const fn immediate() -> Self {
		Self { backoff: Duration::ZERO, fallback_wait: Duration::ZERO }
	}

	/// Overrides the backoff padding.
	pub fn with_backoff(mut self, backoff: Duration) -> Self {
		self.backoff = backoff;

		self
	}

	/// Overrides the wait used when the server sends no hint.
	pub fn with_fallback_wait(mut self, fallback_wait: Duration) -> Self {
		self.fallback_wait = fallback_wait;

		self
	}

	/// Delay before retrying after an attempt that carried `wait_hint`.
	pub fn delay_for(&self, wait_hint: Option<Duration>) -> Duration {
		self.backoff.saturating_add(wait_hint.unwrap_or(self.fallback_wait))
	}

	/// Returns the delay to sleep after `attempt` (1-based), or `None` when no attempt
	/// follows.
	pub fn next_delay(&self, attempt: u32, wait_hint: Option<Duration>) -> Option<Duration> {
		(attempt < MAX_ATTEMPTS).then(|| self.delay_for(wait_hint))
	}
}
impl Default for RetryPolicy {
	fn default() -> Self {
		Self { backoff: Self::DEFAULT_BACKOFF, fallback_wait: Self::DEFAULT_FALLBACK_WAIT }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn delay_adds_backoff_to_hint() {
		let policy = RetryPolicy::default();

		assert_eq!(policy.delay_for(Some(Duration::from_secs(5))), Duration::from_secs(6));
		assert_eq!(policy.delay_for(None), Duration::from_secs(11));
	}

	#[test]
	fn no_delay_after_the_last_attempt() {
		let policy = RetryPolicy::default().with_backoff(Duration::from_millis(250));

		assert_eq!(policy.next_delay(1, Some(Duration::ZERO)), Some(Duration::from_millis(250)));
		assert!(policy.next_delay(MAX_ATTEMPTS - 1, None).is_some());
		assert_eq!(policy.next_delay(MAX_ATTEMPTS, Some(Duration::from_secs(1))), None);
	}

	#[test]
	fn immediate_policy_never_sleeps() {
		let policy = RetryPolicy::immediate().with_fallback_wait(Duration::ZERO);

		assert_eq!(policy.delay_for(None), Duration::ZERO);
		assert_eq!(policy.delay_for(Some(Duration::from_secs(3))), Duration::from_secs(3));
	}
}
