//! Host verification callback.

// self
use crate::{_prelude::*, profile::Profile, strategy::TokenSet};

/// Error type returned by verify callbacks.
pub type VerifyError = Box<dyn StdError + Send + Sync>;

/// Host hook receiving the tokens and normalized profile of a completed login.
///
/// The host looks up or provisions its own user record and returns it; returning an error aborts
/// the login with [`Error::Verify`]. Any `Fn(TokenSet, Profile) -> impl Future` closure qualifies.
pub trait Verify
where
	Self: Send + Sync,
{
	/// Host-side user type.
	type User: Send;

	/// Resolves the host user for a login.
	fn verify(
		&self,
		tokens: TokenSet,
		profile: Profile,
	) -> impl Future<Output = Result<Self::User, VerifyError>> + Send;
}
impl<F, Fut, U> Verify for F
where
	F: Send + Sync + Fn(TokenSet, Profile) -> Fut,
	Fut: Send + Future<Output = Result<U, VerifyError>>,
	U: Send,
{
	type User = U;

	fn verify(
		&self,
		tokens: TokenSet,
		profile: Profile,
	) -> impl Future<Output = Result<Self::User, VerifyError>> + Send {
		self(tokens, profile)
	}
}
