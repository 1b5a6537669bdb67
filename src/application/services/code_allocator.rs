//! Collision-aware short code allocation.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::AppError;
use crate::utils::code_generator::{
    CodeGenerator, DEFAULT_CODE_LENGTH, FALLBACK_CODE_LENGTH, RandomCodeGenerator,
};

/// Number of attempts at the default length before widening the code space.
pub const DEFAULT_ATTEMPTS: usize = 5;

/// Retry strategy for claiming a unique code.
///
/// Generates a candidate, hands it to an insert callback and classifies the
/// failure. Only [`AppError::Conflict`] (a uniqueness violation on the code)
/// triggers another candidate; any other error is returned immediately.
/// After `attempts` conflicts a single candidate of `fallback_length` is
/// tried and its outcome is returned as-is, conflict included.
///
/// The allocator knows nothing about the store; the callback decides what
/// "insert" means.
#[derive(Clone)]
pub struct CodeAllocator {
    generator: Arc<dyn CodeGenerator>,
    attempts: usize,
    length: usize,
    fallback_length: usize,
}

impl CodeAllocator {
    pub fn new(
        generator: Arc<dyn CodeGenerator>,
        attempts: usize,
        length: usize,
        fallback_length: usize,
    ) -> Self {
        Self {
            generator,
            attempts,
            length,
            fallback_length,
        }
    }

    /// Five attempts at six characters, then one at seven.
    pub fn with_generator(generator: Arc<dyn CodeGenerator>) -> Self {
        Self::new(
            generator,
            DEFAULT_ATTEMPTS,
            DEFAULT_CODE_LENGTH,
            FALLBACK_CODE_LENGTH,
        )
    }

    /// Runs `insert` with fresh candidates until one is accepted.
    ///
    /// # Errors
    ///
    /// Returns the first non-conflict error from `insert`, or the error of
    /// the fallback attempt.
    pub async fn allocate<T, F, Fut>(&self, mut insert: F) -> Result<T, AppError>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        for attempt in 1..=self.attempts {
            let code = self.generator.generate(self.length);

            match insert(code).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_conflict() => {
                    debug!(attempt, length = self.length, "Short code collision, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        warn!(
            attempts = self.attempts,
            fallback_length = self.fallback_length,
            "Short code space congested, falling back to longer code"
        );

        insert(self.generator.generate(self.fallback_length)).await
    }
}

impl Default for CodeAllocator {
    fn default() -> Self {
        Self::with_generator(Arc::new(RandomCodeGenerator))
    }
}
