//! Caller-controlled work distribution for batch transforms.
//!
//! A [`WorkPool`] is created explicitly and passed to each batch operation;
//! there is no process-wide parallel state. Results always come back in
//! input order. Without the `parallel` feature every pool runs on the
//! calling thread.

use phages_core::{PhagesError, Result};

/// Worker pool used to fan a batch out across threads.
pub struct WorkPool {
    threads: usize,
    #[cfg(feature = "parallel")]
    pool: Option<rayon::ThreadPool>,
}

impl std::fmt::Debug for WorkPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkPool")
            .field("threads", &self.threads)
            .finish()
    }
}

impl Default for WorkPool {
    fn default() -> Self {
        Self::sequential()
    }
}

impl WorkPool {
    /// Run everything on the calling thread.
    pub fn sequential() -> Self {
        Self {
            threads: 1,
            #[cfg(feature = "parallel")]
            pool: None,
        }
    }

    /// A dedicated pool of `threads` workers. One thread means sequential.
    ///
    /// # Errors
    ///
    /// Returns an error if `threads` is zero or the pool cannot be started.
    pub fn with_threads(threads: usize) -> Result<Self> {
        if threads == 0 {
            return Err(PhagesError::InvalidInput(
                "thread count must be at least 1".into(),
            ));
        }
        if threads == 1 {
            return Ok(Self::sequential());
        }

        #[cfg(feature = "parallel")]
        {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| format!("phages-worker-{}", i))
                .build()
                .map_err(|e| PhagesError::Other(format!("failed to start worker pool: {}", e)))?;
            Ok(Self {
                threads,
                pool: Some(pool),
            })
        }
        #[cfg(not(feature = "parallel"))]
        {
            tracing::warn!(threads, "built without the `parallel` feature, running sequentially");
            Ok(Self::sequential())
        }
    }

    /// Number of worker threads.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Apply `f` to every item, returning results in input order.
    pub fn map<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(usize, &T) -> R + Sync + Send,
    {
        #[cfg(feature = "parallel")]
        {
            if let Some(pool) = &self.pool {
                use rayon::prelude::*;
                return pool.install(|| {
                    items
                        .par_iter()
                        .enumerate()
                        .map(|(i, item)| f(i, item))
                        .collect()
                });
            }
        }
        items.iter().enumerate().map(|(i, item)| f(i, item)).collect()
    }

    /// Apply a fallible `f` to every item, returning results in input order
    /// or the first error encountered.
    pub fn try_map<T, R, F>(&self, items: &[T], f: F) -> Result<Vec<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(usize, &T) -> Result<R> + Sync + Send,
    {
        #[cfg(feature = "parallel")]
        {
            if let Some(pool) = &self.pool {
                use rayon::prelude::*;
                return pool.install(|| {
                    items
                        .par_iter()
                        .enumerate()
                        .map(|(i, item)| f(i, item))
                        .collect()
                });
            }
        }
        items.iter().enumerate().map(|(i, item)| f(i, item)).collect()
    }
}
