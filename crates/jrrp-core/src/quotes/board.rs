use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use chrono::Utc;

use crate::{
    config::DEFAULT_REMOTE_TIMEOUT,
    errors::Error,
    ports::{QuoteStore, RemoteQuoteSource},
    quotes::{
        submission::parse_submission,
        types::{DisplayQuote, NewQuote, QueryOptions, QuoteFilter, QuoteOrigin, QuoteRecord},
    },
    random::{self, shuffle, RandomSource},
    Result,
};

/// One entry of the pick list: a stored record or the remote source.
#[derive(Clone, Debug, PartialEq, Eq)]
enum QuoteCandidate {
    Local(QuoteRecord),
    Remote,
}

/// Quote operations on top of the store and the optional remote source.
///
/// The random source is locked only for the synchronous shuffle, never
/// across a store or remote call.
pub struct QuoteBoard {
    store: Arc<dyn QuoteStore>,
    remote: Option<Arc<dyn RemoteQuoteSource>>,
    remote_timeout: Duration,
    rng: Mutex<Box<dyn RandomSource>>,
}

impl QuoteBoard {
    pub fn new(store: Arc<dyn QuoteStore>) -> Self {
        Self {
            store,
            remote: None,
            remote_timeout: DEFAULT_REMOTE_TIMEOUT,
            rng: Mutex::new(Box::new(random::os_seeded())),
        }
    }

    pub fn with_remote(mut self, remote: Arc<dyn RemoteQuoteSource>, timeout: Duration) -> Self {
        self.remote = Some(remote);
        self.remote_timeout = timeout;
        self
    }

    /// Replace the random source used to order pick candidates.
    pub fn with_random(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.rng = Mutex::new(rng);
        self
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Parse, dedup by fingerprint and store a new quote.
    pub async fn submit(&self, sender: &str, raw: &str) -> Result<QuoteRecord> {
        let submission = parse_submission(raw)?;

        let dup = self
            .store
            .find(
                QuoteFilter::Fingerprint(submission.fingerprint.clone()),
                QueryOptions::first(),
            )
            .await?;
        if !dup.is_empty() {
            return Err(Error::DuplicateQuote);
        }

        let record = self
            .store
            .create(NewQuote {
                sender: sender.to_string(),
                sentence: submission.sentence,
                fingerprint: submission.fingerprint,
                source: submission.source,
                created_at: Utc::now().timestamp_millis(),
            })
            .await?;

        tracing::info!(sender, id = record.id, "quote submitted");
        Ok(record)
    }

    /// Remove the sender's most recent submission (only that one).
    pub async fn retract(&self, sender: &str) -> Result<QuoteRecord> {
        let latest = self
            .store
            .find(QuoteFilter::Sender(sender.to_string()), QueryOptions::latest())
            .await?;
        let Some(last) = latest.into_iter().next() else {
            return Err(Error::NothingToRetract);
        };

        self.store.remove(last.id).await?;
        tracing::info!(sender, id = last.id, "quote retracted");
        Ok(last)
    }

    /// Pick one quote uniformly among stored records and the remote source.
    pub async fn pick_display_quote(&self) -> DisplayQuote {
        let mut candidates = self.candidates().await;
        self.shuffle_candidates(&mut candidates);
        self.first_available(candidates).await
    }

    /// Unshuffled pick list: every stored record, then the remote source if any.
    async fn candidates(&self) -> Vec<QuoteCandidate> {
        let records = match self
            .store
            .find(QuoteFilter::All, QueryOptions::default())
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "failed to list quotes");
                Vec::new()
            }
        };

        let mut candidates: Vec<QuoteCandidate> =
            records.into_iter().map(QuoteCandidate::Local).collect();
        if self.remote.is_some() {
            candidates.push(QuoteCandidate::Remote);
        }
        candidates
    }

    fn shuffle_candidates(&self, candidates: &mut [QuoteCandidate]) {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        shuffle(candidates, &mut **rng);
    }

    /// Try candidates in order; local ones always succeed, the remote one only
    /// within the timeout.
    async fn first_available(&self, candidates: Vec<QuoteCandidate>) -> DisplayQuote {
        for candidate in candidates {
            match candidate {
                QuoteCandidate::Local(record) => return record.into(),
                QuoteCandidate::Remote => {
                    if let Some(quote) = self.fetch_remote().await {
                        return quote;
                    }
                }
            }
        }
        fallback_quote()
    }

    async fn fetch_remote(&self) -> Option<DisplayQuote> {
        let remote = self.remote.as_ref()?;
        match tokio::time::timeout(self.remote_timeout, remote.fetch()).await {
            Ok(Ok(q)) => Some(q.into()),
            Ok(Err(e)) => {
                tracing::debug!(error = %e, "remote quote skipped");
                None
            }
            Err(_) => {
                tracing::debug!(timeout = ?self.remote_timeout, "remote quote timed out");
                None
            }
        }
    }
}

/// Placeholder when nothing can be shown; the reply renders the submit
/// prompt in its place.
pub fn fallback_quote() -> DisplayQuote {
    DisplayQuote {
        text: String::new(),
        source: String::new(),
        origin: QuoteOrigin::Fallback,
    }
}
