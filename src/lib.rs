pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

use crate::application::alerts::AlertsUseCase;
use crate::application::allocate::PortfolioAllocator;
use crate::application::cache::SnapshotCache;
use crate::application::opportunities::top_opportunities;
use crate::application::pipeline::{PipelineSnapshot, PipelineUseCase};
use crate::domain::entities::scored_trade::BacktestedTrade;
use crate::domain::error::DomainError;
use crate::domain::ports::notifier::Notifier;
use crate::domain::ports::price_provider::{HistoricalPriceProvider, LivePriceProvider};
use crate::domain::ports::progress::ProgressReporter;
use crate::domain::ports::trade_feed::TradeFeed;
use crate::domain::values::portfolio::Portfolio;
use crate::domain::values::scoring_profile::ScoringProfile;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::feeds::QuiverFeed;
use crate::infrastructure::notifiers::WebhookNotifier;
use crate::infrastructure::prices::YahooPrices;
use std::sync::Arc;
use std::time::Duration;

/// External services the facade talks to.
pub struct Providers {
    pub feed: Arc<dyn TradeFeed>,
    pub prices: Arc<dyn HistoricalPriceProvider>,
    pub live: Arc<dyn LivePriceProvider>,
    pub notifier: Option<Arc<dyn Notifier>>,
}

pub struct CongressIntel {
    pipeline_uc: PipelineUseCase,
    live: Arc<dyn LivePriceProvider>,
    alerts_uc: AlertsUseCase,
    cache: SnapshotCache,
    profile: ScoringProfile,
}

impl CongressIntel {
    pub fn new(config: &AppConfig) -> Result<Self, DomainError> {
        let feed = QuiverFeed::new(
            config.feed.api_key.clone(),
            Duration::from_secs(config.feed.timeout_secs),
        )
        .with_base_url(config.feed.base_url.as_str());
        let yahoo = Arc::new(
            YahooPrices::new(Duration::from_secs(config.prices.timeout_secs))
                .with_base_url(config.prices.base_url.as_str()),
        );
        let notifier: Option<Arc<dyn Notifier>> = config
            .notifications
            .webhook_url
            .as_ref()
            .map(|url| {
                Arc::new(WebhookNotifier::new(
                    url.clone(),
                    config.notifications.webhook_token.clone(),
                )) as Arc<dyn Notifier>
            });

        Self::with_providers(
            Providers {
                feed: Arc::new(feed),
                prices: yahoo.clone(),
                live: yahoo,
                notifier,
            },
            config,
        )
    }

    pub fn with_providers(providers: Providers, config: &AppConfig) -> Result<Self, DomainError> {
        config
            .scoring
            .validate()
            .map_err(DomainError::InvalidInput)?;

        Ok(Self {
            pipeline_uc: PipelineUseCase::new(providers.feed, providers.prices),
            live: providers.live,
            alerts_uc: AlertsUseCase::new(
                providers.notifier,
                config.notifications.destination.clone(),
                config.notifications.subject.clone(),
            ),
            cache: SnapshotCache::new(Duration::from_secs(config.cache.ttl_secs)),
            profile: config.scoring.clone(),
        })
    }

    /// Replace the alert transport, e.g. with a log-only notifier.
    pub fn set_notifier(&mut self, notifier: Arc<dyn Notifier>, destination: String, subject: String) {
        self.alerts_uc = AlertsUseCase::new(Some(notifier), Some(destination), subject);
    }

    pub fn profile(&self) -> &ScoringProfile {
        &self.profile
    }

    /// Switch to another scoring profile. The next snapshot re-runs the pipeline.
    pub fn set_profile(&mut self, profile: ScoringProfile) -> Result<(), DomainError> {
        profile.validate().map_err(DomainError::InvalidInput)?;
        self.profile = profile;
        self.cache.clear();
        Ok(())
    }

    /// The current run, reused while younger than the cache TTL.
    pub async fn snapshot(&self, progress: &dyn ProgressReporter) -> Result<Arc<PipelineSnapshot>, DomainError> {
        self.cache
            .get_or_refresh(|| self.pipeline_uc.run(&self.profile, progress))
            .await
    }

    /// Drop the cached run and compute a fresh one.
    pub async fn refresh(&mut self, progress: &dyn ProgressReporter) -> Result<Arc<PipelineSnapshot>, DomainError> {
        self.cache.clear();
        self.snapshot(progress).await
    }

    pub async fn portfolio(&self, capital: f64, progress: &dyn ProgressReporter) -> Result<Portfolio, DomainError> {
        let snapshot = self.snapshot(progress).await?;
        PortfolioAllocator::new(self.live.clone(), self.profile.allocation)
            .allocate(&snapshot.backtested, capital)
            .await
    }

    pub async fn opportunities(
        &self,
        limit: usize,
        progress: &dyn ProgressReporter,
    ) -> Result<Vec<BacktestedTrade>, DomainError> {
        let snapshot = self.snapshot(progress).await?;
        Ok(top_opportunities(&snapshot.backtested, limit))
    }

    pub fn alerts_configured(&self) -> bool {
        self.alerts_uc.is_configured()
    }

    /// Send a digest of the current STRONG BUY trades. `Ok(false)` when
    /// nothing was delivered.
    pub async fn send_alerts(&self, progress: &dyn ProgressReporter) -> Result<bool, DomainError> {
        let snapshot = self.snapshot(progress).await?;
        Ok(self.alerts_uc.send(&snapshot.backtested).await)
    }
}
