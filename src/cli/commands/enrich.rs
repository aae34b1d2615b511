//! Implementation of the `lbenrich enrich` command.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tokio::fs;
use tokio_util::sync::CancellationToken;

use crate::adapters::cache::{
    CacheMetrics, CacheStats, InstrumentedEnrichmentCache, MokaEnrichmentCache,
    NullEnrichmentCache,
};
use crate::adapters::profile_source::ProfileSourceRouter;
use crate::cli::output::table::TableFormatter;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, EnrichmentReport, Member, RequestContext};
use crate::domain::ports::{EnrichmentCache, Enricher};
use crate::infrastructure::config::ConfigLoader;
use crate::services::{CachedEnricher, HookedEnricher, TracingHook};

#[derive(Args, Debug)]
pub struct EnrichArgs {
    /// Tenant the leaderboard belongs to
    #[arg(long)]
    pub tenant: String,

    /// Leaderboard the members were ranked on
    #[arg(long)]
    pub leaderboard: String,

    /// JSON file holding an array of members
    #[arg(long, short)]
    pub input: PathBuf,

    /// Overall deadline for the call in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

/// Outcome of `lbenrich enrich`.
#[derive(Debug, Serialize)]
pub struct EnrichOutput {
    /// Tenant the batch belongs to
    pub tenant_id: String,
    /// Leaderboard the batch was ranked on
    pub leaderboard_id: String,
    /// Where member profiles came from
    pub report: EnrichmentReport,
    /// The batch after enrichment
    pub members: Vec<Member>,
    /// Enrichment cache calls made for this batch
    pub cache: CacheStats,
}

impl CommandOutput for EnrichOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "Leaderboard {} (tenant {})",
            self.leaderboard_id, self.tenant_id
        )];
        if self.report.skipped {
            lines.push("Enrichment is disabled for this tenant.".to_string());
        }
        lines.push(TableFormatter::new().format_members(&self.members));
        lines.push(format!(
            "\n{} member(s): {} from cache, {} fetched, {} unresolved",
            self.report.total, self.report.cache_hits, self.report.fetched, self.report.unresolved
        ));
        lines.push(format!(
            "cache: {} get(s), {} full hit(s), {} error(s); {} set(s), {} error(s)",
            self.cache.gets,
            self.cache.hits,
            self.cache.get_errors,
            self.cache.sets,
            self.cache.set_errors
        ));
        lines.join("\n")
    }
}

/// Assemble the enricher described by `config`, together with the counters
/// of its instrumented cache.
pub fn build_enricher(
    config: &Config,
) -> Result<(HookedEnricher<CachedEnricher>, Arc<CacheMetrics>)> {
    ConfigLoader::require_profile_source(config)?;

    let backend: Arc<dyn EnrichmentCache> = if config.cache.enabled {
        Arc::new(MokaEnrichmentCache::with_capacity(config.cache.max_capacity))
    } else {
        Arc::new(NullEnrichmentCache::new())
    };
    let cache = InstrumentedEnrichmentCache::new(backend);
    let metrics = cache.metrics();

    let source = ProfileSourceRouter::from_config(config)
        .context("Failed to create profile source client")?;

    let enricher = CachedEnricher::from_config(Arc::new(cache), Arc::new(source), config);
    Ok((
        HookedEnricher::new(enricher).with_hook(Arc::new(TracingHook)),
        metrics,
    ))
}

/// Read a JSON array of members from `path`.
pub async fn read_members(path: &Path) -> Result<Vec<Member>> {
    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read members from {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse members in {}", path.display()))
}

/// Enrich the members in `args.input` and print the result.
pub async fn execute(args: EnrichArgs, config: &Config, json_mode: bool) -> Result<()> {
    let (enricher, cache_metrics) = build_enricher(config)?;
    let mut members = read_members(&args.input).await?;

    let cancellation = CancellationToken::new();
    let mut ctx = RequestContext::new().with_cancellation(cancellation.clone());
    if let Some(timeout_ms) = args.timeout_ms {
        ctx = ctx.with_timeout(Duration::from_millis(timeout_ms));
    }

    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancellation.cancel();
        }
    });
    let result = enricher
        .enrich(&ctx, &args.tenant, &args.leaderboard, &mut members)
        .await;
    interrupt.abort();

    let cache = cache_metrics.snapshot();
    tracing::info!(
        gets = cache.gets,
        hits = cache.hits,
        get_errors = cache.get_errors,
        sets = cache.sets,
        set_errors = cache.set_errors,
        get_elapsed_ms = cache.get_elapsed_ms,
        set_elapsed_ms = cache.set_elapsed_ms,
        "enrichment cache usage"
    );

    let report = result.context("Enrichment failed")?;
    output(
        &EnrichOutput {
            tenant_id: args.tenant,
            leaderboard_id: args.leaderboard,
            report,
            members,
            cache,
        },
        json_mode,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_members() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("members.json");
        std::fs::write(
            &path,
            r#"[{"public_id": "m1", "rank": 1, "score": 100}, {"public_id": "m2", "rank": 2, "score": 50}]"#,
        )
        .unwrap();

        let members = read_members(&path).await.unwrap();
        assert_eq!(members, vec![Member::new("m1", 1, 100), Member::new("m2", 2, 50)]);
    }

    #[tokio::test]
    async fn test_read_members_rejects_non_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("members.json");
        std::fs::write(&path, r#"{"public_id": "m1"}"#).unwrap();

        assert!(read_members(&path).await.is_err());
    }

    #[test]
    fn test_build_enricher_requires_profile_source() {
        let config = Config::default();
        assert!(build_enricher(&config).is_err());

        let mut config = Config::default();
        config.profile_source.base_url = "profiles.internal:8080".to_string();
        config.cache.enabled = false;
        assert!(build_enricher(&config).is_ok());

        let mut webhook_only = Config::default();
        webhook_only
            .enrichment
            .webhook_urls
            .insert("t1".to_string(), "hooks.partner.example".to_string());
        assert!(build_enricher(&webhook_only).is_ok());
    }

    #[tokio::test]
    async fn test_built_enricher_reports_cache_calls() {
        let mut config = Config::default();
        config
            .enrichment
            .webhook_urls
            .insert("other".to_string(), "hooks.partner.example".to_string());
        let (enricher, metrics) = build_enricher(&config).unwrap();

        let mut members = vec![Member::new("m1", 1, 100)];
        let report = enricher
            .enrich(&RequestContext::new(), "t1", "lb1", &mut members)
            .await
            .unwrap();

        assert_eq!(report.unresolved, 1);
        let stats = metrics.snapshot();
        assert_eq!(stats.gets, 1);
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.sets, 0);
    }

    #[test]
    fn test_human_output_marks_unresolved_members() {
        let mut alice = Member::new("m1", 1, 100);
        alice.display_name = Some("Alice".to_string());
        let out = EnrichOutput {
            tenant_id: "t1".to_string(),
            leaderboard_id: "lb1".to_string(),
            report: EnrichmentReport {
                total: 2,
                fetched: 1,
                unresolved: 1,
                ..Default::default()
            },
            members: vec![alice, Member::new("m2", 2, 50)],
            cache: CacheStats {
                gets: 1,
                get_errors: 1,
                ..Default::default()
            },
        };

        let text = out.to_human();
        assert!(text.contains("Alice"));
        assert!(text.contains("m2"));
        assert!(text.contains("2 member(s): 0 from cache, 1 fetched, 1 unresolved"));
        assert!(text.contains("cache: 1 get(s), 0 full hit(s), 1 error(s); 0 set(s), 0 error(s)"));
    }
}
