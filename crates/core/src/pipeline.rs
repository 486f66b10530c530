use crate::api::ApiError;
use crate::domain::{CalculatedTrades, ImpactResult, OrderResult, PortfolioGroup};
use crate::report::{trade_line, GroupOutcome, RunReport};
use crate::session::PortfolioApi;
use futures::future::join_all;
use tracing::Instrument;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Preview impact only; never place orders.
    pub dry_run: bool,
}

/// Lists every group, then runs inspect → preview → submit for each one.
///
/// Group flows run concurrently and are all awaited before this returns. A failing
/// group never affects its siblings; only a failure to list groups fails the run.
pub async fn run<A>(api: &A, opts: &RunOptions) -> Result<RunReport, ApiError>
where
    A: PortfolioApi + ?Sized,
{
    let run_id = Uuid::new_v4();
    let started_at = chrono::Utc::now();

    tracing::info!(%run_id, dry_run = opts.dry_run, "Fetching available orders...");

    let groups = api.list_groups().await.inspect_err(|err| {
        tracing::error!(%run_id, error = %err, "failed to list portfolio groups");
    })?;

    tracing::info!(%run_id, groups = groups.len(), "portfolio groups loaded");

    let flows = groups.iter().map(|group| {
        let span = tracing::info_span!("group", %run_id, group_id = %group.id);
        process_group(api, group, opts).instrument(span)
    });
    let outcomes = join_all(flows).await;

    Ok(RunReport {
        run_id,
        started_at,
        finished_at: chrono::Utc::now(),
        groups: groups.into_iter().zip(outcomes).collect(),
    })
}

/// One group's state machine. Each stage runs only if the previous one succeeded.
pub async fn process_group<A>(api: &A, group: &PortfolioGroup, opts: &RunOptions) -> GroupOutcome
where
    A: PortfolioApi + ?Sized,
{
    let batch = match inspect_group(api, group).await {
        Ok(Some(batch)) => batch,
        Ok(None) => return GroupOutcome::NoTrades,
        Err(err) => {
            tracing::error!(group = %group.name, error = %err, "{}", err.user_message());
            return GroupOutcome::InspectFailed {
                error: err.user_message(),
            };
        }
    };

    if let ImpactResult::Rejected { detail } = preview_impact(api, group, &batch).await {
        return GroupOutcome::Rejected { detail };
    }

    if opts.dry_run {
        tracing::info!(
            group = %group.name,
            calculated_trades_id = %batch.id,
            "dry run: impact approved, not placing orders"
        );
        return GroupOutcome::PreviewOnly;
    }

    match place_orders(api, group, &batch).await {
        Ok(OrderResult::Executed) => GroupOutcome::Executed,
        Ok(OrderResult::Declined { detail }) => GroupOutcome::Declined { detail },
        Err(err) => {
            tracing::error!(group = %group.name, error = %err, "{}", err.user_message());
            GroupOutcome::SubmitFailed {
                error: err.user_message(),
            }
        }
    }
}

/// Fetches the group's info and returns its pending batch.
///
/// A batch with no trades counts as nothing pending.
pub async fn inspect_group<A>(
    api: &A,
    group: &PortfolioGroup,
) -> Result<Option<CalculatedTrades>, ApiError>
where
    A: PortfolioApi + ?Sized,
{
    let info = api.group_info(&group.id).await?;

    tracing::info!("{}:", group.name);

    match info.calculated_trades {
        Some(batch) if !batch.trades.is_empty() => {
            for trade in &batch.trades {
                tracing::info!(group = %group.name, "{}", trade_line(trade));
            }
            Ok(Some(batch))
        }
        _ => {
            tracing::info!(group = %group.name, " (none)");
            Ok(None)
        }
    }
}

/// Asks the server for a dry-run assessment. Errors count as rejection.
pub async fn preview_impact<A>(
    api: &A,
    group: &PortfolioGroup,
    batch: &CalculatedTrades,
) -> ImpactResult
where
    A: PortfolioApi + ?Sized,
{
    match api.impact(&group.id, &batch.id).await {
        Ok(body) => {
            tracing::debug!(group = %group.name, impact = ?body, "impact response");
            let result = ImpactResult::from(body);
            if let ImpactResult::Rejected { detail } = &result {
                tracing::warn!(
                    group = %group.name,
                    calculated_trades_id = %batch.id,
                    "{detail}"
                );
            }
            result
        }
        Err(err) => {
            tracing::error!(
                group = %group.name,
                calculated_trades_id = %batch.id,
                error = %err,
                "{}",
                err.user_message()
            );
            ImpactResult::Rejected {
                detail: err.user_message(),
            }
        }
    }
}

pub async fn place_orders<A>(
    api: &A,
    group: &PortfolioGroup,
    batch: &CalculatedTrades,
) -> Result<OrderResult, ApiError>
where
    A: PortfolioApi + ?Sized,
{
    let body = api.place_orders(&group.id, &batch.id).await?;
    tracing::debug!(group = %group.name, response = ?body, "place orders response");

    let result = OrderResult::from(body);
    match &result {
        OrderResult::Executed => tracing::info!(group = %group.name, "Orders executed!"),
        OrderResult::Declined { detail } => tracing::info!(group = %group.name, "{detail}"),
    }
    Ok(result)
}
