use std::future::Future;
use std::time::Duration;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use futures::Stream;

use crate::query::{GraphQlRequest, GraphQlResponse, PackagesData, QueryState, StatusData};
use crate::{PackageCampaign, StatusCampaign};

/// Sends a GraphQL request body and returns the raw response body.
#[async_trait(?Send)]
pub trait GraphQlTransport {
    async fn post(&self, body: String) -> Result<String>;
}

/// Where the widgets get their campaign data from.
#[async_trait(?Send)]
pub trait CampaignSource {
    /// Packages of the named campaign. A missing campaign is an error.
    async fn fetch_packages(&self, name: &str) -> Result<PackageCampaign>;

    /// Status of the named campaign, `None` when the backend does not know it.
    async fn fetch_status(&self, name: &str) -> Result<Option<StatusCampaign>>;
}

/// [`CampaignSource`] speaking GraphQL over any transport.
pub struct GraphQlSource<T> {
    transport: T,
}

impl<T: GraphQlTransport> GraphQlSource<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

#[async_trait(?Send)]
impl<T: GraphQlTransport> CampaignSource for GraphQlSource<T> {
    async fn fetch_packages(&self, name: &str) -> Result<PackageCampaign> {
        tracing::debug!("Fetching packages for {}", name);
        let body = GraphQlRequest::packages(name).to_json()?;
        let response = self.transport.post(body).await?;

        GraphQlResponse::<PackagesData>::parse(&response)?
            .crowdfunding
            .ok_or_else(|| anyhow!("Crowdfunding {} not found", name))
    }

    async fn fetch_status(&self, name: &str) -> Result<Option<StatusCampaign>> {
        tracing::debug!("Fetching status for {}", name);
        let body = GraphQlRequest::status(name).to_json()?;
        let response = self.transport.post(body).await?;

        Ok(GraphQlResponse::<StatusData>::parse(&response)?.crowdfunding)
    }
}

struct PollState<'a, S: ?Sized, F> {
    source: &'a S,
    name: &'a str,
    interval: Duration,
    sleep: F,
    first: bool,
}

/// Fetches the campaign status right away and again after every `interval`.
///
/// `sleep` provides the timer so the same loop runs under Tokio and in the
/// browser. The stream never ends; drop it to stop polling.
pub fn poll_status<'a, S, F, Fut>(
    source: &'a S,
    name: &'a str,
    interval: Duration,
    sleep: F,
) -> impl Stream<Item = QueryState<Option<StatusCampaign>>> + 'a
where
    S: CampaignSource + ?Sized,
    F: Fn(Duration) -> Fut + 'a,
    Fut: Future<Output = ()> + 'a,
{
    let state = PollState {
        source,
        name,
        interval,
        sleep,
        first: true,
    };

    futures::stream::unfold(state, |mut state| async move {
        if !state.first {
            (state.sleep)(state.interval).await;
        }
        state.first = false;

        let result = state.source.fetch_status(state.name).await;
        if let Err(e) = &result {
            tracing::warn!("Status refresh for {} failed: {:#}", state.name, e);
        }
        Some((QueryState::from_result(result), state))
    })
}
