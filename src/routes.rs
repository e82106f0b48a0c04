use std::sync::Arc;

use async_trait::async_trait;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::registry::{
    EndpointDescriptor, EndpointHandler, EndpointRegistry, QueryParams, ROOT_ROUTE,
};
use crate::upstream::HypixelClient;

/// The fixed route set: gateway route name to upstream path.
const RAW_ENDPOINTS: &[(&str, &str)] = &[
    ("rawBoosters", "/boosters"),
    ("rawCounts", "/counts"),
    ("rawLeaderboards", "/leaderboards"),
    ("rawPunishments", "/punishmentstats"),
    ("rawAchievements", "/resources/achievements"),
    ("rawChallenges", "/resources/challenges"),
    ("rawGuildAchievements", "/resources/guilds/achievements"),
    ("rawVanityCompanions", "/resources/vanity/companions"),
    ("rawSbBingo", "/resources/skyblock/bingo"),
    ("rawSbElections", "/resources/skyblock/election"),
    ("rawSbFireSales", "/skyblock/firesales"),
];

/// Build the registry served by the gateway. The raw relay routes take no
/// parameters; the root route answers a service index.
pub fn build_registry(client: HypixelClient) -> EndpointRegistry {
    let mut descriptors: Vec<EndpointDescriptor> = RAW_ENDPOINTS
        .iter()
        .map(|&(name, path)| {
            EndpointDescriptor::new(
                name,
                Arc::new(RawEndpoint {
                    client: client.clone(),
                    path,
                }),
            )
        })
        .collect();

    descriptors.push(EndpointDescriptor::new(
        ROOT_ROUTE,
        Arc::new(RootEndpoint {
            routes: RAW_ENDPOINTS
                .iter()
                .map(|&(name, _)| name.to_string())
                .collect(),
        }),
    ));

    EndpointRegistry::new(descriptors)
}

/// Thin call-and-relay to one upstream path. The upstream body is answered
/// verbatim.
struct RawEndpoint {
    client: HypixelClient,
    path: &'static str,
}

#[async_trait]
impl EndpointHandler for RawEndpoint {
    async fn run(&self, _req: &Parts, _params: &QueryParams) -> Response {
        match self.client.get(self.path).await {
            Ok(body) => Json(body).into_response(),
            Err(err) => {
                error!(path = self.path, error = %err, "upstream request failed");
                err.into_response()
            }
        }
    }
}

/// Service index served on the empty path.
struct RootEndpoint {
    routes: Vec<String>,
}

#[async_trait]
impl EndpointHandler for RootEndpoint {
    async fn run(&self, _req: &Parts, _params: &QueryParams) -> Response {
        Json(json!({
            "success": true,
            "code": 200,
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "routes": self.routes,
        }))
        .into_response()
    }
}
