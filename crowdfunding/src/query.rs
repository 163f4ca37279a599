use anyhow::{Context, Result, anyhow};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{PackageCampaign, StatusCampaign};

pub const PACKAGES_QUERY: &str = r#"query Packages($name: String!) {
  crowdfunding(name: $name) {
    id
    name
    packages {
      id
      name
      options {
        id
        price
        userPrice
        minAmount
        maxAmount
        defaultAmount
        reward {
          __typename
          ... on MembershipType {
            id
            name
          }
          ... on Goodie {
            id
            name
          }
        }
      }
    }
  }
}"#;

pub const STATUS_QUERY: &str = r#"query Status($name: String!) {
  crowdfunding(name: $name) {
    id
    goals {
      people
      money
      description
    }
    status {
      people
      money
    }
    endDate
  }
}"#;

/// Loading/error/data tri-state handed to the widgets.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    Loading,
    Error(String),
    Ready(T),
}

impl<T> QueryState<T> {
    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(data) => QueryState::Ready(data),
            Err(e) => QueryState::Error(format!("{:#}", e)),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Ready(data) => Some(data),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: CampaignVariables<'a>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CampaignVariables<'a> {
    pub name: &'a str,
}

impl<'a> GraphQlRequest<'a> {
    pub fn packages(name: &'a str) -> Self {
        Self {
            query: PACKAGES_QUERY,
            variables: CampaignVariables { name },
        }
    }

    pub fn status(name: &'a str) -> Self {
        Self {
            query: STATUS_QUERY,
            variables: CampaignVariables { name },
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize GraphQL request")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

impl<T: DeserializeOwned> GraphQlResponse<T> {
    pub fn parse(body: &str) -> Result<T> {
        let response: GraphQlResponse<T> =
            serde_json::from_str(body).context("Failed to parse GraphQL response")?;

        if let Some(error) = response.errors.first() {
            return Err(anyhow!("{}", error.message));
        }
        response
            .data
            .ok_or_else(|| anyhow!("GraphQL response carried no data"))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PackagesData {
    pub crowdfunding: Option<PackageCampaign>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusData {
    pub crowdfunding: Option<StatusCampaign>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body() {
        let body = GraphQlRequest::status("REPUBLIK").to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(value["variables"]["name"], "REPUBLIK");
        assert!(value["query"].as_str().unwrap().contains("endDate"));
    }

    #[test]
    fn test_errors_take_precedence() {
        let body = r#"{"data": null, "errors": [{"message": "crowdfunding not found"}]}"#;
        let err = GraphQlResponse::<StatusData>::parse(body).unwrap_err();

        assert_eq!(err.to_string(), "crowdfunding not found");
    }

    #[test]
    fn test_missing_campaign_is_none() {
        let body = r#"{"data": {"crowdfunding": null}}"#;
        let data = GraphQlResponse::<StatusData>::parse(body).unwrap();

        assert!(data.crowdfunding.is_none());
    }

    #[test]
    fn test_query_state_from_result() {
        let state = QueryState::<u32>::from_result(Err(anyhow!("offline")));
        assert_eq!(state, QueryState::Error("offline".to_string()));
        assert_eq!(QueryState::from_result(Ok(3)).data(), Some(&3));
        assert!(QueryState::<u32>::Loading.is_loading());
    }
}
