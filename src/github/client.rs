use async_trait::async_trait;
use octocrab::Octocrab;
use serde::Deserialize;
use tracing::info;

use crate::error::{Result, RouterError};

#[async_trait]
pub trait BoardService: Send + Sync {
    /// Resolves a board number to the service's opaque project id.
    async fn project_id(&self, org: &str, board: u64) -> Result<String>;

    /// Adds an issue or pull request to a board, returning the new item id.
    async fn add_item(&self, project_id: &str, content_id: &str) -> Result<String>;
}

pub struct GitHubClient {
    octocrab: Octocrab,
}

impl GitHubClient {
    pub fn new(token: &str) -> Result<Self> {
        let octocrab = Octocrab::builder()
            .personal_token(token.to_string())
            .build()
            .map_err(|e| RouterError::GitHub(format!("failed to build octocrab: {e}")))?;

        Ok(Self { octocrab })
    }
}

const PROJECT_ID_QUERY: &str = "
    query($org: String!, $number: Int!) {
      organization(login: $org) {
        projectV2(number: $number) {
          id
        }
      }
    }";

const ADD_ITEM_MUTATION: &str = "
    mutation($project: ID!, $node: ID!) {
      addProjectV2ItemById(input: {projectId: $project, contentId: $node}) {
        item {
          id
        }
      }
    }";

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

impl<T> GraphQlResponse<T> {
    // GitHub returns GraphQL errors in the body of a 200 response.
    fn into_data(self) -> Result<T> {
        if let Some(errors) = self.errors {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(RouterError::GitHub(messages.join("; ")));
        }
        self.data
            .ok_or_else(|| RouterError::GitHub("graphql response had no data".into()))
    }
}

#[derive(Debug, Deserialize)]
struct ProjectIdData {
    organization: Option<OrganizationNode>,
}

#[derive(Debug, Deserialize)]
struct OrganizationNode {
    #[serde(rename = "projectV2")]
    project_v2: Option<ProjectNode>,
}

#[derive(Debug, Deserialize)]
struct ProjectNode {
    id: String,
}

#[derive(Debug, Deserialize)]
struct AddItemData {
    #[serde(rename = "addProjectV2ItemById")]
    add_item: Option<AddItemPayload>,
}

#[derive(Debug, Deserialize)]
struct AddItemPayload {
    item: ItemNode,
}

#[derive(Debug, Deserialize)]
struct ItemNode {
    id: String,
}

#[async_trait]
impl BoardService for GitHubClient {
    async fn project_id(&self, org: &str, board: u64) -> Result<String> {
        info!("resolving board {board} in org {org}");

        let response: GraphQlResponse<ProjectIdData> = self
            .octocrab
            .graphql(&serde_json::json!({
                "query": PROJECT_ID_QUERY,
                "variables": { "org": org, "number": board },
            }))
            .await?;

        response
            .into_data()?
            .organization
            .and_then(|org_node| org_node.project_v2)
            .map(|project| project.id)
            .ok_or_else(|| RouterError::GitHub(format!("board {board} not found in org {org}")))
    }

    async fn add_item(&self, project_id: &str, content_id: &str) -> Result<String> {
        info!("adding {content_id} to project {project_id}");

        let response: GraphQlResponse<AddItemData> = self
            .octocrab
            .graphql(&serde_json::json!({
                "query": ADD_ITEM_MUTATION,
                "variables": { "project": project_id, "node": content_id },
            }))
            .await?;

        let payload = response
            .into_data()?
            .add_item
            .ok_or_else(|| RouterError::GitHub(format!("add of {content_id} returned no item")))?;

        Ok(payload.item.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_with_data() {
        let response: GraphQlResponse<ProjectIdData> = serde_json::from_str(
            r#"{"data": {"organization": {"projectV2": {"id": "PVT_abc"}}}}"#,
        )
        .unwrap();

        let id = response
            .into_data()
            .unwrap()
            .organization
            .and_then(|o| o.project_v2)
            .map(|p| p.id);
        assert_eq!(id.as_deref(), Some("PVT_abc"));
    }

    #[test]
    fn test_response_with_errors() {
        let response: GraphQlResponse<ProjectIdData> = serde_json::from_str(
            r#"{"data": null, "errors": [{"message": "Could not resolve to an Organization"}]}"#,
        )
        .unwrap();

        let err = response.into_data().unwrap_err();
        assert!(err.to_string().contains("Could not resolve"));
    }

    #[test]
    fn test_null_navigation_is_an_error() {
        // Board number that does not exist: organization is present, projectV2 is null.
        let response: GraphQlResponse<ProjectIdData> =
            serde_json::from_str(r#"{"data": {"organization": {"projectV2": null}}}"#).unwrap();

        let id = response
            .into_data()
            .unwrap()
            .organization
            .and_then(|o| o.project_v2);
        assert!(id.is_none());
    }

    #[test]
    fn test_add_item_response() {
        let response: GraphQlResponse<AddItemData> = serde_json::from_str(
            r#"{"data": {"addProjectV2ItemById": {"item": {"id": "PVTI_xyz"}}}}"#,
        )
        .unwrap();

        let payload = response.into_data().unwrap().add_item.unwrap();
        assert_eq!(payload.item.id, "PVTI_xyz");
    }
}
