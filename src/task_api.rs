use serde::Serialize;

pub struct TaskApiClient {
    access_token: String,
    api_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct TaskRequest {
    pub thread_id: String,
    pub channel_id: String,
    pub user_id: String,
    pub query: String,
}

#[derive(Debug)]
pub enum TaskApiError {
    Request(String),
    Response(String),
}

impl std::fmt::Display for TaskApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskApiError::Request(msg) => write!(f, "Request error: {}", msg),
            TaskApiError::Response(msg) => write!(f, "Response error: {}", msg),
        }
    }
}

impl std::error::Error for TaskApiError {}

impl TaskApiClient {
    pub fn new(access_token: String, api_url: String) -> Self {
        Self {
            access_token,
            api_url,
            client: reqwest::Client::new(),
        }
    }

    /// POSTs the request to the task API and returns the raw response body.
    /// The API authenticates via the obot access-token cookie; the response
    /// status is not inspected, only logged by the caller.
    pub async fn submit(&self, request: &TaskRequest) -> Result<String, TaskApiError> {
        let response = self
            .client
            .post(&self.api_url)
            .header("Content-Type", "application/json")
            .header("Cookie", format!("obot_access_token={}", self.access_token))
            .json(request)
            .send()
            .await
            .map_err(|e| TaskApiError::Request(format!("Request failed: {}", e)))?;

        response
            .text()
            .await
            .map_err(|e| TaskApiError::Response(format!("Failed to read response body: {}", e)))
    }
}
