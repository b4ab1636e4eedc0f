use super::auth::Identity;
use super::remote::{BackendError, TodoBackend};
use super::{TodoId, TodoItem};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

const TODOS_PATH: &str = "/rest/v1/todos";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// PostgREST `todos` table over blocking HTTP
#[derive(Debug, Clone)]
pub struct RestTodoBackend {
    client: Client,
    endpoint: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct TodoRow {
    id: i64,
    text: String,
    #[serde(default)]
    completed: bool,
}

impl From<TodoRow> for TodoItem {
    fn from(row: TodoRow) -> Self {
        TodoItem {
            id: TodoId(row.id),
            text: row.text,
            completed: row.completed,
        }
    }
}

#[derive(Debug, Serialize)]
struct NewTodo<'a> {
    text: &'a str,
    user_id: &'a str,
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            BackendError::Decode(e.to_string())
        } else {
            BackendError::Transport(e.to_string())
        }
    }
}

impl RestTodoBackend {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, BackendError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(3))
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            endpoint: todos_endpoint(base_url),
            api_key: api_key.to_string(),
        })
    }

    /// apikey plus the user's bearer token, falling back to the api key
    fn authorize(&self, request: RequestBuilder, who: &Identity) -> RequestBuilder {
        let token = who.access_token.as_deref().unwrap_or(&self.api_key);
        request.header("apikey", &self.api_key).bearer_auth(token)
    }

    fn send(&self, request: RequestBuilder, who: &Identity) -> Result<Response, BackendError> {
        let response = self.authorize(request, who).send()?;
        check_status(response)
    }
}

fn todos_endpoint(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), TODOS_PATH)
}

fn id_filter(id: TodoId) -> String {
    format!("eq.{}", id.0)
}

fn check_status(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(BackendError::Status {
        status: status.as_u16(),
        body,
    })
}

impl TodoBackend for RestTodoBackend {
    fn fetch(&self, who: &Identity) -> Result<Vec<TodoItem>, BackendError> {
        let user_filter = format!("eq.{}", who.user_id);
        let request = self.client.get(&self.endpoint).query(&[
            ("user_id", user_filter.as_str()),
            ("order", "created_at.asc"),
        ]);
        let rows: Vec<TodoRow> = self.send(request, who)?.json()?;
        Ok(rows.into_iter().map(TodoItem::from).collect())
    }

    fn insert(&self, who: &Identity, text: &str) -> Result<TodoItem, BackendError> {
        let request = self
            .client
            .post(&self.endpoint)
            .header("Prefer", "return=representation")
            .json(&NewTodo {
                text,
                user_id: &who.user_id,
            });
        let rows: Vec<TodoRow> = self.send(request, who)?.json()?;
        rows.into_iter()
            .next()
            .map(TodoItem::from)
            .ok_or_else(|| BackendError::Decode("insert returned no row".to_string()))
    }

    fn set_completed(&self, who: &Identity, id: TodoId, completed: bool) -> Result<(), BackendError> {
        let request = self
            .client
            .patch(&self.endpoint)
            .query(&[("id", id_filter(id))])
            .json(&json!({ "completed": completed }));
        self.send(request, who)?;
        Ok(())
    }

    fn delete(&self, who: &Identity, id: TodoId) -> Result<(), BackendError> {
        let request = self
            .client
            .delete(&self.endpoint)
            .query(&[("id", id_filter(id))]);
        self.send(request, who)?;
        Ok(())
    }
}
