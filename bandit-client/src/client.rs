use std::time::Duration;

use reqwest::{header::COOKIE, Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    domain::{
        DescriptionUpdate, Event, LoginDetails, NewEvent, NewTask, SessionInfo, Task, TaskDetail,
        TaskId, TaskListing, TaskWithEvents,
    },
    BanditError, BanditURL, SessionToken, SESSION_COOKIE,
};

/// HTTP client for the Time Bandit backend.
///
/// The client keeps no cookie store. Every authenticated call takes the
/// caller's [`SessionToken`] and forwards it in an explicit `Cookie` header,
/// so one client can serve many sessions. Calls are never retried.
#[derive(Debug, Clone)]
pub struct BanditClient {
    http: Client,
    base_url: BanditURL,
}

impl BanditClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BanditError> {
        let base_url = BanditURL::parse(base_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BanditError::NetworkFailure(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> BanditURL {
        self.base_url.append_path(path)
    }

    async fn send(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<Response, BanditError> {
        tracing::debug!("calling {}", call_name);

        let response = request.send().await.map_err(|e| {
            tracing::error!("{} failed: {}", call_name, e);
            BanditError::from(e)
        })?;

        let status = response.status();
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            tracing::debug!("{} rejected the session ({})", call_name, status);
            return Err(BanditError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("{} returned {}: {}", call_name, status, body);
            return Err(BanditError::UnexpectedStatus { status, body });
        }

        Ok(response)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<T, BanditError> {
        let response = self.send(request, call_name).await?;
        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("failed to parse {} response: {}", call_name, e);
            BanditError::MalformedResponse(format!("{}: {}", call_name, e))
        })
    }

    fn authorized(&self, request: RequestBuilder, token: &SessionToken) -> RequestBuilder {
        request.header(COOKIE, token.as_cookie_header())
    }

    /// Log in and return the session token the backend set.
    ///
    /// Rejected credentials come back as [`BanditError::Unauthorized`]. The
    /// backend answers those with 400, which is folded in here.
    pub async fn login(&self, details: &LoginDetails) -> Result<SessionToken, BanditError> {
        let request = self
            .http
            .post(self.endpoint("/users/login").as_ref())
            .json(details);

        let response = match self.send(request, "POST /users/login").await {
            Ok(response) => response,
            Err(err) if err.is_status(StatusCode::BAD_REQUEST) => {
                return Err(BanditError::Unauthorized)
            }
            Err(err) => return Err(err),
        };

        let token = response
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(BanditError::MissingSessionCookie)?;

        Ok(SessionToken::new(token))
    }

    pub async fn register(&self, details: &LoginDetails) -> Result<(), BanditError> {
        let request = self
            .http
            .post(self.endpoint("/users/register").as_ref())
            .json(details);

        let response = self.send(request, "POST /users/register").await?;
        let _ = response.bytes().await;
        Ok(())
    }

    /// Ask the backend who owns `token`.
    pub async fn session(&self, token: &SessionToken) -> Result<SessionInfo, BanditError> {
        let request = self.authorized(self.http.get(self.endpoint("/auth").as_ref()), token);
        self.fetch(request, "GET /auth").await
    }

    pub async fn tasks(&self, token: &SessionToken) -> Result<Vec<TaskWithEvents>, BanditError> {
        let request = self.authorized(self.http.get(self.endpoint("/tasks").as_ref()), token);
        let listing: Vec<TaskListing> = self.fetch(request, "GET /tasks").await?;

        Ok(listing.into_iter().map(TaskWithEvents::from).collect())
    }

    pub async fn task(
        &self,
        token: &SessionToken,
        task_id: TaskId,
    ) -> Result<TaskDetail, BanditError> {
        let url = self.endpoint(&format!("/tasks/{}", task_id));
        let request = self.authorized(self.http.get(url.as_ref()), token);
        self.fetch(request, "GET /tasks/:id").await
    }

    pub async fn add_task(
        &self,
        token: &SessionToken,
        new_task: &NewTask,
    ) -> Result<Task, BanditError> {
        let request = self.authorized(
            self.http
                .post(self.endpoint("/tasks/add_task").as_ref())
                .json(new_task),
            token,
        );
        self.fetch(request, "POST /tasks/add_task").await
    }

    /// Replace the task's description.
    pub async fn update_task(
        &self,
        token: &SessionToken,
        task_id: TaskId,
        update: &DescriptionUpdate,
    ) -> Result<Task, BanditError> {
        let url = self.endpoint(&format!("/tasks/{}", task_id));
        let request = self.authorized(self.http.put(url.as_ref()).json(update), token);
        self.fetch(request, "PUT /tasks/:id").await
    }

    pub async fn add_event(
        &self,
        token: &SessionToken,
        new_event: &NewEvent,
    ) -> Result<Event, BanditError> {
        let request = self.authorized(
            self.http
                .post(self.endpoint("/events/add_event").as_ref())
                .json(new_event),
            token,
        );
        self.fetch(request, "POST /events/add_event").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_base_url_is_reported() {
        let result = BanditClient::new("localhost:8080", Duration::from_secs(1));
        assert!(matches!(result, Err(BanditError::InvalidBaseUrl(_))));
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_network_failure() {
        // Port 9 (discard) is closed on any sane test host.
        let client = BanditClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = client
            .tasks(&SessionToken::new("token"))
            .await
            .unwrap_err();

        assert!(matches!(err, BanditError::NetworkFailure(_)), "{:?}", err);
    }
}
