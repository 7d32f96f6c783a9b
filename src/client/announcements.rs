// SPDX-License-Identifier: MPL-2.0
//
// Orbit Admin
// Copyright © 2024 C-Parker contributors
//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this file,
//   You can obtain one at https://mozilla.org/MPL/2.0/.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::store::{Announcement, AnnouncementDraft, AnnouncementPatch};

const REQUEST_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("An HTTP error was returned.")]
    Http(#[from] reqwest::Error),

    #[error("{message} ({status})")]
    Api { status: StatusCode, message: String },

    #[error("cannot use {0} as the api url")]
    BaseUrl(Url),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct Deleted {
    success: bool,
}

/// Talks to the announcement API the same way the dashboard does.
pub struct AnnouncementClient {
    http: Client,
    endpoint: Url,
}

impl AnnouncementClient {
    pub fn new(api_url: &Url) -> Result<Self, Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
            .gzip(true)
            .build()?;

        let mut endpoint = api_url.clone();
        endpoint
            .path_segments_mut()
            .map_err(|_| Error::BaseUrl(api_url.clone()))?
            .pop_if_empty()
            .push("announcements");

        Ok(Self { http, endpoint })
    }

    /// Ids are pushed as one escaped path segment.
    fn item(&self, id: &str) -> Url {
        let mut url = self.endpoint.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id);
        }
        url
    }

    pub async fn list(&self) -> Result<Vec<Announcement>, Error> {
        send(self.http.get(self.endpoint.clone())).await
    }

    pub async fn create(&self, draft: &AnnouncementDraft) -> Result<Announcement, Error> {
        send(self.http.post(self.endpoint.clone()).json(draft)).await
    }

    pub async fn update(&self, id: &str, patch: &AnnouncementPatch) -> Result<Announcement, Error> {
        send(self.http.patch(self.item(id)).json(patch)).await
    }

    pub async fn set_hidden(&self, id: &str, is_hidden: bool) -> Result<Announcement, Error> {
        self.update(id, &AnnouncementPatch::hidden(is_hidden)).await
    }

    pub async fn toggle_visibility(&self, announcement: &Announcement) -> Result<Announcement, Error> {
        self.set_hidden(&announcement.id, !announcement.is_hidden)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<bool, Error> {
        let deleted: Deleted = send(self.http.delete(self.item(id))).await?;

        Ok(deleted.success)
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, Error> {
    let response = request.send().await?;
    let status = response.status();

    if status.is_success() {
        return Ok(response.json().await?);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    };

    tracing::debug!("announcement api returned {}: {}", status, message);

    Err(Error::Api { status, message })
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::sync::Arc;

    use poem::listener::{Acceptor, Listener, TcpListener};
    use poem::Server;

    use super::*;
    use crate::responder::manager::app;
    use crate::store::AnnouncementStore;

    async fn serve(dir: &tempfile::TempDir) -> Url {
        let store = Arc::new(AnnouncementStore::new(dir.path().join("announcements.json")));
        let acceptor = TcpListener::bind("127.0.0.1:0")
            .into_acceptor()
            .await
            .unwrap();
        let addr: SocketAddr = *acceptor.local_addr()[0].as_socket_addr().unwrap();

        tokio::spawn(Server::new_with_acceptor(acceptor).run(app(store, "/api/v1", &[])));

        Url::parse(&format!("http://{}/api/v1/", addr)).unwrap()
    }

    #[tokio::test]
    async fn drives_the_api() {
        let dir = tempfile::tempdir().unwrap();
        let client = AnnouncementClient::new(&serve(&dir).await).unwrap();

        assert!(client.list().await.unwrap().is_empty());

        let created = client
            .create(&AnnouncementDraft::new("Maintenance", "System down 2am UTC"))
            .await
            .unwrap();
        assert!(!created.is_hidden);

        let hidden = client.toggle_visibility(&created).await.unwrap();
        assert!(hidden.is_hidden);
        let shown = client.toggle_visibility(&hidden).await.unwrap();
        assert!(!shown.is_hidden);

        let patch = AnnouncementPatch {
            body: Some("System down 3am UTC".into()),
            ..AnnouncementPatch::default()
        };
        let updated = client.update(&created.id, &patch).await.unwrap();
        assert_eq!(updated.body, "System down 3am UTC");
        assert_eq!(updated.title, "Maintenance");

        assert!(client.delete(&created.id).await.unwrap());
        assert!(client.list().await.unwrap().is_empty());
    }

    #[test]
    fn escapes_ids_in_paths() {
        let client =
            AnnouncementClient::new(&Url::parse("http://127.0.0.1:4000/api/v1/").unwrap()).unwrap();

        assert_eq!(
            client.endpoint.as_str(),
            "http://127.0.0.1:4000/api/v1/announcements"
        );
        assert_eq!(
            client.item("a/b?c#d").as_str(),
            "http://127.0.0.1:4000/api/v1/announcements/a%2Fb%3Fc%23d"
        );

        let bare = AnnouncementClient::new(&Url::parse("http://127.0.0.1:4000").unwrap()).unwrap();
        assert_eq!(
            bare.item("17").as_str(),
            "http://127.0.0.1:4000/announcements/17"
        );

        assert!(matches!(
            AnnouncementClient::new(&Url::parse("mailto:admin@example.com").unwrap()),
            Err(Error::BaseUrl(_))
        ));
    }

    #[tokio::test]
    async fn reaches_legacy_ids_with_reserved_characters() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("announcements.json"),
            r#"[{"id":"legacy/1?x","title":"t","body":"b",
                "createdAt":"2023-11-14T22:13:20.000Z","updatedAt":"2023-11-14T22:13:20.000Z"}]"#,
        )
        .unwrap();
        let client = AnnouncementClient::new(&serve(&dir).await).unwrap();

        let hidden = client.set_hidden("legacy/1?x", true).await.unwrap();
        assert_eq!(hidden.id, "legacy/1?x");
        assert!(hidden.is_hidden);

        assert!(client.delete("legacy/1?x").await.unwrap());
        assert!(client.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn surfaces_api_errors() {
        let dir = tempfile::tempdir().unwrap();
        let client = AnnouncementClient::new(&serve(&dir).await).unwrap();

        match client.delete("missing").await {
            Err(Error::Api { status, message }) => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(message, "Announcement not found");
            }
            other => panic!("unexpected result: {:?}", other),
        }

        match client.create(&AnnouncementDraft::new("Title", "")).await {
            Err(Error::Api { status, message }) => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "Title and body are required");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
