// SPDX-License-Identifier: MPL-2.0
//
// Orbit Admin
// Copyright © 2024 C-Parker contributors
//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this file,
//   You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::Arc;

use poem::{
    get,
    http::Method,
    listener::TcpListener,
    middleware::{Cors, NormalizePath, Tracing, TrailingSlash},
    patch, Endpoint, EndpointExt, Route, Server,
};

use super::routes;
use crate::config::Config;
use crate::store::AnnouncementStore;

pub fn app(
    store: Arc<AnnouncementStore>,
    path_prefix: &str,
    allowed_origins: &[String],
) -> impl Endpoint {
    let api = Route::new()
        .at("/announcements", get(routes::list).post(routes::create))
        .at(
            "/announcements/:id",
            patch(routes::update).delete(routes::delete),
        );

    let prefix = path_prefix.trim_end_matches('/');
    let route = if prefix.is_empty() {
        api
    } else {
        Route::new().nest(prefix, api)
    };

    // No configured origin means any origin may call the API
    let cors = allowed_origins
        .iter()
        .fold(Cors::new(), |cors, origin| cors.allow_origin(origin.as_str()))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE]);

    route
        .data(store)
        .with(NormalizePath::new(TrailingSlash::Trim))
        .with(cors)
        .with(Tracing)
}

pub async fn run(conf: &Config) -> std::io::Result<()> {
    let store = Arc::new(AnnouncementStore::new(&conf.store.path));

    tracing::info!(
        "serving announcements from {:?} on {}",
        store.path(),
        conf.server.inet
    );

    let app = app(
        store,
        &conf.server.path_prefix,
        &conf.server.allowed_origins,
    );

    Server::new(TcpListener::bind(conf.server.inet))
        .run_with_graceful_shutdown(
            app,
            async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("received shutdown signal");
            },
            None,
        )
        .await
}

#[cfg(test)]
mod tests {
    use poem::http::StatusCode;
    use poem::test::TestClient;
    use serde_json::json;

    use super::*;
    use crate::store::Announcement;

    fn client(dir: &tempfile::TempDir, prefix: &str) -> TestClient<impl Endpoint> {
        let store = Arc::new(AnnouncementStore::new(dir.path().join("announcements.json")));

        TestClient::new(app(store, prefix, &[]))
    }

    #[tokio::test]
    async fn announcement_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let cli = client(&dir, "");

        let resp = cli
            .post("/announcements")
            .body_json(&json!({"title": "Maintenance", "body": "System down 2am UTC"}))
            .send()
            .await;
        resp.assert_status(StatusCode::CREATED);
        let created: Announcement = resp.0.into_body().into_json().await.unwrap();
        assert_eq!(created.title, "Maintenance");
        assert!(!created.is_hidden);

        let resp = cli.get("/announcements").send().await;
        resp.assert_status_is_ok();
        let listed: Vec<Announcement> = resp.0.into_body().into_json().await.unwrap();
        assert_eq!(listed, vec![created.clone()]);

        let resp = cli
            .patch(format!("/announcements/{}", created.id))
            .body_json(&json!({"isHidden": true}))
            .send()
            .await;
        resp.assert_status_is_ok();
        let updated: Announcement = resp.0.into_body().into_json().await.unwrap();
        assert!(updated.is_hidden);
        assert_eq!(updated.title, created.title);

        let resp = cli
            .delete(format!("/announcements/{}", created.id))
            .send()
            .await;
        resp.assert_status_is_ok();
        resp.assert_json(json!({"success": true})).await;

        let resp = cli.get("/announcements").send().await;
        resp.assert_status_is_ok();
        resp.assert_json(json!([])).await;
    }

    #[tokio::test]
    async fn missing_fields_are_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let cli = client(&dir, "");

        let resp = cli
            .post("/announcements")
            .body_json(&json!({"title": "No body"}))
            .send()
            .await;

        resp.assert_status(StatusCode::BAD_REQUEST);
        resp.assert_json(json!({"error": "Title and body are required"}))
            .await;

        let resp = cli.get("/announcements").send().await;
        resp.assert_json(json!([])).await;
    }

    #[tokio::test]
    async fn undecodable_bodies_get_json_errors() {
        let dir = tempfile::tempdir().unwrap();
        let cli = client(&dir, "");
        let invalid = json!({"error": "Invalid request body"});

        let resp = cli
            .post("/announcements")
            .body_json(&json!({"title": 5, "body": "x"}))
            .send()
            .await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        resp.assert_json(&invalid).await;

        let resp = cli
            .post("/announcements")
            .content_type("application/json")
            .body("not json")
            .send()
            .await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        resp.assert_json(&invalid).await;

        let resp = cli
            .patch("/announcements/1")
            .body_json(&json!({"isHidden": "yes"}))
            .send()
            .await;
        resp.assert_status(StatusCode::NOT_FOUND);
        resp.assert_json(json!({"error": "Announcement not found"}))
            .await;

        let created: Announcement = cli
            .post("/announcements")
            .body_json(&json!({"title": "Title", "body": "Body"}))
            .send()
            .await
            .0
            .into_body()
            .into_json()
            .await
            .unwrap();

        let resp = cli
            .patch(format!("/announcements/{}", created.id))
            .body_json(&json!({"isHidden": "yes"}))
            .send()
            .await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        resp.assert_json(&invalid).await;

        let resp = cli.get("/announcements").send().await;
        resp.assert_json(json!([created])).await;
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let cli = client(&dir, "");

        let resp = cli
            .patch("/announcements/42")
            .body_json(&json!({"isHidden": true}))
            .send()
            .await;
        resp.assert_status(StatusCode::NOT_FOUND);
        resp.assert_json(json!({"error": "Announcement not found"}))
            .await;

        let resp = cli.delete("/announcements/42").send().await;
        resp.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn corrupt_store_is_internal_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("announcements.json"), "[{").unwrap();
        let cli = client(&dir, "");

        let resp = cli.get("/announcements").send().await;

        resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        resp.assert_json(json!({"error": "Failed to access announcements"}))
            .await;
    }

    #[tokio::test]
    async fn mounts_under_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let cli = client(&dir, "/api/v1/");

        cli.get("/api/v1/announcements")
            .send()
            .await
            .assert_status_is_ok();
        cli.get("/api/v1/announcements/")
            .send()
            .await
            .assert_status_is_ok();
        cli.get("/announcements")
            .send()
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
