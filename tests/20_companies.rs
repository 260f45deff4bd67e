mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

// Company lifecycle against a running server and a real database.
// Requires DATABASE_URL with sql/schema.sql applied; skips otherwise.

fn unique_handle(tag: &str) -> String {
    format!("{}-{}", tag, std::process::id())
}

#[tokio::test]
async fn company_lifecycle() -> Result<()> {
    if !common::test_env_ready() {
        eprintln!("skipping company_lifecycle: DATABASE_URL not set");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let token = common::auth_token(server).await?;
    let client = reqwest::Client::new();
    let handle = unique_handle("testco");

    // Create
    let res = client
        .post(format!("{}/companies", server.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "handle": handle,
            "name": "Test Co",
            "description": "integration fixture",
            "numEmployees": 42,
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED, "create failed");
    let created = res.json::<serde_json::Value>().await?;
    assert_eq!(created["company"]["handle"], handle.as_str());
    assert_eq!(created["company"]["numEmployees"], 42);

    // Duplicate create is rejected before insert
    let res = client
        .post(format!("{}/companies", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "handle": handle, "name": "Test Co" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST, "duplicate create should 400");

    // Get includes a jobs array
    let res = client
        .get(format!("{}/companies/{}", server.base_url, handle))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let shown = res.json::<serde_json::Value>().await?;
    assert!(shown["company"]["jobs"].is_array());

    // Partial update changes only the provided fields
    let res = client
        .patch(format!("{}/companies/{}", server.base_url, handle))
        .bearer_auth(&token)
        .json(&json!({ "name": "Renamed Co" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated = res.json::<serde_json::Value>().await?;
    assert_eq!(updated["company"]["name"], "Renamed Co");
    assert_eq!(updated["company"]["numEmployees"], 42);

    // Explicit null clears the column; absent fields still keep their value
    let res = client
        .patch(format!("{}/companies/{}", server.base_url, handle))
        .bearer_auth(&token)
        .json(&json!({ "numEmployees": null }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let cleared = res.json::<serde_json::Value>().await?;
    assert!(cleared["company"]["numEmployees"].is_null());
    assert_eq!(cleared["company"]["name"], "Renamed Co");

    // Empty update payload is rejected
    let res = client
        .patch(format!("{}/companies/{}", server.base_url, handle))
        .bearer_auth(&token)
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST, "empty patch should 400");

    // Delete, then delete again: NotFound both the second and any later time
    let res = client
        .delete(format!("{}/companies/{}", server.base_url, handle))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let deleted = res.json::<serde_json::Value>().await?;
    assert_eq!(deleted["deleted"], handle.as_str());

    for _ in 0..2 {
        let res = client
            .delete(format!("{}/companies/{}", server.base_url, handle))
            .bearer_auth(&token)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    // Updating the deleted company is NotFound too
    let res = client
        .patch(format!("{}/companies/{}", server.base_url, handle))
        .bearer_auth(&token)
        .json(&json!({ "name": "Ghost" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn company_filters_and_auth() -> Result<()> {
    if !common::test_env_ready() {
        eprintln!("skipping company_filters_and_auth: DATABASE_URL not set");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // Unsatisfiable range fails before any store access
    let res = client
        .get(format!(
            "{}/companies?minEmployees=5&maxEmployees=1",
            server.base_url
        ))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Zero filters returns the full list
    let res = client
        .get(format!("{}/companies", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let payload = res.json::<serde_json::Value>().await?;
    assert!(payload["companies"].is_array());

    // Unknown company is NotFound
    let res = client
        .get(format!("{}/companies/no-such-company", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Mutations without a token are rejected
    let res = client
        .post(format!("{}/companies", server.base_url))
        .json(&json!({ "handle": "nope", "name": "Nope" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}
