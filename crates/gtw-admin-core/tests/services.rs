//! Resource services against a mock backend

#![allow(clippy::unwrap_used, clippy::panic)]

mod common;

use common::Harness;
use gtw_admin_core::Error;
use gtw_admin_types::{
    CaseStudyDraft, JoinTeamApplication, Route, Section, SimpleListItem, SubscriptionFilter,
    SuccessStoryDraft,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_find_submission_by_id() {
    let harness = Harness::signed_in(Route::JoinTeam).await;

    Mock::given(method("GET"))
        .and(path("/api/join-team"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                {"_id": "a", "name": "Grace", "isCompleted": true},
                {"_id": "b", "name": "Linus", "isCompleted": false}
            ]
        })))
        .mount(&harness.server)
        .await;

    let found = harness
        .api
        .submissions
        .find_by_id::<JoinTeamApplication>("b")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.name.as_deref(), Some("Linus"));

    let missing = harness
        .api
        .submissions
        .find_by_id::<JoinTeamApplication>("zzz")
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_subscriptions_query_and_pagination() {
    let harness = Harness::signed_in(Route::Subscriptions).await;

    Mock::given(method("GET"))
        .and(path("/api/subscriptions"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "20"))
        .and(query_param("isActive", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{"_id": "1", "email": "a@gtw.dev", "isActive": false}],
            "pagination": {"total": 41, "pages": 3}
        })))
        .expect(1)
        .mount(&harness.server)
        .await;

    let page = harness
        .api
        .subscriptions
        .list(2, 20, SubscriptionFilter::Inactive)
        .await
        .unwrap();

    assert_eq!(page.subscriptions.len(), 1);
    assert_eq!(page.pagination.page, 2);
    assert_eq!(page.pagination.total, 41);
    assert!(page.pagination.has_next());
    assert!(page.pagination.has_previous());
}

#[tokio::test]
async fn test_unsubscribe_and_delete_subscription() {
    let harness = Harness::signed_in(Route::Subscriptions).await;

    Mock::given(method("POST"))
        .and(path("/api/subscriptions/unsubscribe"))
        .and(body_json(json!({"email": "a@gtw.dev"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "message": "Unsubscribed"})))
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/subscriptions/a%40gtw.dev"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&harness.server)
        .await;

    let ack = harness.api.subscriptions.unsubscribe("a@gtw.dev").await.unwrap();
    assert_eq!(ack.message.as_deref(), Some("Unsubscribed"));
    assert!(harness.api.subscriptions.delete("a@gtw.dev").await.unwrap().success);
}

#[tokio::test]
async fn test_framework_pdf_list_and_delete() {
    let harness = Harness::signed_in(Route::FrameworkPdf).await;

    Mock::given(method("GET"))
        .and(path("/api/framework-pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "forms": [{"_id": "f1", "name": "Ada", "email": "ada@gtw.dev", "phone": 5551234}]
        })))
        .mount(&harness.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/forms/f1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&harness.server)
        .await;

    let entries = harness.api.framework_pdf.list().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries.first().unwrap().phone.as_deref(), Some("5551234"));
    assert!(harness.api.framework_pdf.delete("f1").await.unwrap().success);
}

#[tokio::test]
async fn test_case_study_crud() {
    let harness = Harness::signed_in(Route::CaseStudies).await;

    Mock::given(method("GET"))
        .and(path("/api/case-studies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "c1", "slug": "fintech", "title": "Fintech", "tags": ["rust"],
             "sections": [{"type": "text", "head": "Intro", "content": "Hi"}]}
        ])))
        .mount(&harness.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/case-studies"))
        .and(body_json(json!({
            "slug": "new", "meta_title": "", "meta_description": "", "title": "New",
            "date": "", "category": "", "tags": ["a", "b"], "heroImage": "",
            "sections": [{"type": "list2", "head": "Stack", "content": [{"listing": "Rust"}]}]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"_id": "c2"})))
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/case-studies/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"_id": "c1"})))
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/case-studies/c1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&harness.server)
        .await;

    let existing = harness.api.case_studies.find_by_id("c1").await.unwrap().unwrap();
    assert_eq!(existing.sections.len(), 1);

    let draft = CaseStudyDraft {
        slug: "new".to_string(),
        title: "New".to_string(),
        tags: "a, b,".to_string(),
        sections: vec![Section::List2 {
            head: "Stack".to_string(),
            content: vec![SimpleListItem {
                listing: "Rust".to_string(),
            }],
        }],
        ..CaseStudyDraft::default()
    };
    harness.api.case_studies.create(draft).await.unwrap();

    let edit = CaseStudyDraft::from_existing(&existing);
    harness.api.case_studies.update("c1", edit).await.unwrap();
    harness.api.case_studies.delete("c1").await.unwrap();
}

#[tokio::test]
async fn test_invalid_case_study_draft_sends_nothing() {
    let harness = Harness::signed_in(Route::CaseStudies).await;

    let error = harness
        .api
        .case_studies
        .create(CaseStudyDraft::default())
        .await
        .unwrap_err();

    assert!(matches!(error, Error::Validation { .. }));
    assert!(harness.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_success_story_multipart_upload() {
    let harness = Harness::signed_in(Route::SuccessStories).await;

    Mock::given(method("POST"))
        .and(path("/api/success-stories"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"_id": "s1"})))
        .expect(1)
        .mount(&harness.server)
        .await;

    let mut photo = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    photo.write_all(b"\x89PNG fake").unwrap();

    let draft = SuccessStoryDraft {
        founder_name: "Ada".to_string(),
        founder_post: "CEO".to_string(),
        description: "Shipped".to_string(),
        photo: Some(photo.path().to_path_buf()),
        logo: None,
    };
    harness.api.success_stories.create(&draft).await.unwrap();

    let requests = harness.server.received_requests().await.unwrap();
    let request = requests.first().unwrap();
    let content_type = request.headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data"));

    let body = String::from_utf8_lossy(&request.body);
    assert!(body.contains("name=\"founderName\""));
    assert!(body.contains("name=\"photo\""));
    assert!(!body.contains("name=\"logo\""));
}

#[tokio::test]
async fn test_success_stories_bare_array() {
    let harness = Harness::signed_in(Route::SuccessStories).await;

    Mock::given(method("GET"))
        .and(path("/api/success-stories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "s1", "founderName": "Ada", "photo": "https://cdn.gtw.dev/a.png"}
        ])))
        .mount(&harness.server)
        .await;

    let stories = harness.api.success_stories.list().await.unwrap();
    assert_eq!(stories.first().unwrap().founder_name, "Ada");
}

#[tokio::test]
async fn test_dashboard_counts_failed_sources_as_zero() {
    let harness = Harness::signed_in(Route::Dashboard).await;

    Mock::given(method("GET"))
        .and(path("/api/form"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [
            {"_id": "f1", "name": "Grace", "email": "g@x.io", "createdAt": "2024-03-01T10:00:00Z"},
            {"_id": "f2", "createdAt": "2024-03-03T10:00:00Z"}
        ]})))
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/join-team"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/agency-partnership"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [
            {"_id": "p1", "agencyName": "Pixel", "websiteUrl": "https://pixel.io", "createdAt": "2024-03-02T10:00:00Z"}
        ]})))
        .mount(&harness.server)
        .await;

    let summary = harness.api.dashboard.summary().await.unwrap();
    assert_eq!(summary.total_get_started, 2);
    assert_eq!(summary.total_join_team, 0);
    assert_eq!(summary.total_agency_partnership, 1);
    assert_eq!(summary.total(), 3);

    let ids: Vec<_> = summary.recent_activity.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["f2", "p1", "f1"]);
    let agency = summary.recent_activity.get(1).unwrap();
    assert_eq!((agency.name.as_str(), agency.contact.as_str()), ("Pixel", "https://pixel.io"));
    assert_eq!(summary.recent_activity.first().unwrap().name, "N/A");
}

#[tokio::test]
async fn test_dashboard_propagates_session_expiry() {
    let harness = Harness::signed_in(Route::Dashboard).await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&harness.server)
        .await;

    let error = harness.api.dashboard.summary().await.unwrap_err();
    assert!(error.is_session_expired());
    assert!(harness.tokens.is_empty());
}
