//! In-memory portal backend used by the application tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ownabee_client::{ApiClient, PortalApi};
use ownabee_core::auth::{AuthTokens, User};
use ownabee_core::entity::{InstitutionParent, ParentStatus, Portfolio, SharedTablet};
use ownabee_core::error::{PortalError, Result};
use ownabee_core::http::{HttpMethod, HttpRequest, HttpResponse, RequestBody, Transport};
use ownabee_core::portal::{InstitutionMembership, InstitutionRole, PortalInfo};
use ownabee_core::transfer::{PortfolioTransfer, SourceAction, TransferPortfoliosRequest};
use serde_json::{Value, json};

pub const BASE_URL: &str = "http://portal.test";
pub const EMAIL: &str = "a@b.com";
pub const PIN: &str = "123456";

struct PortalData {
    access_token: Option<String>,
    refresh_token: Option<String>,
    generation: u32,
    fail_transfers: bool,
    offline: bool,
    tablets: Vec<SharedTablet>,
    parents: Vec<InstitutionParent>,
    portfolios: Vec<Portfolio>,
    transfers: Vec<PortfolioTransfer>,
}

/// Fake REST backend: one admin user, two institutions, a handful of
/// tablets, parents and portfolios. Only the current token pair is
/// accepted.
pub struct FakePortal {
    data: Mutex<PortalData>,
    requests: Mutex<Vec<HttpRequest>>,
    hook: Mutex<Option<RequestHook>>,
}

/// Runs once when the first request to `path` arrives, before it is served.
struct RequestHook {
    path: String,
    action: Box<dyn FnOnce() + Send>,
}

impl FakePortal {
    pub fn new() -> Arc<Self> {
        let tablets = vec![
            tablet("t-1", "inst-1", "prof-t1"),
            tablet("t-2", "inst-1", "prof-t2"),
            tablet("t-9", "inst-2", "prof-t9"),
        ];
        let parents = vec![
            parent("ip-1", "inst-1", ParentStatus::Active, Some("prof-p1")),
            parent("ip-2", "inst-1", ParentStatus::Registered, None),
            parent("ip-9", "inst-2", ParentStatus::Active, Some("prof-p9")),
        ];
        let portfolios = vec![
            portfolio("pf-1", "prof-t1"),
            portfolio("pf-2", "prof-t1"),
            portfolio("pf-3", "prof-t1"),
            portfolio("pf-4", "prof-t2"),
        ];
        Arc::new(Self {
            data: Mutex::new(PortalData {
                access_token: None,
                refresh_token: None,
                generation: 0,
                fail_transfers: false,
                offline: false,
                tablets,
                parents,
                portfolios,
                transfers: Vec::new(),
            }),
            requests: Mutex::new(Vec::new()),
            hook: Mutex::new(None),
        })
    }

    pub fn api(self: &Arc<Self>) -> PortalApi {
        PortalApi::new(Arc::new(ApiClient::new(BASE_URL, self.clone())))
    }

    /// Issues a fresh token pair as if a login had happened earlier.
    pub fn issue_tokens(&self) -> AuthTokens {
        rotate(&mut self.data.lock().unwrap())
    }

    /// The server stops accepting the current access token.
    pub fn expire_access_token(&self) {
        self.data.lock().unwrap().access_token = None;
    }

    pub fn revoke_refresh_token(&self) {
        self.data.lock().unwrap().refresh_token = None;
    }

    pub fn fail_transfers(&self, fail: bool) {
        self.data.lock().unwrap().fail_transfers = fail;
    }

    /// Every request fails at the transport level while offline.
    pub fn set_offline(&self, offline: bool) {
        self.data.lock().unwrap().offline = offline;
    }

    pub fn on_request_to(&self, path: &str, action: impl FnOnce() + Send + 'static) {
        *self.hook.lock().unwrap() = Some(RequestHook {
            path: format!("{}{}", BASE_URL, path),
            action: Box::new(action),
        });
    }

    pub fn portfolio_ids(&self, profile_id: &str) -> Vec<String> {
        self.data
            .lock()
            .unwrap()
            .portfolios
            .iter()
            .filter(|p| p.profile_id == profile_id)
            .map(|p| p.id.clone())
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests_to(&self, path: &str) -> Vec<HttpRequest> {
        let expected = format!("{}{}", BASE_URL, path);
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.url.split('?').next() == Some(expected.as_str()))
            .cloned()
            .collect()
    }

    fn handle(&self, request: &HttpRequest) -> HttpResponse {
        let path = request
            .url
            .strip_prefix(BASE_URL)
            .unwrap_or(&request.url)
            .split('?')
            .next()
            .unwrap_or_default()
            .to_string();
        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
        let body = match &request.body {
            RequestBody::Json(value) => value.clone(),
            _ => Value::Null,
        };
        let mut data = self.data.lock().unwrap();

        match (request.method, segments.as_slice()) {
            (HttpMethod::Post, ["auth", "login", "pin"]) => {
                if body["email"] == EMAIL && body["pin"] == PIN {
                    let tokens = rotate(&mut data);
                    ok(json!({ "tokens": tokens, "user": admin() }))
                } else {
                    reply(401, json!({ "message": "Invalid email or PIN" }))
                }
            }
            (HttpMethod::Post, ["auth", "refresh"]) => {
                let presented = body["refreshToken"].as_str();
                if presented.is_some() && presented == data.refresh_token.as_deref() {
                    ok(json!(rotate(&mut data)))
                } else {
                    reply(401, json!({ "message": "Invalid refresh token" }))
                }
            }
            _ if request.bearer_token().is_none()
                || request.bearer_token() != data.access_token.as_deref() =>
            {
                reply(401, json!({ "message": "Unauthorized" }))
            }
            (HttpMethod::Get, ["portal", "me"]) => {
                let portal_info = PortalInfo {
                    is_operator: false,
                    institutions: vec![InstitutionMembership {
                        institution_id: "inst-1".to_string(),
                        institution_name: Some("Sunflower Kindergarten".to_string()),
                        role: InstitutionRole::Admin,
                    }],
                };
                ok(json!({ "user": admin(), "portalInfo": portal_info }))
            }
            (HttpMethod::Get, ["portal", "institutions", id, "shared-tablets"]) => ok(json!(
                data.tablets
                    .iter()
                    .filter(|t| t.institution_id == *id)
                    .collect::<Vec<_>>()
            )),
            (HttpMethod::Get, ["portal", "institutions", id, "parents"]) => ok(json!(
                data.parents
                    .iter()
                    .filter(|p| p.institution_id == *id)
                    .collect::<Vec<_>>()
            )),
            (HttpMethod::Get, ["portal", "institutions", id, "portfolio-transfers"]) => {
                let parent_ids: Vec<&str> = data
                    .parents
                    .iter()
                    .filter(|p| p.institution_id == *id)
                    .map(|p| p.id.as_str())
                    .collect();
                ok(json!(
                    data.transfers
                        .iter()
                        .filter(|t| parent_ids.contains(&t.institution_parent_id.as_str()))
                        .collect::<Vec<_>>()
                ))
            }
            (HttpMethod::Get, ["portal", "profiles", id, "portfolios"]) => ok(json!(
                data.portfolios
                    .iter()
                    .filter(|p| p.profile_id == *id)
                    .collect::<Vec<_>>()
            )),
            (HttpMethod::Post, ["portal", "portfolio-transfers"]) => transfer(&mut data, body),
            _ => reply(404, json!({ "message": "Not found" })),
        }
    }
}

#[async_trait]
impl Transport for FakePortal {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        // Real transports never answer within the same poll.
        tokio::task::yield_now().await;

        let hook = {
            let mut slot = self.hook.lock().unwrap();
            let matches = slot
                .as_ref()
                .is_some_and(|h| request.url.split('?').next() == Some(h.path.as_str()));
            if matches { slot.take() } else { None }
        };
        if let Some(hook) = hook {
            (hook.action)();
        }

        if self.data.lock().unwrap().offline {
            return Err(PortalError::network("offline"));
        }
        let response = self.handle(&request);
        self.requests.lock().unwrap().push(request);
        Ok(response)
    }
}

fn transfer(data: &mut PortalData, body: Value) -> HttpResponse {
    if data.fail_transfers {
        return reply(500, json!({ "error": "Transfer service unavailable" }));
    }
    let request: TransferPortfoliosRequest = match serde_json::from_value(body) {
        Ok(request) => request,
        Err(e) => return reply(400, json!({ "message": e.to_string() })),
    };
    let Some(target) = data
        .parents
        .iter()
        .find(|p| p.id == request.institution_parent_id)
        .and_then(|p| p.profile_id.clone())
    else {
        return reply(400, json!({ "message": "Parent cannot receive portfolios" }));
    };

    for id in &request.portfolio_ids {
        let Some(source) = data
            .portfolios
            .iter()
            .find(|p| &p.id == id && p.profile_id == request.source_profile_id)
            .cloned()
        else {
            return reply(404, json!({ "message": format!("Portfolio {} not found", id) }));
        };
        data.portfolios.push(Portfolio {
            id: format!("{}-copy", source.id),
            profile_id: target.clone(),
            ..source
        });
    }
    if request.source_action == SourceAction::Delete {
        data.portfolios
            .retain(|p| {
                p.profile_id != request.source_profile_id || !request.portfolio_ids.contains(&p.id)
            });
    }

    let record = PortfolioTransfer {
        id: format!("tr-{}", data.transfers.len() + 1),
        source_profile_id: request.source_profile_id,
        target_profile_id: Some(target),
        institution_parent_id: request.institution_parent_id,
        portfolio_ids: request.portfolio_ids,
        source_action: request.source_action,
        created_at: None,
        created_by: Some("u-admin".to_string()),
    };
    data.transfers.push(record.clone());
    reply(201, json!(record))
}

fn rotate(data: &mut PortalData) -> AuthTokens {
    data.generation += 1;
    let tokens = AuthTokens::new(
        format!("access-{}", data.generation),
        format!("refresh-{}", data.generation),
    );
    data.access_token = Some(tokens.access_token.clone());
    data.refresh_token = Some(tokens.refresh_token.clone());
    tokens
}

fn ok(body: Value) -> HttpResponse {
    reply(200, body)
}

fn reply(status: u16, body: Value) -> HttpResponse {
    HttpResponse::json_body(status, &body)
}

pub fn admin() -> User {
    User {
        id: "u-admin".to_string(),
        email: EMAIL.to_string(),
        name: Some("Admin".to_string()),
        profile_image_url: None,
        role: None,
    }
}

fn tablet(id: &str, institution_id: &str, profile_id: &str) -> SharedTablet {
    SharedTablet {
        id: id.to_string(),
        institution_id: institution_id.to_string(),
        class_id: None,
        name: format!("Tablet {}", id),
        profile_id: profile_id.to_string(),
    }
}

fn parent(
    id: &str,
    institution_id: &str,
    status: ParentStatus,
    profile_id: Option<&str>,
) -> InstitutionParent {
    InstitutionParent {
        id: id.to_string(),
        institution_id: institution_id.to_string(),
        email: format!("{}@parents.test", id),
        name: None,
        status,
        profile_id: profile_id.map(str::to_string),
        created_at: None,
    }
}

fn portfolio(id: &str, profile_id: &str) -> Portfolio {
    Portfolio {
        id: id.to_string(),
        profile_id: profile_id.to_string(),
        title: format!("Portfolio {}", id),
        description: None,
        cover_image_url: None,
        content_items: Vec::new(),
        created_at: None,
        updated_at: None,
    }
}
