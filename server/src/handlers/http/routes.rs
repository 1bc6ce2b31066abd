use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use anyhow::{Context, Result};
use bytes::Bytes;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::Incoming;
use hyper::{Method, Request, StatusCode};
use tracing::{error, info, warn};

use crate::AppState;
use crate::auth::AuthContext;
use crate::auth::workflow::{authenticate, authenticate_session};
use crate::error::ApiError;
use crate::handlers::http::utils::*;
use crate::handlers::http::{admin, auth, books};
use crate::messages;

use bookstore_shared::types::JwtClaims;

// ---------------------------------------------------------------------------
// Handler type aliases
// ---------------------------------------------------------------------------
//
// Three security tiers:
//
//   RouteHandler : no auth.  Receives (req, state).
//                   Use for: login, register, catalog reads, /health.
//
//   LightHandler : JWT signature + expiry + revocation, zero DB reads.
//                   Receives (req, state, claims).
//                   Use for: admin GET routes that only read data.
//
//   HardHandler  : Light checks + the token must still be recorded for an
//                   active user.  Receives (req, state, ctx).
//                   Use for: POST / PUT / DELETE, anything that mutates state.

type HandlerFuture = Pin<Box<dyn Future<Output = Result<ApiResponse>> + Send>>;

type RouteHandler = Box<dyn Fn(ApiRequest, AppState) -> HandlerFuture + Send + Sync>;

type LightHandler = Box<dyn Fn(ApiRequest, AppState, JwtClaims) -> HandlerFuture + Send + Sync>;

type HardHandler = Box<dyn Fn(ApiRequest, AppState, AuthContext) -> HandlerFuture + Send + Sync>;

// ---------------------------------------------------------------------------
// RouteKind
// ---------------------------------------------------------------------------

enum RouteKind {
    /// No authentication check.
    Open(RouteHandler),

    /// Light auth: JWT signature, expiry and revocation only.
    Light(LightHandler),

    /// Hard auth: Light checks plus a `user_tokens` lookup.
    Hard(HardHandler),
}

struct Route {
    method: Method,
    path: String,
    kind: RouteKind,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Routes are tried in registration order; register literal paths before
/// `:param` paths that would also match them.
pub struct Router {
    routes: Vec<Route>,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes_count", &self.routes.len())
            .finish()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    fn open<F, Fut>(mut self, method: Method, path: &str, handler: F) -> Self
    where
        F: Fn(ApiRequest, AppState) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ApiResponse>> + Send + 'static,
    {
        self.routes.push(Route {
            method,
            path: path.to_string(),
            kind: RouteKind::Open(Box::new(move |req, state| Box::pin(handler(req, state)))),
        });
        self
    }

    fn light<F, Fut>(mut self, method: Method, path: &str, handler: F) -> Self
    where
        F: Fn(ApiRequest, AppState, JwtClaims) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ApiResponse>> + Send + 'static,
    {
        self.routes.push(Route {
            method,
            path: path.to_string(),
            kind: RouteKind::Light(Box::new(move |req, state, claims| {
                Box::pin(handler(req, state, claims))
            })),
        });
        self
    }

    fn hard<F, Fut>(mut self, method: Method, path: &str, handler: F) -> Self
    where
        F: Fn(ApiRequest, AppState, AuthContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ApiResponse>> + Send + 'static,
    {
        self.routes.push(Route {
            method,
            path: path.to_string(),
            kind: RouteKind::Hard(Box::new(move |req, state, ctx| {
                Box::pin(handler(req, state, ctx))
            })),
        });
        self
    }

    // ── Open (no auth) ────────────────────────────────────────────────────────

    pub fn get<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(ApiRequest, AppState) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ApiResponse>> + Send + 'static,
    {
        self.open(Method::GET, path, handler)
    }

    /// POST with no authentication: login / register only.
    pub fn post<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(ApiRequest, AppState) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ApiResponse>> + Send + 'static,
    {
        self.open(Method::POST, path, handler)
    }

    // ── Light auth ────────────────────────────────────────────────────────────
    //
    // The router verifies the JWT and checks the revocation registry before
    // the handler is called.  Handlers receive `JwtClaims`.

    pub fn get_light<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(ApiRequest, AppState, JwtClaims) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ApiResponse>> + Send + 'static,
    {
        self.light(Method::GET, path, handler)
    }

    // ── Hard auth ─────────────────────────────────────────────────────────────
    //
    // Light checks plus a `user_tokens` lookup, so a deactivated or deleted
    // user is rejected even before their token expires.  Handlers receive the
    // verified `AuthContext` and must NOT call any auth function themselves.

    pub fn post_hard<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(ApiRequest, AppState, AuthContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ApiResponse>> + Send + 'static,
    {
        self.hard(Method::POST, path, handler)
    }

    pub fn put_hard<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(ApiRequest, AppState, AuthContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ApiResponse>> + Send + 'static,
    {
        self.hard(Method::PUT, path, handler)
    }

    pub fn delete_hard<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(ApiRequest, AppState, AuthContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ApiResponse>> + Send + 'static,
    {
        self.hard(Method::DELETE, path, handler)
    }

    // ── Dispatch ──────────────────────────────────────────────────────────────

    pub async fn route(&self, req: ApiRequest, state: AppState) -> Result<ApiResponse> {
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        for route in &self.routes {
            if route.method != method || !Self::path_matches(&route.path, &path) {
                continue;
            }

            return match &route.kind {
                RouteKind::Open(h) => h(req, state).await,

                RouteKind::Light(h) => {
                    let Some(token) = get_bearer_token(&req) else {
                        warn!("Light-auth rejected {} {}: no bearer token", method, path);
                        return unauthorized();
                    };
                    match authenticate(&state, &token) {
                        Ok(claims) => h(req, state, claims).await,
                        Err(_) => {
                            warn!("Light-auth rejected {} {}", method, path);
                            unauthorized()
                        }
                    }
                }

                RouteKind::Hard(h) => {
                    let Some(token) = get_bearer_token(&req) else {
                        warn!("Hard-auth rejected {} {}: no bearer token", method, path);
                        return unauthorized();
                    };
                    match authenticate_session(&state, &token).await {
                        Ok(ctx) => h(req, state, ctx).await,
                        Err(e @ ApiError::Internal(_)) => deliver_api_error(&e),
                        Err(_) => {
                            warn!("Hard-auth rejected {} {}", method, path);
                            unauthorized()
                        }
                    }
                }
            };
        }

        deliver_error_json("NOT_FOUND", "Endpoint not found", StatusCode::NOT_FOUND)
            .context("Failed to deliver 404 response")
    }

    // ── Path matching ─────────────────────────────────────────────────────────

    pub fn path_matches(route_path: &str, request_path: &str) -> bool {
        // Strip query string from incoming request path before comparing.
        let clean = request_path.split('?').next().unwrap_or(request_path);

        if route_path == clean {
            return true;
        }

        // Segment-by-segment matching for `:param` wildcards.
        // e.g.  "/api/books/:id"  matches  "/api/books/42"
        let route_segs: Vec<&str> = route_path.split('/').collect();
        let path_segs: Vec<&str> = clean.split('/').collect();

        if route_segs.len() != path_segs.len() {
            return false;
        }

        route_segs
            .iter()
            .zip(path_segs.iter())
            .all(|(r, p)| (r.starts_with(':') && !p.is_empty()) || r == p)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn unauthorized() -> Result<ApiResponse> {
    deliver_error_json(
        "UNAUTHORIZED",
        messages::AUTH_REQUIRED,
        StatusCode::UNAUTHORIZED,
    )
    .context("Failed to deliver 401 response")
}

fn forbidden() -> Result<ApiResponse> {
    deliver_error_json(
        "FORBIDDEN",
        messages::INSUFFICIENT_PRIVILEGES,
        StatusCode::FORBIDDEN,
    )
    .context("Failed to deliver 403 response")
}

/// Collect the body (bounded by `server.max_body_bytes`), route it, and turn
/// any handler failure into a generic 500.
pub async fn serve_request(
    router: Arc<Router>,
    state: AppState,
    req: Request<Incoming>,
) -> std::result::Result<ApiResponse, Infallible> {
    let max_body = state.config.read().await.server.max_body_bytes;
    let (parts, body) = req.into_parts();

    let bytes: Bytes = match Limited::new(body, max_body).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            warn!("Request body over {} bytes rejected", max_body);
            return Ok(deliver_error_json(
                "PAYLOAD_TOO_LARGE",
                "Request body too large",
                StatusCode::PAYLOAD_TOO_LARGE,
            )
            .unwrap_or_else(|_| internal_error_response()));
        }
        Err(e) => {
            warn!("Failed to read request body: {}", e);
            return Ok(deliver_error_json(
                "BAD_REQUEST",
                "Could not read request body",
                StatusCode::BAD_REQUEST,
            )
            .unwrap_or_else(|_| internal_error_response()));
        }
    };

    let req = Request::from_parts(parts, bytes);
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    match router.route(req, state).await {
        Ok(response) => {
            info!("{} {} -> {}", method, path, response.status().as_u16());
            Ok(response)
        }
        Err(e) => {
            error!("{} {} failed: {:#}", method, path, e);
            Ok(internal_error_response())
        }
    }
}

// ---------------------------------------------------------------------------
// API router
//
// Auth tier is enforced here at the routing level: handlers MUST NOT repeat
// the auth call.  The contract is:
//
//   .get(...)          → Open    : handler gets (req, state)
//   .post(...)         → Open    : login / register only
//   .get_light(...)    → Light   : handler gets (req, state, claims)
//   .post_hard(...)    → Hard    : handler gets (req, state, ctx)
//   .put_hard(...)     → Hard    : same
//   .delete_hard(...)  → Hard    : same
//
// Admin routes additionally check the role claim before calling the handler.
// ---------------------------------------------------------------------------

pub fn build_api_router() -> Router {
    Router::new()
        // ── Public ───────────────────────────────────────────────────────────
        .get("/health", |_req, _state| async move {
            deliver_serialized_json(
                &serde_json::json!({ "status": "success", "health": "ok" }),
                StatusCode::OK,
            )
        })
        .post("/api/auth/register", |req, state| async move {
            auth::handle_register(req, state)
                .await
                .context("Register failed")
        })
        .post("/api/auth/login", |req, state| async move {
            auth::handle_login(req, state).await.context("Login failed")
        })
        // Bootstrap-or-admin; the handler checks the optional token itself.
        .post("/api/admin/register", |req, state| async move {
            admin::handle_register_admin(req, state)
                .await
                .context("Admin register failed")
        })
        // ── Catalog reads (literal paths before /:id) ────────────────────────
        .get("/api/books", |req, state| async move {
            books::handle_list_books(req, state)
                .await
                .context("Book list failed")
        })
        .get("/api/books/search", |req, state| async move {
            books::handle_search(req, state)
                .await
                .context("Book search failed")
        })
        .get("/api/books/advancedsearch", |req, state| async move {
            books::handle_advanced_search(req, state)
                .await
                .context("Advanced search failed")
        })
        .get("/api/books/sortbyrange", |req, state| async move {
            books::handle_sort_by_range(req, state)
                .await
                .context("Price range failed")
        })
        .get("/api/books/:id", |req, state| async move {
            books::handle_get_book(req, state)
                .await
                .context("Book get failed")
        })
        // ── Account (hard auth) ──────────────────────────────────────────────
        .post_hard("/api/auth/logout", |req, state, ctx| async move {
            auth::handle_logout(req, state, ctx)
                .await
                .context("Logout failed")
        })
        .put_hard("/api/auth/update-details", |req, state, ctx| async move {
            auth::handle_update_details(req, state, ctx)
                .await
                .context("Update details failed")
        })
        .put_hard("/api/auth/update-password", |req, state, ctx| async move {
            auth::handle_update_password(req, state, ctx)
                .await
                .context("Update password failed")
        })
        // ── Catalog writes (hard auth) ───────────────────────────────────────
        .post_hard("/api/books", |req, state, ctx| async move {
            books::handle_create_book(req, state, ctx)
                .await
                .context("Book create failed")
        })
        .put_hard("/api/books/:id", |req, state, ctx| async move {
            books::handle_update_book(req, state, ctx)
                .await
                .context("Book update failed")
        })
        .delete_hard("/api/books/:isbn", |req, state, ctx| async move {
            books::handle_delete_book(req, state, ctx)
                .await
                .context("Book delete failed")
        })
        // ── Admin reads (light auth + role) ──────────────────────────────────
        .get_light("/api/admin/loggedinusers", |req, state, claims| async move {
            if !claims.is_admin() {
                return forbidden();
            }
            admin::handle_logged_in_users(req, state)
                .await
                .context("Logged-in users failed")
        })
        .get_light("/api/admin/registered-users", |req, state, claims| async move {
            if !claims.is_admin() {
                return forbidden();
            }
            admin::handle_registered_users(req, state)
                .await
                .context("Registered users failed")
        })
        .get_light("/api/admin/books-count-by-user", |req, state, claims| async move {
            if !claims.is_admin() {
                return forbidden();
            }
            admin::handle_books_count_by_user(req, state)
                .await
                .context("Books count failed")
        })
        .get_light("/api/admin/books-by-user/:userId", |req, state, claims| async move {
            if !claims.is_admin() {
                return forbidden();
            }
            admin::handle_books_by_user(req, state)
                .await
                .context("Books by user failed")
        })
        // ── Admin writes (hard auth + role) ──────────────────────────────────
        .post_hard("/api/admin/deactivate-user/:userId", |req, state, ctx| async move {
            if !ctx.claims.is_admin() {
                return forbidden();
            }
            admin::handle_deactivate_user(req, state, ctx)
                .await
                .context("Deactivate user failed")
        })
        .delete_hard("/api/admin/users/:userId", |req, state, ctx| async move {
            if !ctx.claims.is_admin() {
                return forbidden();
            }
            admin::handle_delete_user(req, state, ctx)
                .await
                .context("Delete user failed")
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_path_matches() {
        assert!(Router::path_matches("/api/books", "/api/books"));
    }

    #[test]
    fn different_paths_do_not_match() {
        assert!(!Router::path_matches("/api/books", "/api/admin"));
    }

    #[test]
    fn trailing_slash_does_not_match_without_slash() {
        assert!(!Router::path_matches("/api/books", "/api/books/"));
    }

    #[test]
    fn wildcard_segment_matches_numeric_id() {
        assert!(Router::path_matches("/api/books/:id", "/api/books/42"));
    }

    #[test]
    fn wildcard_requires_non_empty_segment() {
        assert!(!Router::path_matches("/api/books/:id", "/api/books/"));
    }

    #[test]
    fn wildcard_does_not_match_extra_segments() {
        assert!(!Router::path_matches(
            "/api/admin/users/:userId",
            "/api/admin/users/9/books"
        ));
    }

    #[test]
    fn query_string_stripped_before_match() {
        assert!(Router::path_matches(
            "/api/books/search",
            "/api/books/search?query=dune"
        ));
    }

    #[test]
    fn router_new_has_no_routes() {
        assert!(Router::new().routes.is_empty());
    }

    #[test]
    fn literal_routes_precede_id_route() {
        let router = build_api_router();
        let first_match = router
            .routes
            .iter()
            .find(|r| r.method == Method::GET && Router::path_matches(&r.path, "/api/books/search"))
            .map(|r| r.path.as_str());
        assert_eq!(first_match, Some("/api/books/search"));
    }

    #[test]
    fn mutating_routes_use_hard_auth() {
        let router = build_api_router();
        for route in &router.routes {
            if route.method != Method::GET && !route.path.contains("register") && !route.path.ends_with("login") {
                assert!(
                    matches!(route.kind, RouteKind::Hard(_)),
                    "{} {} should use hard auth",
                    route.method,
                    route.path
                );
            }
        }
    }

    #[test]
    fn router_get_light_adds_light_route() {
        let r = Router::new().get_light("/api/test", |_req, _state, _claims| async move {
            deliver_message("ok", StatusCode::OK)
        });
        assert_eq!(r.routes.len(), 1);
        assert!(matches!(r.routes[0].kind, RouteKind::Light(_)));
    }
}
