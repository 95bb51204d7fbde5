//! Middleware and extractors for authentication and authorization.
//!
//! # Modules
//!
//! - [`auth`]: the [`AuthUser`](auth::AuthUser) extractor and the
//!   `require_auth` gate
//! - [`role`]: the `require_admin` gate
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `require_auth` verifies the token and stores an `AuthUser` in the
//!    request extensions (401 on failure)
//! 3. `require_admin`, where layered, rejects non-admins with 403
//! 4. Handlers take `AuthUser` as an argument; the extractor reuses the
//!    stored value instead of decoding the token again
//!
//! ```ignore
//! let admin_routes = init_admin_router()
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));
//! ```

pub mod auth;
pub mod role;
