// Copyright (c) 2025 Encore Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Encore seat reservation HTTP server.
//!
//! This crate wires the member directory, Kakao login, session issuance,
//! and venue seat APIs into an axum application.

pub mod api;
pub mod api_response;
pub mod auth_flow;
pub mod error;
pub mod extract;
pub mod routes;

pub use api::{create_app_state, create_router, AppState};
pub use auth_flow::KakaoLoginService;
pub use encore_server_config::ServerConfig;
pub use error::ServerError;
