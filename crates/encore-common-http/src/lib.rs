// Copyright (c) 2025 Encore Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for Encore.
//!
//! This crate provides a pre-configured HTTP client with a consistent
//! User-Agent header and a bounded default timeout, so no outbound call can
//! hang a request indefinitely.

mod client;

pub use client::{builder, new_client, new_client_with_timeout, user_agent, DEFAULT_TIMEOUT};
