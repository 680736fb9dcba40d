// Library root
// -----------
// This crate exposes a small library surface for scripts that talk to the
// Launchpad API. The binary (`main.rs`) is a thin wrapper over the same
// modules.
//
// Module responsibilities:
// - `env`: the fixed table of Launchpad environments (dev, staging,
//   production) with their endpoints and credential file names.
// - `api`: the `Launchpad` client handle, the credential record, and the
//   HTTP/interactive authorization gateway.
// - `auth`: credential-file handling and the `lp_factory` entry point that
//   ties environment selection, loading and the handshake together.
// - `error`: the typed failures callers may want to match on.
//
// Scripts normally only need `auth::lp_factory`.
pub mod api;
pub mod auth;
pub mod env;
pub mod error;
