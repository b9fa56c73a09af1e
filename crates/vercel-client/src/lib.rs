//! Vercel Client - deployment CLI wrapper
//!
//! Wraps the Vercel CLI as a black-box subprocess with a known argument
//! grammar and known output shape:
//! - Builds the deploy argument vector (user args, auth token, merged
//!   metadata, optional scope) without duplicating metadata keys the
//!   user already supplied
//! - Streams subprocess output to the log while capturing stdout as the
//!   deployment URL and stderr for the `Inspect:` line
//! - Extracts the project name from `vercel inspect` table output

pub mod args;
pub mod client;
pub mod error;
pub mod inspect;

// Re-export key types
pub use args::{build_deploy_args, merge_metadata, tokenize, DeploymentMeta};
pub use client::{DeploymentResult, VercelClient, VercelSettings};
pub use error::{Result, VercelError};
pub use inspect::{extract_project_name, find_inspect_url};
