//! AWS service access for the tools.
//!
//! Tools depend on the capability traits in [`client`], never on SDK clients
//! directly, so tests can substitute in-memory implementations.

pub mod client;
pub(crate) mod convert;
pub(crate) mod error;
pub mod model;
pub mod sdk;

pub use client::{AwsClients, CloudFormationApi, ConfigApi, FisApi, ResourceExplorerApi};
pub use sdk::{SdkCloudFormationClient, SdkConfigClient, SdkFisClient, SdkResourceExplorerClient};

use aws_config::retry::RetryConfig;
use aws_config::BehaviorVersion;
use aws_types::app_name::AppName;
use aws_types::region::Region;
use aws_types::SdkConfig;
use tracing::{info, warn};

/// Attempts per request, including the first, before an SDK call fails
pub const MAX_ATTEMPTS: u32 = 10;

/// Settings for the shared AWS SDK configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsSettings {
    pub region: String,
    pub profile: Option<String>,
    /// Appended to the SDK user agent
    pub app_name: String,
}

/// Load the SDK configuration shared by every service client.
///
/// Credentials come from the default provider chain (environment, shared
/// profiles, SSO, instance metadata). Requests use standard retry mode.
pub async fn load_sdk_config(settings: &AwsSettings) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(settings.region.clone()))
        .retry_config(RetryConfig::standard().with_max_attempts(MAX_ATTEMPTS));

    match AppName::new(settings.app_name.clone()) {
        Ok(app_name) => loader = loader.app_name(app_name),
        Err(e) => warn!(app_name = %settings.app_name, error = %e, "ignoring invalid app name"),
    }

    if let Some(profile) = &settings.profile {
        loader = loader.profile_name(profile);
    }

    let config = loader.load().await;
    info!(
        region = %settings.region,
        profile = settings.profile.as_deref().unwrap_or("default"),
        "loaded AWS configuration"
    );
    config
}
