//! Collaborators backed by the AWS SDK.
//!
//! Clients are built once per process from a single shared `SdkConfig`
//! and cloned into each wrapper.

pub mod dynamodb;
pub mod s3;
pub mod sns;
pub mod textract;

pub use dynamodb::DynamoRecordStore;
pub use s3::S3ObjectStore;
pub use sns::SnsNotifier;
pub use textract::TextractDetector;

use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Load the shared SDK configuration, pinning the region when one is given.
pub async fn load_sdk_config(region: Option<&str>) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = region {
        loader = loader.region(Region::new(region.to_string()));
    }
    loader.load().await
}
