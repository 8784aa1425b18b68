//! EC2 provider error types

use cloudbridge_core::CloudError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Ec2Error {
    #[error("EC2 authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("EC2 API request failed: {0}")]
    Api(String),

    #[error("Invalid EC2 endpoint: {0}")]
    InvalidEndpoint(String),
}

impl From<Ec2Error> for CloudError {
    fn from(err: Ec2Error) -> Self {
        match err {
            Ec2Error::AuthenticationFailed(msg) => CloudError::AuthenticationFailed(msg),
            Ec2Error::InvalidEndpoint(msg) => CloudError::InvalidConfig(msg),
            Ec2Error::Api(msg) => CloudError::ApiError(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, Ec2Error>;
