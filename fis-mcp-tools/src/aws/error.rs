//! Classification of AWS SDK failures into [`ServiceError`]

use std::error::Error as StdError;

use aws_smithy_runtime_api::client::result::SdkError;
use aws_smithy_types::error::metadata::ProvideErrorMetadata;
use aws_smithy_types::error::operation::BuildError;
use fis_mcp_core::ServiceError;

/// Classify an SDK error by walking its source chain.
///
/// The service error code (e.g. `ThrottlingException`) is included in the
/// text that gets matched, since the display chain alone often reads only
/// "service error".
pub(crate) fn classify_aws_error<E, R>(err: SdkError<E, R>) -> ServiceError
where
    E: StdError + ProvideErrorMetadata + 'static,
    R: std::fmt::Debug,
{
    let mut messages = Vec::new();
    if let Some(code) = err.code() {
        messages.push(code.to_string());
    }
    if let Some(message) = err.message() {
        messages.push(message.to_string());
    }
    collect_error_messages(&err, &mut messages);

    let root_message = match (err.code(), err.message()) {
        (Some(code), Some(message)) => format!("{}: {}", code, message),
        _ => messages
            .last()
            .cloned()
            .unwrap_or_else(|| "Unknown error".to_string()),
    };

    classify_error_message(&messages.join(" "), root_message)
}

/// Builder validation failures mean a required request member was missing
pub(crate) fn build_error(err: BuildError) -> ServiceError {
    ServiceError::Validation(err.to_string())
}

fn classify_error_message(combined: &str, root_message: String) -> ServiceError {
    let lower = combined.to_lowercase();

    if lower.contains("unauthorized")
        || lower.contains("accessdenied")
        || lower.contains("access denied")
        || lower.contains("not authorized")
        || lower.contains("security token")
        || lower.contains("expiredtoken")
        || lower.contains("expired token")
        || lower.contains("invalidclienttokenid")
        || lower.contains("credentials")
    {
        ServiceError::Authentication(root_message)
    } else if lower.contains("limitexceededexception")
        || lower.contains("servicequotaexceeded")
    {
        // Quotas do not clear on retry
        ServiceError::Validation(root_message)
    } else if lower.contains("throttl")
        || lower.contains("too many requests")
        || lower.contains("rate exceeded")
    {
        ServiceError::Throttled(root_message)
    } else if lower.contains("serviceunavailable")
        || lower.contains("service unavailable")
        || lower.contains("temporarily unavailable")
        || lower.contains("internalserver")
        || lower.contains("internalfailure")
        || lower.contains("internal server error")
    {
        ServiceError::Unavailable(root_message)
    } else if lower.contains("timeout")
        || lower.contains("timed out")
        || lower.contains("connection")
        || lower.contains("network")
        || lower.contains("dns")
    {
        ServiceError::Network(root_message)
    } else if lower.contains("resourcenotfound")
        || lower.contains("nosuchconfigurationrecorder")
        || lower.contains("resourcenotdiscovered")
        || lower.contains("not found")
        || lower.contains("does not exist")
    {
        ServiceError::NotFound(root_message)
    } else if lower.contains("validation")
        || lower.contains("invalidparameter")
        || lower.contains("invalid parameter")
        || lower.contains("conflictexception")
    {
        ServiceError::Validation(root_message)
    } else {
        ServiceError::Other(root_message)
    }
}

/// Recursively collect error messages from an error chain
fn collect_error_messages(err: &dyn StdError, messages: &mut Vec<String>) {
    let msg = err.to_string();
    // Generic wrapper messages add nothing to match against
    if !msg.is_empty()
        && !msg.starts_with("dispatch failure")
        && !msg.starts_with("connector error")
        && !msg.starts_with("unhandled error")
        && msg != "service error"
    {
        messages.push(msg);
    }

    if let Some(source) = err.source() {
        collect_error_messages(source, messages);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(message: &str) -> ServiceError {
        classify_error_message(message, message.to_string())
    }

    #[test]
    fn test_auth_errors() {
        assert!(matches!(
            classify("AccessDeniedException: User is not authorized to perform fis:StartExperiment"),
            ServiceError::Authentication(_)
        ));
        assert!(matches!(
            classify("ExpiredTokenException: The security token included in the request is expired"),
            ServiceError::Authentication(_)
        ));
    }

    #[test]
    fn test_throttling() {
        assert!(matches!(
            classify("ThrottlingException: Rate exceeded"),
            ServiceError::Throttled(_)
        ));
    }

    #[test]
    fn test_quota_errors_are_not_retryable() {
        let err = classify(
            "LimitExceededException: Limit exceeded for resource of type 'AWS::CloudFormation::Stack'",
        );
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(!err.is_retryable());

        let err = classify("ServiceQuotaExceededException: You have reached the maximum number of views");
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn test_unavailable() {
        assert!(matches!(
            classify("InternalServerException: An internal error occurred"),
            ServiceError::Unavailable(_)
        ));
    }

    #[test]
    fn test_network() {
        assert!(matches!(
            classify("io error: connection refused"),
            ServiceError::Network(_)
        ));
    }

    #[test]
    fn test_not_found() {
        assert!(matches!(
            classify("ResourceNotFoundException: Experiment template not found: EXT123"),
            ServiceError::NotFound(_)
        ));
        assert!(matches!(
            classify("ValidationError: Stack with id orders does not exist"),
            ServiceError::NotFound(_)
        ));
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            classify("ValidationException: roleArn must be a valid IAM role ARN"),
            ServiceError::Validation(_)
        ));
    }

    #[test]
    fn test_other_keeps_root_message() {
        let err = classify_error_message("something odd", "root cause".to_string());
        assert_eq!(err, ServiceError::Other("root cause".to_string()));
    }
}
