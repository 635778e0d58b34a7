use paperclip_error::{
    DispatchError, DispatchErrorKind, PaperclipError, PaperclipErrorKind, ProviderError,
    ProviderErrorKind, RetryableError, excerpt,
};

#[test]
fn test_rate_limit_is_not_retryable_but_carries_cooldown() {
    let err = ProviderError::new(ProviderErrorKind::RateLimited {
        retry_after_secs: 30,
        message: "quota exceeded".to_string(),
    });
    assert!(!err.is_retryable());
    assert_eq!(err.retry_after_secs(), Some(30));
}

#[test]
fn test_transient_kinds_are_retryable() {
    let kinds = [
        ProviderErrorKind::Network("connection reset".to_string()),
        ProviderErrorKind::HttpStatus {
            status_code: 500,
            body: "oops".to_string(),
        },
        ProviderErrorKind::MalformedResponse("expected value".to_string()),
    ];
    for kind in kinds {
        let err = ProviderError::new(kind);
        assert!(err.is_retryable(), "{} should be retryable", err);
        assert_eq!(err.retry_after_secs(), None);
    }
}

#[test]
fn test_missing_field_is_not_retryable() {
    let err = ProviderError::new(ProviderErrorKind::MissingField {
        provider: "gem".to_string(),
        field: "model",
    });
    assert!(!err.is_retryable());
    assert!(err.summary().contains("'model'"));
}

#[test]
fn test_http_status_display_is_bounded_but_body_is_kept() {
    let body = "x".repeat(2000);
    let err = ProviderError::new(ProviderErrorKind::HttpStatus {
        status_code: 502,
        body: body.clone(),
    });
    let shown = err.kind.to_string();
    assert!(shown.starts_with("HTTP 502: "));
    assert!(shown.len() < 420);
    match &err.kind {
        ProviderErrorKind::HttpStatus { body: kept, .. } => assert_eq!(kept.len(), 2000),
        other => panic!("unexpected kind {:?}", other),
    }
}

#[test]
fn test_excerpt_respects_char_boundaries() {
    assert_eq!(excerpt("héllo wörld", 4), "héll...");
    assert_eq!(excerpt("", 4), "");
    assert_eq!(excerpt("four", 4), "four");
}

#[test]
fn test_all_providers_failed_reports_last_error() {
    let last = ProviderError::new(ProviderErrorKind::Network("timed out".to_string()));
    let err = DispatchError::new(DispatchErrorKind::AllProvidersFailed {
        last: Some(last.clone()),
    });
    assert!(err.to_string().contains("All providers failed. Last: Network error: timed out"));
    assert_eq!(err.last_provider_error(), Some(&last));

    let skipped = DispatchError::new(DispatchErrorKind::AllProvidersFailed { last: None });
    assert!(skipped.to_string().contains("none attempted"));
}

#[test]
fn test_dispatch_error_converts_to_top_level() {
    let err: PaperclipError = DispatchError::new(DispatchErrorKind::Cancelled).into();
    assert!(matches!(err.kind(), PaperclipErrorKind::Dispatch(_)));
    assert!(err.to_string().starts_with("PaperClip Error:"));
}
