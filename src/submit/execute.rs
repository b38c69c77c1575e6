//! Submission execution

use crate::error::{Error, Result};
use crate::nbia::CartService;
use crate::submit::progress::{Phase, ProgressCallback};
use crate::submit::result::{cart_url, SubmissionResult};
use crate::types::{CartRequest, Credentials};
use tracing::debug;

/// Submit a shared cart
///
/// Steps:
/// 1. Reject an empty identifier list without contacting the service
/// 2. If credentials are given, authenticate; a rejected login stops here
/// 3. Create the cart and classify the response status
///
/// Remote failures are values of [`SubmissionResult`], never `Err`. The
/// request is sent at most once; there are no retries since a second
/// attempt under the same name would collide with the first.
pub async fn submit_cart(
    request: &CartRequest,
    credentials: Option<&Credentials>,
    service: &dyn CartService,
    progress: &dyn ProgressCallback,
) -> Result<SubmissionResult> {
    if request.identifiers.is_empty() {
        return Err(Error::EmptyIdentifierList);
    }

    let result = run_submission(request, credentials, service, progress).await;
    progress.on_phase(Phase::Complete).await;

    debug!(name = %request.name, code = ?result.code(), success = result.is_success(), "submission finished");
    Ok(result)
}

async fn run_submission(
    request: &CartRequest,
    credentials: Option<&Credentials>,
    service: &dyn CartService,
    progress: &dyn ProgressCallback,
) -> SubmissionResult {
    let mut session = None;

    if let Some(credentials) = credentials {
        progress.on_phase(Phase::Authenticating).await;
        let outcome = match service.authenticate(credentials).await {
            Ok(outcome) => outcome,
            Err(e) => return SubmissionResult::transport(&e),
        };
        if !outcome.is_success() {
            return SubmissionResult::from_auth_status(outcome.status);
        }
        session = outcome.token;
    }

    progress.on_phase(Phase::CreatingCart).await;
    progress
        .on_message(&format!(
            "Submitting {} series as '{}'",
            request.identifiers.len(),
            request.name
        ))
        .await;

    let response = match service.create_shared_cart(request, session.as_ref()).await {
        Ok(response) => response,
        Err(e) => return SubmissionResult::transport(&e),
    };

    if !response.body.trim().is_empty() {
        debug!(status = response.status, body = %response.body.trim(), "create cart body");
    }

    let url = cart_url(service.config().cart_search_url.as_str(), &request.name);
    SubmissionResult::from_status(response.status, &url)
}
