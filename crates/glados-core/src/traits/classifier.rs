// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Risk classifier trait: the mandatory pre-screening step.

use async_trait::async_trait;

use crate::types::ClassificationResult;

/// Maps raw message text to a discrete risk level and flag set.
///
/// Classification is infallible by contract: implementations that talk to an
/// external model must fail open to `FlagOnly` with a `classification_error`
/// flag rather than returning an error. Failing to SAFE would hide risk;
/// failing to BLOCK would deny service on a transient fault.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, message: &str) -> ClassificationResult;
}
